//! MMU entries backed by the SPI0 MMU item registers.

use core::ptr::{read_volatile, write_volatile};

use crate::{EntryStore, MmuEntry};

const DR_REG_SPI0_BASE: usize = 0x6000_2000;
const SPI_MEM_MMU_ITEM_CONTENT_REG: usize = DR_REG_SPI0_BASE + 0x37C;
const SPI_MEM_MMU_ITEM_INDEX_REG: usize = DR_REG_SPI0_BASE + 0x380;

/// The live MMU table.
///
/// Entries are accessed indirectly: the index register selects an entry,
/// the content register then reads or writes it.
pub struct MmuRegisters {
    _private: (),
}

impl MmuRegisters {
    /// # Safety
    /// At most one instance may exist, and only M-mode code may hold it.
    #[must_use]
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl EntryStore for MmuRegisters {
    #[allow(clippy::cast_possible_truncation)]
    fn read(&self, index: usize) -> MmuEntry {
        // SAFETY: MMIO registers of the SPI0 controller, always mapped.
        unsafe {
            write_volatile(SPI_MEM_MMU_ITEM_INDEX_REG as *mut u32, index as u32);
            MmuEntry::from_bits(read_volatile(SPI_MEM_MMU_ITEM_CONTENT_REG as *const u32))
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write(&mut self, index: usize, entry: MmuEntry) {
        // SAFETY: see `read`.
        unsafe {
            write_volatile(SPI_MEM_MMU_ITEM_INDEX_REG as *mut u32, index as u32);
            write_volatile(SPI_MEM_MMU_ITEM_CONTENT_REG as *mut u32, entry.into_bits());
        }
    }
}
