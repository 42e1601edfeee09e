//! # Cache MMU
//!
//! Model of the external memory MMU: a flat table of [`MmuEntry`] words,
//! one per 64 KiB page of the `0x4200_0000..0x4300_0000` window, each
//! selecting a flash (or PSRAM) page.
//!
//! ```text
//!   vaddr 0x4213_4567
//!         │  index = (vaddr - 0x4200_0000) >> 16 = 0x13
//!         ▼
//!   entry[0x13] = { valid, page_num = 0x05 }
//!         │
//!         ▼
//!   paddr 0x0005_4567   (page_num << 16 | offset)
//! ```
//!
//! [`Mmu`] implements the four operations the secure services expose
//! (`map_region`, `unmap_region`, `vaddr_to_paddr`, `paddr_to_vaddr`) over
//! an [`EntryStore`]: the [`EntryTable`] shadow on the host and, on the chip,
//! the SPI0 MMU item registers. The [`MmuHal`] trait is the seam the secure
//! services call through; it is implemented for a [`SpinLock`]-protected
//! [`Mmu`] so the table can be installed as a shared `'static` collaborator.
//!
//! None of this knows about the secure partition. Refusing requests that
//! touch TEE memory is the caller's job.

#![cfg_attr(not(any(test, doctest)), no_std)]

mod entry;
mod mmu;
#[cfg(target_arch = "riscv32")]
pub mod regs;

pub use entry::MmuEntry;
pub use mmu::{EntryStore, EntryTable, Mmu};

use tee_memory_addresses::{PhysicalAddress, Size64K, VirtualAddress};
use tee_sync::SpinLock;

/// The page size the MMU is configured for.
pub type MmuPage = Size64K;

/// The only MMU instance on this SoC.
pub const MMU_ID: u32 = 0;

/// Memory behind an MMU entry (`mmu_target_t`).
#[repr(u32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MmuTarget {
    Flash = 1 << 0,
    Psram = 1 << 1,
}

impl MmuTarget {
    #[must_use]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::Flash),
            2 => Some(Self::Psram),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self as u32
    }
}

/// Bus a virtual address is requested for (`mmu_vaddr_t`).
///
/// Instruction and data accesses share one window here, so the kind only
/// has to be valid.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VaddrKind {
    Data = 1 << 0,
    Instruction = 1 << 1,
}

impl VaddrKind {
    #[must_use]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::Data),
            2 => Some(Self::Instruction),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum MmuError {
    #[error("unsupported MMU id {0}")]
    UnsupportedMmuId(u32),
    #[error("address {0:#010x} is not page aligned")]
    Unaligned(u32),
    #[error("zero-length region")]
    ZeroLength,
    #[error("virtual region at {vaddr:#010x} (+{len:#x}) leaves the MMU window")]
    VaddrOutOfWindow { vaddr: u32, len: u32 },
    #[error("physical region at {paddr:#010x} (+{len:#x}) exceeds the target memory")]
    PaddrOutOfRange { paddr: u32, len: u32 },
    #[error("address {0:#010x} is not mapped")]
    NotMapped(u32),
}

/// MMU operations as seen by the secure services.
pub trait MmuHal: Sync {
    /// Map `len` bytes (rounded up to whole pages) of `target` memory at
    /// `paddr` to `vaddr`, replacing existing entries. Returns the mapped
    /// length in bytes.
    ///
    /// # Errors
    /// Invalid MMU id, misaligned addresses, empty or out-of-window regions.
    fn map_region(
        &self,
        mmu_id: u32,
        target: MmuTarget,
        vaddr: VirtualAddress,
        paddr: PhysicalAddress,
        len: u32,
    ) -> Result<u32, MmuError>;

    /// Invalidate the entries covering `[vaddr, vaddr + len)`.
    ///
    /// # Errors
    /// Invalid MMU id, misaligned `vaddr`, empty or out-of-window regions.
    fn unmap_region(&self, mmu_id: u32, vaddr: VirtualAddress, len: u32) -> Result<(), MmuError>;

    /// Physical address and target behind `vaddr`.
    ///
    /// # Errors
    /// [`MmuError::NotMapped`] if the entry is invalid.
    fn vaddr_to_paddr(
        &self,
        mmu_id: u32,
        vaddr: VirtualAddress,
    ) -> Result<(PhysicalAddress, MmuTarget), MmuError>;

    /// Lowest virtual address mapping `paddr` of `target`.
    ///
    /// # Errors
    /// [`MmuError::NotMapped`] if no valid entry maps the page.
    fn paddr_to_vaddr(
        &self,
        mmu_id: u32,
        paddr: PhysicalAddress,
        target: MmuTarget,
        kind: VaddrKind,
    ) -> Result<VirtualAddress, MmuError>;
}

impl<S: EntryStore + Send> MmuHal for SpinLock<Mmu<S>> {
    fn map_region(
        &self,
        mmu_id: u32,
        target: MmuTarget,
        vaddr: VirtualAddress,
        paddr: PhysicalAddress,
        len: u32,
    ) -> Result<u32, MmuError> {
        self.lock_irq().map_region(mmu_id, target, vaddr, paddr, len)
    }

    fn unmap_region(&self, mmu_id: u32, vaddr: VirtualAddress, len: u32) -> Result<(), MmuError> {
        self.lock_irq().unmap_region(mmu_id, vaddr, len)
    }

    fn vaddr_to_paddr(
        &self,
        mmu_id: u32,
        vaddr: VirtualAddress,
    ) -> Result<(PhysicalAddress, MmuTarget), MmuError> {
        self.lock_irq().vaddr_to_paddr(mmu_id, vaddr)
    }

    fn paddr_to_vaddr(
        &self,
        mmu_id: u32,
        paddr: PhysicalAddress,
        target: MmuTarget,
        kind: VaddrKind,
    ) -> Result<VirtualAddress, MmuError> {
        self.lock_irq().paddr_to_vaddr(mmu_id, paddr, target, kind)
    }
}
