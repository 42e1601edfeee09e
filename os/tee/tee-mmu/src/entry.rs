use bitfield_struct::bitfield;
use tee_memory_addresses::PhysicalPage;

use crate::{MmuPage, MmuTarget};

/// A single 32-bit entry of the cache MMU table.
///
/// Each entry maps one 64 KiB page of the external memory window at
/// `SOC_MMU_VADDR_BASE + index * 64 KiB` to a page of flash or PSRAM.
///
/// ### Bit layout
///
/// | Bits   | Name        | Meaning |
/// |--------|-------------|---------|
/// | 0–8    | `page_num`  | Physical page number (`paddr >> 16`) |
/// | 9      | `valid`     | Entry is in use |
/// | 10     | `sensitive` | Access is decrypted by the flash encryption block |
/// | 11     | `psram`     | Target is PSRAM instead of flash |
/// | 12–31  | –           | Reserved, zero |
///
/// ### Example
/// ```rust
/// # use tee_mmu::MmuEntry;
/// let e = MmuEntry::new().with_page_num(0x42).with_valid(true);
/// assert_eq!(e.into_bits(), 0x242);
/// ```
#[bitfield(u32)]
#[derive(PartialEq, Eq)]
pub struct MmuEntry {
    /// Physical page number.
    #[bits(9)]
    pub page_num: u16,

    /// Entry is valid. Invalid entries fault on access.
    pub valid: bool,

    /// Page content goes through flash decryption.
    pub sensitive: bool,

    /// Page lives in PSRAM.
    pub psram: bool,

    #[bits(20)]
    __: u32,
}

impl MmuEntry {
    /// An unused entry.
    pub const INVALID: Self = Self::new();

    /// Valid entry mapping `page` of `target`.
    #[inline]
    #[must_use]
    pub const fn mapping(page: PhysicalPage<MmuPage>, target: MmuTarget) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let page_num = page.number() as u16;
        Self::new()
            .with_page_num(page_num)
            .with_valid(true)
            .with_psram(matches!(target, MmuTarget::Psram))
    }

    /// Target and physical page of a valid entry.
    #[inline]
    #[must_use]
    pub const fn target_page(self) -> Option<(MmuTarget, PhysicalPage<MmuPage>)> {
        if !self.valid() {
            return None;
        }
        let target = if self.psram() {
            MmuTarget::Psram
        } else {
            MmuTarget::Flash
        };
        Some((target, PhysicalPage::from_number(self.page_num() as u32)))
    }
}
