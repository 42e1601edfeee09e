use log::debug;
use tee_info::{SOC_FLASH_SIZE, SOC_MMU_ENTRY_NUM, SOC_MMU_PAGE_SIZE, SOC_MMU_VADDR_BASE, SOC_MMU_VADDR_END};
use tee_memory_addresses::{PageSize, PhysicalAddress, PhysicalPage, VirtualAddress};

use crate::{MMU_ID, MmuEntry, MmuError, MmuPage, MmuTarget, VaddrKind};

const ENTRY_NUM: usize = SOC_MMU_ENTRY_NUM as usize;

/// Highest addressable PSRAM byte + 1 (9-bit page number).
const PSRAM_LIMIT: u32 = (1 << 9) * SOC_MMU_PAGE_SIZE;

const _: () = assert!(MmuPage::SIZE == SOC_MMU_PAGE_SIZE);
const _: () = assert!(SOC_FLASH_SIZE / SOC_MMU_PAGE_SIZE <= 1 << 9);

/// Backing storage of the MMU entries.
///
/// `index` is always `< SOC_MMU_ENTRY_NUM`; [`Mmu`] never hands out others.
pub trait EntryStore {
    fn read(&self, index: usize) -> MmuEntry;
    fn write(&mut self, index: usize, entry: MmuEntry);
}

/// In-memory entry table, all entries invalid after construction.
#[derive(Clone)]
pub struct EntryTable {
    entries: [MmuEntry; ENTRY_NUM],
}

impl EntryTable {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: [MmuEntry::INVALID; ENTRY_NUM],
        }
    }

    /// `(index, entry)` of every valid entry.
    pub fn valid_entries(&self) -> impl Iterator<Item = (usize, MmuEntry)> + '_ {
        self.entries
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, e)| e.valid())
    }
}

impl Default for EntryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryStore for EntryTable {
    #[inline]
    fn read(&self, index: usize) -> MmuEntry {
        self.entries[index]
    }

    #[inline]
    fn write(&mut self, index: usize, entry: MmuEntry) {
        self.entries[index] = entry;
    }
}

/// The cache MMU over some entry storage.
pub struct Mmu<S> {
    store: S,
}

#[inline]
const fn check_id(mmu_id: u32) -> Result<(), MmuError> {
    if mmu_id == MMU_ID {
        Ok(())
    } else {
        Err(MmuError::UnsupportedMmuId(mmu_id))
    }
}

/// Table index of the entry translating `vaddr`.
#[inline]
const fn entry_index(vaddr: VirtualAddress) -> Option<usize> {
    let va = vaddr.as_u32();
    if va < SOC_MMU_VADDR_BASE || va >= SOC_MMU_VADDR_END {
        return None;
    }
    Some(((va - SOC_MMU_VADDR_BASE) >> MmuPage::SHIFT) as usize)
}

/// First entry and number of entries covering `[vaddr, vaddr + len)`.
fn vaddr_span(vaddr: VirtualAddress, len: u32) -> Result<(usize, usize), MmuError> {
    if len == 0 {
        return Err(MmuError::ZeroLength);
    }
    if !vaddr.is_aligned::<MmuPage>() {
        return Err(MmuError::Unaligned(vaddr.as_u32()));
    }
    let out_of_window = MmuError::VaddrOutOfWindow {
        vaddr: vaddr.as_u32(),
        len,
    };
    let first = entry_index(vaddr).ok_or(out_of_window)?;
    let end = u64::from(vaddr.as_u32()) + u64::from(len);
    if end > u64::from(SOC_MMU_VADDR_END) {
        return Err(out_of_window);
    }
    Ok((first, len.div_ceil(MmuPage::SIZE) as usize))
}

fn check_paddr(target: MmuTarget, paddr: PhysicalAddress, len: u32) -> Result<(), MmuError> {
    if !paddr.is_aligned::<MmuPage>() {
        return Err(MmuError::Unaligned(paddr.as_u32()));
    }
    let limit = match target {
        MmuTarget::Flash => SOC_FLASH_SIZE,
        MmuTarget::Psram => PSRAM_LIMIT,
    };
    if u64::from(paddr.as_u32()) + u64::from(len) > u64::from(limit) {
        return Err(MmuError::PaddrOutOfRange {
            paddr: paddr.as_u32(),
            len,
        });
    }
    Ok(())
}

impl<S: EntryStore> Mmu<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Raw entry at `index`, if in range.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<MmuEntry> {
        (index < ENTRY_NUM).then(|| self.store.read(index))
    }

    /// Map `len` bytes of `target` memory at `paddr` to `vaddr`.
    ///
    /// Both addresses must be page aligned; `len` is rounded up to whole
    /// pages. Entries already in use are overwritten. Returns the number of
    /// bytes mapped (whole pages).
    ///
    /// # Errors
    /// See [`MmuError`]. Nothing is written on error.
    pub fn map_region(
        &mut self,
        mmu_id: u32,
        target: MmuTarget,
        vaddr: VirtualAddress,
        paddr: PhysicalAddress,
        len: u32,
    ) -> Result<u32, MmuError> {
        check_id(mmu_id)?;
        let (first, count) = vaddr_span(vaddr, len)?;
        check_paddr(target, paddr, len)?;

        let first_page = paddr.page::<MmuPage>().number();
        for i in 0..count {
            // `count` is at most SOC_MMU_ENTRY_NUM
            #[allow(clippy::cast_possible_truncation)]
            let page = PhysicalPage::from_number(first_page + i as u32);
            self.store.write(first + i, MmuEntry::mapping(page, target));
        }

        #[allow(clippy::cast_possible_truncation)]
        let mapped = count as u32 * MmuPage::SIZE;
        debug!(target: "tee_mmu", "map {vaddr} -> {paddr} ({target:?}), {mapped:#x} bytes");
        Ok(mapped)
    }

    /// Invalidate the entries covering `[vaddr, vaddr + len)`.
    ///
    /// # Errors
    /// See [`MmuError`]. Nothing is written on error.
    pub fn unmap_region(&mut self, mmu_id: u32, vaddr: VirtualAddress, len: u32) -> Result<(), MmuError> {
        check_id(mmu_id)?;
        let (first, count) = vaddr_span(vaddr, len)?;
        for index in first..first + count {
            self.store.write(index, MmuEntry::INVALID);
        }
        debug!(target: "tee_mmu", "unmap {vaddr}, {count} pages");
        Ok(())
    }

    /// Physical address and target behind `vaddr`.
    ///
    /// # Errors
    /// [`MmuError::VaddrOutOfWindow`] or [`MmuError::NotMapped`].
    pub fn vaddr_to_paddr(
        &self,
        mmu_id: u32,
        vaddr: VirtualAddress,
    ) -> Result<(PhysicalAddress, MmuTarget), MmuError> {
        check_id(mmu_id)?;
        let index = entry_index(vaddr).ok_or(MmuError::VaddrOutOfWindow {
            vaddr: vaddr.as_u32(),
            len: 0,
        })?;
        let (target, page) = self
            .store
            .read(index)
            .target_page()
            .ok_or(MmuError::NotMapped(vaddr.as_u32()))?;
        Ok((page.join(vaddr.offset::<MmuPage>()), target))
    }

    /// Lowest virtual address mapping `paddr` of `target`.
    ///
    /// Instruction and data share the window, so the [`VaddrKind`] does not
    /// change the result.
    ///
    /// # Errors
    /// [`MmuError::NotMapped`] if no valid entry maps that page.
    pub fn paddr_to_vaddr(
        &self,
        mmu_id: u32,
        paddr: PhysicalAddress,
        target: MmuTarget,
        _kind: VaddrKind,
    ) -> Result<VirtualAddress, MmuError> {
        check_id(mmu_id)?;
        let (page, offset) = paddr.split::<MmuPage>();
        let wanted = MmuEntry::mapping(page, target);

        let index = (0..ENTRY_NUM)
            .find(|&i| self.store.read(i) == wanted)
            .ok_or(MmuError::NotMapped(paddr.as_u32()))?;

        #[allow(clippy::cast_possible_truncation)]
        let base = SOC_MMU_VADDR_BASE + ((index as u32) << MmuPage::SHIFT);
        Ok(VirtualAddress::new(base | offset.as_u32()))
    }

    /// Invalidate every entry.
    pub fn unmap_all(&mut self) {
        for index in 0..ENTRY_NUM {
            self.store.write(index, MmuEntry::INVALID);
        }
    }
}

impl<S: EntryStore + Default> Default for Mmu<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PAGE: u32 = SOC_MMU_PAGE_SIZE;

    fn va(v: u32) -> VirtualAddress {
        VirtualAddress::new(v)
    }

    fn pa(v: u32) -> PhysicalAddress {
        PhysicalAddress::new(v)
    }

    #[test]
    fn map_rounds_up_to_whole_pages() {
        let mut mmu = Mmu::new(EntryTable::new());
        let mapped = mmu
            .map_region(MMU_ID, MmuTarget::Flash, va(0x4220_0000), pa(0x10_0000), PAGE + 1)
            .unwrap();
        assert_eq!(mapped, 2 * PAGE);
        assert_eq!(mmu.store().valid_entries().count(), 2);
        assert_eq!(mmu.entry(0x20).unwrap().page_num(), 0x10);
        assert_eq!(mmu.entry(0x21).unwrap().page_num(), 0x11);
    }

    #[test]
    fn map_overwrites_existing_entries() {
        let mut mmu = Mmu::new(EntryTable::new());
        mmu.map_region(MMU_ID, MmuTarget::Flash, va(0x4220_0000), pa(0x10_0000), PAGE)
            .unwrap();
        mmu.map_region(MMU_ID, MmuTarget::Flash, va(0x4220_0000), pa(0x20_0000), PAGE)
            .unwrap();
        assert_eq!(
            mmu.vaddr_to_paddr(MMU_ID, va(0x4220_0010)),
            Ok((pa(0x20_0010), MmuTarget::Flash))
        );
    }

    #[test]
    fn rejects_bad_requests_without_writing() {
        let mut mmu = Mmu::new(EntryTable::new());
        let cases = [
            (1, va(0x4220_0000), pa(0), PAGE, MmuError::UnsupportedMmuId(1)),
            (MMU_ID, va(0x4220_0010), pa(0), PAGE, MmuError::Unaligned(0x4220_0010)),
            (MMU_ID, va(0x4220_0000), pa(0x10), PAGE, MmuError::Unaligned(0x10)),
            (MMU_ID, va(0x4220_0000), pa(0), 0, MmuError::ZeroLength),
            (
                MMU_ID,
                va(0x42FF_0000),
                pa(0),
                2 * PAGE,
                MmuError::VaddrOutOfWindow { vaddr: 0x42FF_0000, len: 2 * PAGE },
            ),
            (
                MMU_ID,
                va(0x4220_0000),
                pa(SOC_FLASH_SIZE),
                PAGE,
                MmuError::PaddrOutOfRange { paddr: SOC_FLASH_SIZE, len: PAGE },
            ),
        ];
        for (id, v, p, len, err) in cases {
            assert_eq!(mmu.map_region(id, MmuTarget::Flash, v, p, len), Err(err));
        }
        assert_eq!(mmu.store().valid_entries().count(), 0);
    }

    #[test]
    fn psram_may_exceed_flash_size() {
        let mut mmu = Mmu::new(EntryTable::new());
        assert!(mmu
            .map_region(MMU_ID, MmuTarget::Psram, va(0x4280_0000), pa(SOC_FLASH_SIZE), PAGE)
            .is_ok());
        assert_eq!(
            mmu.paddr_to_vaddr(MMU_ID, pa(SOC_FLASH_SIZE + 4), MmuTarget::Psram, VaddrKind::Data),
            Ok(va(0x4280_0004))
        );
        assert_eq!(
            mmu.paddr_to_vaddr(MMU_ID, pa(SOC_FLASH_SIZE + 4), MmuTarget::Flash, VaddrKind::Data),
            Err(MmuError::NotMapped(SOC_FLASH_SIZE + 4))
        );
    }

    #[test]
    fn unmap_invalidates_entries() {
        let mut mmu = Mmu::new(EntryTable::new());
        mmu.map_region(MMU_ID, MmuTarget::Flash, va(0x4220_0000), pa(0x10_0000), 3 * PAGE)
            .unwrap();
        mmu.unmap_region(MMU_ID, va(0x4221_0000), PAGE).unwrap();
        assert!(mmu.vaddr_to_paddr(MMU_ID, va(0x4220_0000)).is_ok());
        assert_eq!(
            mmu.vaddr_to_paddr(MMU_ID, va(0x4221_0000)),
            Err(MmuError::NotMapped(0x4221_0000))
        );
        assert!(mmu.vaddr_to_paddr(MMU_ID, va(0x4222_0000)).is_ok());
    }

    #[test]
    fn paddr_to_vaddr_returns_lowest_alias() {
        let mut mmu = Mmu::new(EntryTable::new());
        mmu.map_region(MMU_ID, MmuTarget::Flash, va(0x4250_0000), pa(0x30_0000), PAGE)
            .unwrap();
        mmu.map_region(MMU_ID, MmuTarget::Flash, va(0x4230_0000), pa(0x30_0000), PAGE)
            .unwrap();
        assert_eq!(
            mmu.paddr_to_vaddr(MMU_ID, pa(0x30_1234), MmuTarget::Flash, VaddrKind::Instruction),
            Ok(va(0x4230_1234))
        );
    }

    #[test]
    fn translate_outside_window_fails() {
        let mmu = Mmu::new(EntryTable::new());
        assert!(matches!(
            mmu.vaddr_to_paddr(MMU_ID, va(0x4080_0000)),
            Err(MmuError::VaddrOutOfWindow { .. })
        ));
    }
}
