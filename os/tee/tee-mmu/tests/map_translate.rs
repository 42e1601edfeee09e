use proptest::prelude::*;
use tee_info::{SOC_FLASH_SIZE, SOC_MMU_ENTRY_NUM, SOC_MMU_PAGE_SIZE, SOC_MMU_VADDR_BASE};
use tee_memory_addresses::{PhysicalAddress, VirtualAddress};
use tee_mmu::{EntryTable, MMU_ID, Mmu, MmuError, MmuHal, MmuTarget, VaddrKind};
use tee_sync::SpinLock;

const PAGE: u32 = SOC_MMU_PAGE_SIZE;
const FLASH_PAGES: u32 = SOC_FLASH_SIZE / PAGE;

#[test]
fn hal_through_spin_lock() {
    let hal: &dyn MmuHal = &SpinLock::new(Mmu::new(EntryTable::new()));
    let va = VirtualAddress::new(SOC_MMU_VADDR_BASE + 0x40 * PAGE);
    let pa = PhysicalAddress::new(0x20 * PAGE);

    assert_eq!(hal.map_region(MMU_ID, MmuTarget::Flash, va, pa, PAGE), Ok(PAGE));
    assert_eq!(hal.vaddr_to_paddr(MMU_ID, va + 8), Ok((pa + 8, MmuTarget::Flash)));
    assert_eq!(
        hal.paddr_to_vaddr(MMU_ID, pa + 8, MmuTarget::Flash, VaddrKind::Data),
        Ok(va + 8)
    );
    assert_eq!(hal.unmap_region(MMU_ID, va, PAGE), Ok(()));
    assert_eq!(
        hal.vaddr_to_paddr(MMU_ID, va),
        Err(MmuError::NotMapped(va.as_u32()))
    );
}

proptest! {
    #[test]
    fn translations_are_inverse_over_mapped_range(
        vpage in 0..SOC_MMU_ENTRY_NUM - 8,
        ppage in 0..FLASH_PAGES - 8,
        pages in 1u32..=8,
        seed in any::<u32>(),
    ) {
        let mut mmu = Mmu::new(EntryTable::new());
        let va = VirtualAddress::new(SOC_MMU_VADDR_BASE + vpage * PAGE);
        let pa = PhysicalAddress::new(ppage * PAGE);
        let mapped = mmu.map_region(MMU_ID, MmuTarget::Flash, va, pa, pages * PAGE).unwrap();
        prop_assert_eq!(mapped, pages * PAGE);

        let off = seed % (pages * PAGE);
        let (back, target) = mmu.vaddr_to_paddr(MMU_ID, va + off).unwrap();
        prop_assert_eq!(back, pa + off);
        prop_assert_eq!(target, MmuTarget::Flash);
        prop_assert_eq!(
            mmu.paddr_to_vaddr(MMU_ID, pa + off, MmuTarget::Flash, VaddrKind::Data).unwrap(),
            va + off
        );
    }

    #[test]
    fn unmapped_entries_stay_untouched(
        vpage in 0..SOC_MMU_ENTRY_NUM - 4,
        pages in 1u32..=4,
    ) {
        let mut mmu = Mmu::new(EntryTable::new());
        let va = VirtualAddress::new(SOC_MMU_VADDR_BASE + vpage * PAGE);
        mmu.map_region(MMU_ID, MmuTarget::Flash, va, PhysicalAddress::new(0), pages * PAGE).unwrap();

        let first = vpage as usize;
        for (index, _) in mmu.store().valid_entries() {
            prop_assert!(index >= first && index < first + pages as usize);
        }
    }
}
