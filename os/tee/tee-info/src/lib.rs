//! # Secure Partition Layout
//!
//! Authoritative memory layout of the SoC and of the secure (TEE) partition.
//! Everything that needs to agree on where secure memory lives (the boundary
//! checks of the MMU services, the application configuration validator and
//! the REE-pointer checks) sources its numbers from here.
//!
//! ## Memory Map
//!
//! ```text
//! HP SRAM (IRAM/DRAM, identity mapped)
//!   0x4080_0000 ┌───────────────────────────┐
//!               │ TEE IRAM + DRAM (64 KiB)  │  secure only
//!   0x4081_0000 ├───────────────────────────┤
//!               │ REE IRAM / DRAM           │
//!   0x4088_0000 └───────────────────────────┘
//!
//! Flash MMU window (256 × 64 KiB pages)
//!   0x4200_0000 ┌───────────────────────────┐
//!               │ TEE IROM + DROM (1 MiB)   │  secure only
//!   0x4210_0000 ├───────────────────────────┤
//!               │ REE IROM / DROM / mmap    │
//!   0x4300_0000 └───────────────────────────┘
//!
//! Flash (physical offsets)
//!   0x0001_0000 tee_0 | 0x0004_0000 tee_1 | 0x0007_0000 tee_otadata
//!   0x0007_2000 secure storage ... 0x0008_0000
//! ```
//!
//! The two secure ranges returned by [`secure_vaddr_range`] and
//! [`secure_paddr_range`] are the ones no REE-initiated MMU operation may
//! touch.

#![cfg_attr(not(any(test, doctest)), no_std)]

pub mod memory;
pub mod partitions;

use tee_memory_addresses::{AddressRange, PhysicalAddress, VirtualAddress};

pub use memory::*;

/// Virtual range of the flash MMU window owned by the secure partition.
#[must_use]
pub fn secure_vaddr_range() -> AddressRange<VirtualAddress> {
    AddressRange::new(
        VirtualAddress::new(TEE_FLASH_VADDR_START),
        VirtualAddress::new(TEE_FLASH_VADDR_END),
    )
}

/// Flash (physical) range owned by the secure partition.
#[must_use]
pub fn secure_paddr_range() -> AddressRange<PhysicalAddress> {
    AddressRange::new(
        PhysicalAddress::new(TEE_FLASH_PADDR_START),
        PhysicalAddress::new(TEE_FLASH_PADDR_END),
    )
}

/// SRAM reserved for the secure partition (identity mapped).
#[must_use]
pub fn secure_sram_range() -> AddressRange<VirtualAddress> {
    AddressRange::new(
        VirtualAddress::new(TEE_SRAM_START),
        VirtualAddress::new(TEE_SRAM_END),
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn secure_ranges_match_constants() {
        let va = secure_vaddr_range();
        assert_eq!(va.start().as_u32(), 0x4200_0000);
        assert_eq!(va.len(), TEE_FLASH_VADDR_SIZE);

        let pa = secure_paddr_range();
        assert!(pa.contains(PhysicalAddress::new(partitions::TEE_OTA_1.offset)));
        assert!(pa.contains(PhysicalAddress::new(partitions::SECURE_STORAGE.offset)));
        assert!(!pa.contains(PhysicalAddress::new(TEE_FLASH_PADDR_END)));
    }

    #[test]
    fn ree_sram_starts_after_tee_sram() {
        let tee = secure_sram_range();
        assert!(!tee.contains(VirtualAddress::new(REE_SRAM_START)));
        assert!(tee.contains(VirtualAddress::new(REE_SRAM_START - 1)));
    }
}
