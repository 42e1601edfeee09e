//! # Memory Layout

/// Lowest address of the on-chip HP SRAM (IRAM and DRAM alias each other).
pub const SOC_SRAM_LOW: u32 = 0x4080_0000;

/// One past the highest HP SRAM address.
pub const SOC_SRAM_HIGH: u32 = 0x4088_0000;

/// Bytes of SRAM reserved for the secure partition's code, data and stacks.
pub const TEE_SRAM_SIZE: u32 = 0x1_0000; // 64 KiB

/// First secure SRAM address. The TEE sits at the bottom of SRAM.
pub const TEE_SRAM_START: u32 = SOC_SRAM_LOW;

/// One past the last secure SRAM address.
pub const TEE_SRAM_END: u32 = TEE_SRAM_START + TEE_SRAM_SIZE;

/// First SRAM address available to the REE.
pub const REE_SRAM_START: u32 = TEE_SRAM_END;

/// Base of the cache-mapped external memory window (IROM and DROM share it).
pub const SOC_MMU_VADDR_BASE: u32 = 0x4200_0000;

/// Number of entries in the flash MMU table.
pub const SOC_MMU_ENTRY_NUM: u32 = 256;

/// Page size the flash MMU is configured with.
pub const SOC_MMU_PAGE_SIZE: u32 = 0x1_0000; // 64 KiB

/// One past the last address of the cache-mapped window.
pub const SOC_MMU_VADDR_END: u32 = SOC_MMU_VADDR_BASE + SOC_MMU_ENTRY_NUM * SOC_MMU_PAGE_SIZE;

/// Size of the attached SPI flash.
pub const SOC_FLASH_SIZE: u32 = 0x100_0000; // 16 MiB

/// Start of the flash window mapping the TEE's IROM and DROM.
pub const TEE_FLASH_VADDR_START: u32 = SOC_MMU_VADDR_BASE;

/// Bytes of the flash window reserved for the TEE.
pub const TEE_FLASH_VADDR_SIZE: u32 = 0x10_0000; // 1 MiB

/// One past the last secure flash-window address.
pub const TEE_FLASH_VADDR_END: u32 = TEE_FLASH_VADDR_START + TEE_FLASH_VADDR_SIZE;

/// First flash offset owned by the TEE (the `tee_0` partition).
pub const TEE_FLASH_PADDR_START: u32 = 0x1_0000;

/// Bytes of flash owned by the TEE: both TEE app slots, the TEE OTA data
/// and the secure storage partition.
pub const TEE_FLASH_PADDR_SIZE: u32 = 0x7_0000;

/// One past the last secure flash offset.
pub const TEE_FLASH_PADDR_END: u32 = TEE_FLASH_PADDR_START + TEE_FLASH_PADDR_SIZE;

/// Size of the TEE stack in SRAM.
pub const TEE_STACK_SIZE: usize = 4 * 1024;

const _: () = {
    assert!(SOC_SRAM_LOW < SOC_SRAM_HIGH);
    assert!(TEE_SRAM_END <= SOC_SRAM_HIGH);
    assert!(SOC_MMU_PAGE_SIZE.is_power_of_two());
    assert!(TEE_FLASH_VADDR_START.is_multiple_of(SOC_MMU_PAGE_SIZE));
    assert!(TEE_FLASH_VADDR_SIZE.is_multiple_of(SOC_MMU_PAGE_SIZE));
    assert!(TEE_FLASH_VADDR_END <= SOC_MMU_VADDR_END);
    assert!(TEE_FLASH_PADDR_START.is_multiple_of(SOC_MMU_PAGE_SIZE));
    assert!(TEE_FLASH_PADDR_END <= SOC_FLASH_SIZE);
    assert!(TEE_STACK_SIZE.is_multiple_of(16));
    assert!(TEE_STACK_SIZE <= TEE_SRAM_SIZE as usize);
};
