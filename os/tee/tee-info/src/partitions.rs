//! Flash partitions owned by the secure partition.

use crate::memory::{TEE_FLASH_PADDR_END, TEE_FLASH_PADDR_START};

/// A flash partition descriptor (`offset`, `size` in bytes).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Partition {
    pub label: &'static str,
    pub offset: u32,
    pub size: u32,
}

impl Partition {
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.offset + self.size
    }
}

/// First TEE application slot.
pub const TEE_OTA_0: Partition = Partition {
    label: "tee_0",
    offset: 0x1_0000,
    size: 0x3_0000,
};

/// Second TEE application slot.
pub const TEE_OTA_1: Partition = Partition {
    label: "tee_1",
    offset: 0x4_0000,
    size: 0x3_0000,
};

/// Selects the active TEE slot.
pub const TEE_OTADATA: Partition = Partition {
    label: "tee_otadata",
    offset: 0x7_0000,
    size: 0x2000,
};

/// Key slots of the secure storage service.
pub const SECURE_STORAGE: Partition = Partition {
    label: "secure_storage",
    offset: 0x7_2000,
    size: 0xE000,
};

/// All secure partitions in flash order.
pub const ALL: [Partition; 4] = [TEE_OTA_0, TEE_OTA_1, TEE_OTADATA, SECURE_STORAGE];

const _: () = {
    assert!(TEE_OTA_0.offset == TEE_FLASH_PADDR_START);
    assert!(TEE_OTA_0.end() == TEE_OTA_1.offset);
    assert!(TEE_OTA_1.end() == TEE_OTADATA.offset);
    assert!(TEE_OTADATA.end() == SECURE_STORAGE.offset);
    assert!(SECURE_STORAGE.end() == TEE_FLASH_PADDR_END);
};
