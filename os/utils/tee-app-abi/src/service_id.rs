//! Secure service numbers.
//!
//! THIS FILE WAS AUTOMATICALLY GENERATED BY `service-table-gen` FROM
//! `secure_service.tbl`. DO NOT EDIT!

use crate::Family;

/// Number of slots in the secure service table (highest number plus one).
pub const MAX_SECURE_SERVICES: usize = 50;

/// Identifier of a secure service.
#[repr(usize)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ServiceId {
    InvalidSecureService = 0,
    EspRomRouteIntrMatrix = 1,
    RvUtilsIntrEnable = 2,
    RvUtilsIntrDisable = 3,
    RvUtilsIntrSetPriority = 4,
    RvUtilsIntrSetType = 5,
    RvUtilsIntrSetThreshold = 6,
    RvUtilsIntrEdgeAck = 7,
    RvUtilsIntrGlobalEnable = 8,
    EfuseHalChipRevision = 9,
    EfuseHalGetChipVerPkg = 10,
    EfuseHalGetDisableWaferVersionMajor = 11,
    EfuseHalGetMac = 12,
    EspEfuseCheckSecureVersion = 13,
    EspEfuseReadFieldBlob = 14,
    EspFlashEncryptionEnabled = 15,
    WdtHalInit = 16,
    WdtHalDeinit = 17,
    EspAesIntrAlloc = 18,
    EspAesCryptCbc = 19,
    EspAesCryptCfb128 = 20,
    EspAesCryptCfb8 = 21,
    EspAesCryptCtr = 22,
    EspAesCryptEcb = 23,
    EspAesCryptOfb = 24,
    EspSha = 25,
    EspShaDma = 26,
    EspShaReadDigestState = 27,
    EspShaWriteDigestState = 28,
    EspTeeOtaBegin = 29,
    EspTeeOtaWrite = 30,
    EspTeeOtaEnd = 31,
    EspTeeSecStorageInit = 32,
    EspTeeSecStorageGenKey = 33,
    EspTeeSecStorageGetSignature = 34,
    EspTeeSecStorageGetPubkey = 35,
    EspTeeSecStorageEncrypt = 36,
    EspTeeSecStorageDecrypt = 37,
    EspTeeSecStorageIsSlotEmpty = 38,
    EspTeeSecStorageClearSlot = 39,
    EspTeeAttGenerateToken = 40,
    MmuHalMapRegion = 41,
    MmuHalUnmapRegion = 42,
    MmuHalVaddrToPaddr = 43,
    MmuHalPaddrToVaddr = 44,
    DummySecureService = 45,
    EspTeeServiceAdd = 46,
    EspTeeServiceSub = 47,
    EspTeeServiceMul = 48,
    EspTeeServiceDiv = 49,
}

impl ServiceId {
    /// All services in table order.
    pub const ALL: [Self; 50] = [
        Self::InvalidSecureService,
        Self::EspRomRouteIntrMatrix,
        Self::RvUtilsIntrEnable,
        Self::RvUtilsIntrDisable,
        Self::RvUtilsIntrSetPriority,
        Self::RvUtilsIntrSetType,
        Self::RvUtilsIntrSetThreshold,
        Self::RvUtilsIntrEdgeAck,
        Self::RvUtilsIntrGlobalEnable,
        Self::EfuseHalChipRevision,
        Self::EfuseHalGetChipVerPkg,
        Self::EfuseHalGetDisableWaferVersionMajor,
        Self::EfuseHalGetMac,
        Self::EspEfuseCheckSecureVersion,
        Self::EspEfuseReadFieldBlob,
        Self::EspFlashEncryptionEnabled,
        Self::WdtHalInit,
        Self::WdtHalDeinit,
        Self::EspAesIntrAlloc,
        Self::EspAesCryptCbc,
        Self::EspAesCryptCfb128,
        Self::EspAesCryptCfb8,
        Self::EspAesCryptCtr,
        Self::EspAesCryptEcb,
        Self::EspAesCryptOfb,
        Self::EspSha,
        Self::EspShaDma,
        Self::EspShaReadDigestState,
        Self::EspShaWriteDigestState,
        Self::EspTeeOtaBegin,
        Self::EspTeeOtaWrite,
        Self::EspTeeOtaEnd,
        Self::EspTeeSecStorageInit,
        Self::EspTeeSecStorageGenKey,
        Self::EspTeeSecStorageGetSignature,
        Self::EspTeeSecStorageGetPubkey,
        Self::EspTeeSecStorageEncrypt,
        Self::EspTeeSecStorageDecrypt,
        Self::EspTeeSecStorageIsSlotEmpty,
        Self::EspTeeSecStorageClearSlot,
        Self::EspTeeAttGenerateToken,
        Self::MmuHalMapRegion,
        Self::MmuHalUnmapRegion,
        Self::MmuHalVaddrToPaddr,
        Self::MmuHalPaddrToVaddr,
        Self::DummySecureService,
        Self::EspTeeServiceAdd,
        Self::EspTeeServiceSub,
        Self::EspTeeServiceMul,
        Self::EspTeeServiceDiv,
    ];

    /// Service for a raw identifier, if one is assigned.
    #[must_use]
    pub const fn from_raw(nr: usize) -> Option<Self> {
        match nr {
            0 => Some(Self::InvalidSecureService),
            1 => Some(Self::EspRomRouteIntrMatrix),
            2 => Some(Self::RvUtilsIntrEnable),
            3 => Some(Self::RvUtilsIntrDisable),
            4 => Some(Self::RvUtilsIntrSetPriority),
            5 => Some(Self::RvUtilsIntrSetType),
            6 => Some(Self::RvUtilsIntrSetThreshold),
            7 => Some(Self::RvUtilsIntrEdgeAck),
            8 => Some(Self::RvUtilsIntrGlobalEnable),
            9 => Some(Self::EfuseHalChipRevision),
            10 => Some(Self::EfuseHalGetChipVerPkg),
            11 => Some(Self::EfuseHalGetDisableWaferVersionMajor),
            12 => Some(Self::EfuseHalGetMac),
            13 => Some(Self::EspEfuseCheckSecureVersion),
            14 => Some(Self::EspEfuseReadFieldBlob),
            15 => Some(Self::EspFlashEncryptionEnabled),
            16 => Some(Self::WdtHalInit),
            17 => Some(Self::WdtHalDeinit),
            18 => Some(Self::EspAesIntrAlloc),
            19 => Some(Self::EspAesCryptCbc),
            20 => Some(Self::EspAesCryptCfb128),
            21 => Some(Self::EspAesCryptCfb8),
            22 => Some(Self::EspAesCryptCtr),
            23 => Some(Self::EspAesCryptEcb),
            24 => Some(Self::EspAesCryptOfb),
            25 => Some(Self::EspSha),
            26 => Some(Self::EspShaDma),
            27 => Some(Self::EspShaReadDigestState),
            28 => Some(Self::EspShaWriteDigestState),
            29 => Some(Self::EspTeeOtaBegin),
            30 => Some(Self::EspTeeOtaWrite),
            31 => Some(Self::EspTeeOtaEnd),
            32 => Some(Self::EspTeeSecStorageInit),
            33 => Some(Self::EspTeeSecStorageGenKey),
            34 => Some(Self::EspTeeSecStorageGetSignature),
            35 => Some(Self::EspTeeSecStorageGetPubkey),
            36 => Some(Self::EspTeeSecStorageEncrypt),
            37 => Some(Self::EspTeeSecStorageDecrypt),
            38 => Some(Self::EspTeeSecStorageIsSlotEmpty),
            39 => Some(Self::EspTeeSecStorageClearSlot),
            40 => Some(Self::EspTeeAttGenerateToken),
            41 => Some(Self::MmuHalMapRegion),
            42 => Some(Self::MmuHalUnmapRegion),
            43 => Some(Self::MmuHalVaddrToPaddr),
            44 => Some(Self::MmuHalPaddrToVaddr),
            45 => Some(Self::DummySecureService),
            46 => Some(Self::EspTeeServiceAdd),
            47 => Some(Self::EspTeeServiceSub),
            48 => Some(Self::EspTeeServiceMul),
            49 => Some(Self::EspTeeServiceDiv),
            _ => None,
        }
    }

    /// Table name of the service (`_ss_` prefix omitted).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InvalidSecureService => "invalid_secure_service",
            Self::EspRomRouteIntrMatrix => "esp_rom_route_intr_matrix",
            Self::RvUtilsIntrEnable => "rv_utils_intr_enable",
            Self::RvUtilsIntrDisable => "rv_utils_intr_disable",
            Self::RvUtilsIntrSetPriority => "rv_utils_intr_set_priority",
            Self::RvUtilsIntrSetType => "rv_utils_intr_set_type",
            Self::RvUtilsIntrSetThreshold => "rv_utils_intr_set_threshold",
            Self::RvUtilsIntrEdgeAck => "rv_utils_intr_edge_ack",
            Self::RvUtilsIntrGlobalEnable => "rv_utils_intr_global_enable",
            Self::EfuseHalChipRevision => "efuse_hal_chip_revision",
            Self::EfuseHalGetChipVerPkg => "efuse_hal_get_chip_ver_pkg",
            Self::EfuseHalGetDisableWaferVersionMajor => "efuse_hal_get_disable_wafer_version_major",
            Self::EfuseHalGetMac => "efuse_hal_get_mac",
            Self::EspEfuseCheckSecureVersion => "esp_efuse_check_secure_version",
            Self::EspEfuseReadFieldBlob => "esp_efuse_read_field_blob",
            Self::EspFlashEncryptionEnabled => "esp_flash_encryption_enabled",
            Self::WdtHalInit => "wdt_hal_init",
            Self::WdtHalDeinit => "wdt_hal_deinit",
            Self::EspAesIntrAlloc => "esp_aes_intr_alloc",
            Self::EspAesCryptCbc => "esp_aes_crypt_cbc",
            Self::EspAesCryptCfb128 => "esp_aes_crypt_cfb128",
            Self::EspAesCryptCfb8 => "esp_aes_crypt_cfb8",
            Self::EspAesCryptCtr => "esp_aes_crypt_ctr",
            Self::EspAesCryptEcb => "esp_aes_crypt_ecb",
            Self::EspAesCryptOfb => "esp_aes_crypt_ofb",
            Self::EspSha => "esp_sha",
            Self::EspShaDma => "esp_sha_dma",
            Self::EspShaReadDigestState => "esp_sha_read_digest_state",
            Self::EspShaWriteDigestState => "esp_sha_write_digest_state",
            Self::EspTeeOtaBegin => "esp_tee_ota_begin",
            Self::EspTeeOtaWrite => "esp_tee_ota_write",
            Self::EspTeeOtaEnd => "esp_tee_ota_end",
            Self::EspTeeSecStorageInit => "esp_tee_sec_storage_init",
            Self::EspTeeSecStorageGenKey => "esp_tee_sec_storage_gen_key",
            Self::EspTeeSecStorageGetSignature => "esp_tee_sec_storage_get_signature",
            Self::EspTeeSecStorageGetPubkey => "esp_tee_sec_storage_get_pubkey",
            Self::EspTeeSecStorageEncrypt => "esp_tee_sec_storage_encrypt",
            Self::EspTeeSecStorageDecrypt => "esp_tee_sec_storage_decrypt",
            Self::EspTeeSecStorageIsSlotEmpty => "esp_tee_sec_storage_is_slot_empty",
            Self::EspTeeSecStorageClearSlot => "esp_tee_sec_storage_clear_slot",
            Self::EspTeeAttGenerateToken => "esp_tee_att_generate_token",
            Self::MmuHalMapRegion => "mmu_hal_map_region",
            Self::MmuHalUnmapRegion => "mmu_hal_unmap_region",
            Self::MmuHalVaddrToPaddr => "mmu_hal_vaddr_to_paddr",
            Self::MmuHalPaddrToVaddr => "mmu_hal_paddr_to_vaddr",
            Self::DummySecureService => "dummy_secure_service",
            Self::EspTeeServiceAdd => "esp_tee_service_add",
            Self::EspTeeServiceSub => "esp_tee_service_sub",
            Self::EspTeeServiceMul => "esp_tee_service_mul",
            Self::EspTeeServiceDiv => "esp_tee_service_div",
        }
    }

    /// Number of word arguments the service takes, not counting the id.
    #[must_use]
    pub const fn nargs(self) -> usize {
        match self {
            Self::InvalidSecureService => 0,
            Self::EspRomRouteIntrMatrix => 3,
            Self::RvUtilsIntrEnable => 1,
            Self::RvUtilsIntrDisable => 1,
            Self::RvUtilsIntrSetPriority => 2,
            Self::RvUtilsIntrSetType => 2,
            Self::RvUtilsIntrSetThreshold => 1,
            Self::RvUtilsIntrEdgeAck => 1,
            Self::RvUtilsIntrGlobalEnable => 0,
            Self::EfuseHalChipRevision => 0,
            Self::EfuseHalGetChipVerPkg => 0,
            Self::EfuseHalGetDisableWaferVersionMajor => 0,
            Self::EfuseHalGetMac => 1,
            Self::EspEfuseCheckSecureVersion => 1,
            Self::EspEfuseReadFieldBlob => 3,
            Self::EspFlashEncryptionEnabled => 0,
            Self::WdtHalInit => 4,
            Self::WdtHalDeinit => 1,
            Self::EspAesIntrAlloc => 0,
            Self::EspAesCryptCbc => 6,
            Self::EspAesCryptCfb128 => 7,
            Self::EspAesCryptCfb8 => 6,
            Self::EspAesCryptCtr => 7,
            Self::EspAesCryptEcb => 4,
            Self::EspAesCryptOfb => 6,
            Self::EspSha => 4,
            Self::EspShaDma => 6,
            Self::EspShaReadDigestState => 2,
            Self::EspShaWriteDigestState => 2,
            Self::EspTeeOtaBegin => 0,
            Self::EspTeeOtaWrite => 3,
            Self::EspTeeOtaEnd => 0,
            Self::EspTeeSecStorageInit => 0,
            Self::EspTeeSecStorageGenKey => 2,
            Self::EspTeeSecStorageGetSignature => 4,
            Self::EspTeeSecStorageGetPubkey => 2,
            Self::EspTeeSecStorageEncrypt => 8,
            Self::EspTeeSecStorageDecrypt => 8,
            Self::EspTeeSecStorageIsSlotEmpty => 1,
            Self::EspTeeSecStorageClearSlot => 1,
            Self::EspTeeAttGenerateToken => 6,
            Self::MmuHalMapRegion => 6,
            Self::MmuHalUnmapRegion => 3,
            Self::MmuHalVaddrToPaddr => 4,
            Self::MmuHalPaddrToVaddr => 5,
            Self::DummySecureService => 0,
            Self::EspTeeServiceAdd => 2,
            Self::EspTeeServiceSub => 2,
            Self::EspTeeServiceMul => 2,
            Self::EspTeeServiceDiv => 2,
        }
    }

    #[must_use]
    pub const fn family(self) -> Family {
        match self {
            Self::InvalidSecureService => Family::Custom,
            Self::EspRomRouteIntrMatrix => Family::Idf,
            Self::RvUtilsIntrEnable => Family::Idf,
            Self::RvUtilsIntrDisable => Family::Idf,
            Self::RvUtilsIntrSetPriority => Family::Idf,
            Self::RvUtilsIntrSetType => Family::Idf,
            Self::RvUtilsIntrSetThreshold => Family::Idf,
            Self::RvUtilsIntrEdgeAck => Family::Idf,
            Self::RvUtilsIntrGlobalEnable => Family::Idf,
            Self::EfuseHalChipRevision => Family::Idf,
            Self::EfuseHalGetChipVerPkg => Family::Idf,
            Self::EfuseHalGetDisableWaferVersionMajor => Family::Idf,
            Self::EfuseHalGetMac => Family::Idf,
            Self::EspEfuseCheckSecureVersion => Family::Idf,
            Self::EspEfuseReadFieldBlob => Family::Idf,
            Self::EspFlashEncryptionEnabled => Family::Idf,
            Self::WdtHalInit => Family::Idf,
            Self::WdtHalDeinit => Family::Idf,
            Self::EspAesIntrAlloc => Family::Idf,
            Self::EspAesCryptCbc => Family::Idf,
            Self::EspAesCryptCfb128 => Family::Idf,
            Self::EspAesCryptCfb8 => Family::Idf,
            Self::EspAesCryptCtr => Family::Idf,
            Self::EspAesCryptEcb => Family::Idf,
            Self::EspAesCryptOfb => Family::Idf,
            Self::EspSha => Family::Idf,
            Self::EspShaDma => Family::Idf,
            Self::EspShaReadDigestState => Family::Idf,
            Self::EspShaWriteDigestState => Family::Idf,
            Self::EspTeeOtaBegin => Family::Custom,
            Self::EspTeeOtaWrite => Family::Custom,
            Self::EspTeeOtaEnd => Family::Custom,
            Self::EspTeeSecStorageInit => Family::Custom,
            Self::EspTeeSecStorageGenKey => Family::Custom,
            Self::EspTeeSecStorageGetSignature => Family::Custom,
            Self::EspTeeSecStorageGetPubkey => Family::Custom,
            Self::EspTeeSecStorageEncrypt => Family::Custom,
            Self::EspTeeSecStorageDecrypt => Family::Custom,
            Self::EspTeeSecStorageIsSlotEmpty => Family::Custom,
            Self::EspTeeSecStorageClearSlot => Family::Custom,
            Self::EspTeeAttGenerateToken => Family::Custom,
            Self::MmuHalMapRegion => Family::Idf,
            Self::MmuHalUnmapRegion => Family::Idf,
            Self::MmuHalVaddrToPaddr => Family::Idf,
            Self::MmuHalPaddrToVaddr => Family::Idf,
            Self::DummySecureService => Family::Custom,
            Self::EspTeeServiceAdd => Family::Custom,
            Self::EspTeeServiceSub => Family::Custom,
            Self::EspTeeServiceMul => Family::Custom,
            Self::EspTeeServiceDiv => Family::Custom,
        }
    }
}
