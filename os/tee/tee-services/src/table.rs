//! The secure service table.

use tee_app_abi::ServiceId as Id;
use tee_dispatch::ServiceFn::{Args0, Args1, Args2, Args3, Args4, Args5, Args6, Args7, Args8};
use tee_dispatch::ServiceTable;

use crate::services::{
    aes, attestation, efuse, interrupts, invalid, mmu, ota, sec_storage, sha, test_services, wdt,
};

/// Every service number in use, bound to its implementation.
pub static SECURE_SERVICE_TABLE: ServiceTable = ServiceTable::new(Args0(invalid::invalid_secure_service))
    .with(Id::EspRomRouteIntrMatrix, Args3(interrupts::esp_rom_route_intr_matrix))
    .with(Id::RvUtilsIntrEnable, Args1(interrupts::rv_utils_intr_enable))
    .with(Id::RvUtilsIntrDisable, Args1(interrupts::rv_utils_intr_disable))
    .with(Id::RvUtilsIntrSetPriority, Args2(interrupts::rv_utils_intr_set_priority))
    .with(Id::RvUtilsIntrSetType, Args2(interrupts::rv_utils_intr_set_type))
    .with(Id::RvUtilsIntrSetThreshold, Args1(interrupts::rv_utils_intr_set_threshold))
    .with(Id::RvUtilsIntrEdgeAck, Args1(interrupts::rv_utils_intr_edge_ack))
    .with(Id::RvUtilsIntrGlobalEnable, Args0(interrupts::rv_utils_intr_global_enable))
    .with(Id::EfuseHalChipRevision, Args0(efuse::efuse_hal_chip_revision))
    .with(Id::EfuseHalGetChipVerPkg, Args0(efuse::efuse_hal_get_chip_ver_pkg))
    .with(
        Id::EfuseHalGetDisableWaferVersionMajor,
        Args0(efuse::efuse_hal_get_disable_wafer_version_major),
    )
    .with(Id::EfuseHalGetMac, Args1(efuse::efuse_hal_get_mac))
    .with(Id::EspEfuseCheckSecureVersion, Args1(efuse::esp_efuse_check_secure_version))
    .with(Id::EspEfuseReadFieldBlob, Args3(efuse::esp_efuse_read_field_blob))
    .with(Id::EspFlashEncryptionEnabled, Args0(efuse::esp_flash_encryption_enabled))
    .with(Id::WdtHalInit, Args4(wdt::wdt_hal_init))
    .with(Id::WdtHalDeinit, Args1(wdt::wdt_hal_deinit))
    .with(Id::EspAesIntrAlloc, Args0(aes::esp_aes_intr_alloc))
    .with(Id::EspAesCryptCbc, Args6(aes::esp_aes_crypt_cbc))
    .with(Id::EspAesCryptCfb128, Args7(aes::esp_aes_crypt_cfb128))
    .with(Id::EspAesCryptCfb8, Args6(aes::esp_aes_crypt_cfb8))
    .with(Id::EspAesCryptCtr, Args7(aes::esp_aes_crypt_ctr))
    .with(Id::EspAesCryptEcb, Args4(aes::esp_aes_crypt_ecb))
    .with(Id::EspAesCryptOfb, Args6(aes::esp_aes_crypt_ofb))
    .with(Id::EspSha, Args4(sha::esp_sha))
    .with(Id::EspShaDma, Args6(sha::esp_sha_dma))
    .with(Id::EspShaReadDigestState, Args2(sha::esp_sha_read_digest_state))
    .with(Id::EspShaWriteDigestState, Args2(sha::esp_sha_write_digest_state))
    .with(Id::EspTeeOtaBegin, Args0(ota::esp_tee_ota_begin))
    .with(Id::EspTeeOtaWrite, Args3(ota::esp_tee_ota_write))
    .with(Id::EspTeeOtaEnd, Args0(ota::esp_tee_ota_end))
    .with(Id::EspTeeSecStorageInit, Args0(sec_storage::esp_tee_sec_storage_init))
    .with(Id::EspTeeSecStorageGenKey, Args2(sec_storage::esp_tee_sec_storage_gen_key))
    .with(
        Id::EspTeeSecStorageGetSignature,
        Args4(sec_storage::esp_tee_sec_storage_get_signature),
    )
    .with(Id::EspTeeSecStorageGetPubkey, Args2(sec_storage::esp_tee_sec_storage_get_pubkey))
    .with(Id::EspTeeSecStorageEncrypt, Args8(sec_storage::esp_tee_sec_storage_encrypt))
    .with(Id::EspTeeSecStorageDecrypt, Args8(sec_storage::esp_tee_sec_storage_decrypt))
    .with(
        Id::EspTeeSecStorageIsSlotEmpty,
        Args1(sec_storage::esp_tee_sec_storage_is_slot_empty),
    )
    .with(Id::EspTeeSecStorageClearSlot, Args1(sec_storage::esp_tee_sec_storage_clear_slot))
    .with(Id::EspTeeAttGenerateToken, Args6(attestation::esp_tee_att_generate_token))
    .with(Id::MmuHalMapRegion, Args6(mmu::mmu_hal_map_region))
    .with(Id::MmuHalUnmapRegion, Args3(mmu::mmu_hal_unmap_region))
    .with(Id::MmuHalVaddrToPaddr, Args4(mmu::mmu_hal_vaddr_to_paddr))
    .with(Id::MmuHalPaddrToVaddr, Args5(mmu::mmu_hal_paddr_to_vaddr))
    .with(Id::DummySecureService, Args0(test_services::dummy_secure_service))
    .with(Id::EspTeeServiceAdd, Args2(test_services::esp_tee_service_add))
    .with(Id::EspTeeServiceSub, Args2(test_services::esp_tee_service_sub))
    .with(Id::EspTeeServiceMul, Args2(test_services::esp_tee_service_mul))
    .with(Id::EspTeeServiceDiv, Args2(test_services::esp_tee_service_div));
