//! Hardware collaborators behind the secure services.
//!
//! The services validate and translate REE arguments, then hand the typed
//! request to one of the traits below. Boot code installs the concrete
//! drivers once with [`install`]; a service called before that answers
//! [`ServiceError::InvalidState`].

use core::ffi::CStr;

use tee_mmu::MmuHal;
use tee_sync::SyncOnceCell;

use crate::abi::{
    AES_BLOCK_BYTES, AesContext, AesMode, EfuseField, IntrType, KeyType, SecStoragePubkey,
    SecStorageSign, ShaType, WdtHalContext, WdtInst,
};
use crate::error::ServiceError;

/// Interrupt matrix and CPU interrupt controller.
pub trait InterruptController: Sync {
    fn route_intr_matrix(&self, cpu_no: i32, model_num: u32, intr_num: u32);
    fn intr_enable(&self, intr_mask: u32);
    fn intr_disable(&self, intr_mask: u32);
    fn set_priority(&self, rv_int_num: i32, priority: u32);
    fn set_type(&self, intr_num: i32, ty: IntrType);
    fn set_threshold(&self, priority_threshold: i32);
    fn edge_ack(&self, intr_num: u32);
    fn global_enable(&self);
}

/// eFuse controller.
pub trait Efuse: Sync {
    fn chip_revision(&self) -> u32;
    fn chip_ver_pkg(&self) -> u32;
    fn disable_wafer_version_major(&self) -> bool;
    fn mac(&self) -> [u8; 6];
    fn check_secure_version(&self, secure_version: u32) -> bool;

    /// Read the bits described by `field` into `dst`.
    ///
    /// # Errors
    /// Driver specific.
    fn read_field_blob(
        &self,
        field: EfuseField<'_>,
        dst: &mut [u8],
        dst_size_bits: usize,
    ) -> Result<(), ServiceError>;

    /// Raw value of the `SPI_BOOT_CRYPT_CNT` field.
    fn flash_crypt_cnt(&self) -> u32;
}

/// Timer-group and RTC watchdogs.
pub trait Watchdog: Sync {
    fn init(&self, hal: &mut WdtHalContext, inst: WdtInst, prescaler: u32, enable_intr: bool);
    fn deinit(&self, hal: &mut WdtHalContext);
}

/// AES accelerator.
///
/// Every mode works in place: the service has already copied the input
/// into the output buffer. Return values are the accelerator driver's
/// status codes and reach the REE unchanged.
pub trait AesEngine: Sync {
    fn intr_alloc(&self);
    fn crypt_cbc(
        &self,
        ctx: &mut AesContext,
        mode: AesMode,
        iv: &mut [u8; AES_BLOCK_BYTES],
        data: &mut [u8],
    ) -> i32;
    fn crypt_cfb128(
        &self,
        ctx: &mut AesContext,
        mode: AesMode,
        iv_off: &mut usize,
        iv: &mut [u8; AES_BLOCK_BYTES],
        data: &mut [u8],
    ) -> i32;
    fn crypt_cfb8(
        &self,
        ctx: &mut AesContext,
        mode: AesMode,
        iv: &mut [u8; AES_BLOCK_BYTES],
        data: &mut [u8],
    ) -> i32;
    fn crypt_ctr(
        &self,
        ctx: &mut AesContext,
        nc_off: &mut usize,
        nonce_counter: &mut [u8; AES_BLOCK_BYTES],
        stream_block: &mut [u8; AES_BLOCK_BYTES],
        data: &mut [u8],
    ) -> i32;
    fn crypt_ecb(&self, ctx: &mut AesContext, mode: AesMode, block: &mut [u8; AES_BLOCK_BYTES]) -> i32;
    fn crypt_ofb(
        &self,
        ctx: &mut AesContext,
        iv_off: &mut usize,
        iv: &mut [u8; AES_BLOCK_BYTES],
        data: &mut [u8],
    ) -> i32;
}

/// SHA accelerator.
pub trait ShaEngine: Sync {
    /// One-shot digest; `output` is [`ShaType::digest_len`] bytes.
    fn sha(&self, ty: ShaType, input: &[u8], output: &mut [u8]);
    fn sha_dma(&self, ty: ShaType, input: &[u8], buf: &[u8], is_first_block: bool) -> i32;
    /// `state` is [`ShaType::state_len`] bytes.
    fn read_digest(&self, ty: ShaType, state: &mut [u8]);
    fn write_digest(&self, ty: ShaType, state: &[u8]);
}

/// Update of the passive secure-partition slot.
pub trait OtaUpdater: Sync {
    /// # Errors
    /// Driver specific.
    fn begin(&self) -> Result<(), ServiceError>;
    /// # Errors
    /// Driver specific.
    fn write(&self, rel_offset: u32, data: &[u8]) -> Result<(), ServiceError>;
    /// # Errors
    /// Driver specific.
    fn end(&self) -> Result<(), ServiceError>;
}

/// Key slots in the secure storage partition.
#[allow(clippy::missing_errors_doc)]
pub trait SecureStorage: Sync {
    fn init(&self) -> Result<(), ServiceError>;
    fn gen_key(&self, slot_id: u16, key_type: KeyType) -> Result<(), ServiceError>;
    fn sign(&self, slot_id: u16, hash: &[u8]) -> Result<SecStorageSign, ServiceError>;
    fn pubkey(&self, slot_id: u16) -> Result<SecStoragePubkey, ServiceError>;
    /// Encrypt `data` in place, writing the tag.
    fn encrypt(&self, slot_id: u16, data: &mut [u8], aad: &[u8], tag: &mut [u8]) -> Result<(), ServiceError>;
    /// Decrypt `data` in place after checking the tag.
    fn decrypt(&self, slot_id: u16, data: &mut [u8], aad: &[u8], tag: &[u8]) -> Result<(), ServiceError>;
    fn is_slot_empty(&self, slot_id: u16) -> bool;
    fn clear_slot(&self, slot_id: u16) -> Result<(), ServiceError>;
}

/// Entity attestation token generator.
pub trait Attestation: Sync {
    /// Write a token into `token_buf`, returning its length.
    ///
    /// # Errors
    /// Driver specific, typically [`ServiceError::InvalidSize`] when the
    /// buffer is too small.
    fn generate_token(
        &self,
        nonce: u32,
        client_id: u32,
        psa_cert_ref: &CStr,
        token_buf: &mut [u8],
    ) -> Result<usize, ServiceError>;
}

/// The installed collaborators.
#[derive(Copy, Clone)]
pub struct Platform {
    pub interrupts: &'static dyn InterruptController,
    pub efuse: &'static dyn Efuse,
    pub watchdog: &'static dyn Watchdog,
    pub aes: &'static dyn AesEngine,
    pub sha: &'static dyn ShaEngine,
    pub ota: &'static dyn OtaUpdater,
    pub storage: &'static dyn SecureStorage,
    pub attestation: &'static dyn Attestation,
    pub mmu: &'static dyn MmuHal,
}

static PLATFORM: SyncOnceCell<Platform> = SyncOnceCell::new();

/// Install the collaborators. Only the first call takes effect.
///
/// # Errors
/// Returns `platform` back if one is already installed.
pub fn install(platform: Platform) -> Result<&'static Platform, Platform> {
    PLATFORM.set(platform)
}

/// The installed collaborators.
///
/// # Errors
/// [`ServiceError::InvalidState`] before [`install`].
pub fn platform() -> Result<&'static Platform, ServiceError> {
    PLATFORM.get().ok_or(ServiceError::InvalidState)
}
