//! C-layout types that cross the service boundary by pointer or by value.

/// `esp_aes_context`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct AesContext {
    pub key_bytes: u8,
    pub key_in_hardware: u8,
    pub key: [u8; 32],
}

impl AesContext {
    /// The key material in use.
    #[must_use]
    pub fn key(&self) -> &[u8] {
        &self.key[..usize::from(self.key_bytes).min(self.key.len())]
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AesMode {
    Decrypt = 0,
    Encrypt = 1,
}

impl AesMode {
    #[must_use]
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Decrypt),
            1 => Some(Self::Encrypt),
            _ => None,
        }
    }
}

/// Block and IV size of AES.
pub const AES_BLOCK_BYTES: usize = 16;

/// `esp_sha_type`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaType {
    Sha1 = 0,
    Sha224 = 1,
    Sha256 = 2,
}

impl ShaType {
    #[must_use]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Sha1),
            1 => Some(Self::Sha224),
            2 => Some(Self::Sha256),
            _ => None,
        }
    }

    #[must_use]
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha224 => 28,
            Self::Sha256 => 32,
        }
    }

    /// Size of the engine's intermediate state for this algorithm.
    #[must_use]
    pub const fn state_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha224 | Self::Sha256 => 32,
        }
    }
}

/// `wdt_hal_context_t`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct WdtHalContext {
    pub inst: u32,
    pub dev: usize,
}

/// `wdt_inst_t`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WdtInst {
    Mwdt0 = 0,
    Mwdt1 = 1,
    Rwdt = 2,
}

impl WdtInst {
    #[must_use]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Mwdt0),
            1 => Some(Self::Mwdt1),
            2 => Some(Self::Rwdt),
            _ => None,
        }
    }
}

/// `esp_efuse_desc_t`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct EfuseDesc {
    pub efuse_block: u8,
    pub bit_start: u8,
    pub bit_count: u16,
}

/// First eFuse block holding key material. The REE may not read it or
/// anything above.
pub const EFUSE_BLK_KEY0: u8 = 4;

/// Longest descriptor list accepted by `esp_efuse_read_field_blob`.
pub const MAX_EFUSE_FIELD_DESCS: usize = 16;

/// `esp_efuse_read_field_blob` descriptor list with its terminator dropped.
pub type EfuseField<'a> = &'a [&'a EfuseDesc];

/// `interrupt_type`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IntrType {
    Level = 0,
    Edge = 1,
}

impl IntrType {
    #[must_use]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Level),
            1 => Some(Self::Edge),
            _ => None,
        }
    }
}

/// `esp_tee_sec_storage_type_t`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyType {
    EcdsaSecp256r1 = 0,
    Aes256 = 1,
}

impl KeyType {
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::EcdsaSecp256r1),
            1 => Some(Self::Aes256),
            _ => None,
        }
    }
}

/// `esp_tee_sec_storage_sign_t`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SecStorageSign {
    pub sign_r: [u8; 32],
    pub sign_s: [u8; 32],
}

/// `esp_tee_sec_storage_pubkey_t`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SecStoragePubkey {
    pub pub_x: [u8; 32],
    pub pub_y: [u8; 32],
}

/// Longest PSA certificate reference accepted by the attestation service,
/// terminator included.
pub const MAX_PSA_CERT_REF_LEN: usize = 64;

const _: () = assert!(size_of::<AesContext>() == 34);
const _: () = assert!(size_of::<EfuseDesc>() == 4);
const _: () = assert!(size_of::<SecStorageSign>() == 64);
