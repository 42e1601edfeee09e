//! # Secure call ABI
//!
//! Everything both sides of the secure gate have to agree on:
//!
//! * the secure service numbers ([`ServiceId`], generated from
//!   `secure_service.tbl`) and the table size [`MAX_SECURE_SERVICES`],
//! * the argument budget of a call ([`MAX_INPUT_ARG`]) and the value returned
//!   when the dispatcher refuses a call ([`SERVICE_CALL_FAILED`]),
//! * the layout of the application configuration header ([`AppConfigHeader`])
//!   that the REE image carries and the TEE loader patches.
//!
//! ## Call convention
//!
//! A call passes `argc` words, the first of which is the service id. `argc`
//! therefore counts the id and may not exceed [`MAX_INPUT_ARG`]:
//!
//! ```text
//! argc = 3 ─┬─ word 0: service id
//!           ├─ word 1: first service argument
//!           └─ word 2: second service argument
//! ```
//!
//! The service's single word return value is handed back unchanged.

#![cfg_attr(not(any(test, doctest)), no_std)]

#[cfg(feature = "loader")]
pub mod loader;
mod service_id;

pub use service_id::{MAX_SECURE_SERVICES, ServiceId};

/// A machine word as passed through the secure gate.
pub type Word = usize;

/// Upper bound for the number of words in a call, including the service id.
pub const MAX_INPUT_ARG: usize = 10;

/// Returned by the dispatcher for an argument overflow or an unknown id (`-1`).
pub const SERVICE_CALL_FAILED: Word = Word::MAX;

/// Magic word at the start of [`AppConfigHeader`].
pub const APP_CFG_MAGIC: u32 = 0x3348_AAED;

/// Major API version. The TEE refuses images built for another major.
pub const API_MAJOR_VERSION: u32 = 1;

/// Minor API version. Images built for a newer minor are refused.
pub const API_MINOR_VERSION: u32 = 0;

/// Service table family a [`ServiceId`] belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Family {
    /// Shadows an SDK function on the REE side (`-Wl,--wrap=<name>`).
    Idf,
    /// Only reachable through the secure gate.
    Custom,
}

impl ServiceId {
    /// The raw identifier passed as the first call word.
    #[inline]
    #[must_use]
    pub const fn as_raw(self) -> usize {
        self as usize
    }

    /// The `argc` of a complete call to this service (id plus arguments).
    #[inline]
    #[must_use]
    pub const fn argc(self) -> usize {
        self.nargs() + 1
    }
}

const _: () = {
    assert!(MAX_SECURE_SERVICES == ServiceId::ALL.len());
    let mut i = 0;
    while i < ServiceId::ALL.len() {
        assert!(ServiceId::ALL[i].argc() <= MAX_INPUT_ARG);
        i += 1;
    }
};

/// Application configuration header.
///
/// Placed in the `.esp_tee_app_cfg` section of the REE image. The REE build
/// fills in the magic, version and its own entry points; the two secure
/// fields stay zero and are patched in by the TEE loader before the REE
/// image first runs.
///
/// All fields are 32-bit little-endian words, the layout is
/// [`AppConfigHeader::SIZE`] bytes long.
#[repr(C)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct AppConfigHeader {
    /// Constant [`APP_CFG_MAGIC`].
    pub magic_word: u32,
    pub api_major_version: u32,
    pub api_minor_version: u32,
    /// Must be zero.
    pub reserved: [u32; 2],

    /// TEE entry for service calls (patched by the loader).
    pub s_entry_addr: u32,
    /// TEE interrupt handler (patched by the loader).
    pub s_int_handler: u32,

    /// REE routine switching from U-mode into the secure gate.
    pub ns_entry_addr: u32,
    /// REE interrupt handler the TEE delegates non-secure interrupts to.
    pub ns_int_handler: u32,
    /// End of the REE IRAM segment.
    pub ns_iram_end: u32,
    /// End of the REE instruction (IROM) mapping.
    pub ns_irom_end: u32,
    /// End of the REE read-only data (DROM) mapping.
    pub ns_drom_end: u32,
}

impl AppConfigHeader {
    /// Size of the serialized header in bytes.
    pub const SIZE: usize = 48;

    /// Header as emitted by the REE build: secure fields blank.
    #[must_use]
    pub const fn new(
        ns_entry_addr: u32,
        ns_int_handler: u32,
        ns_iram_end: u32,
        ns_irom_end: u32,
        ns_drom_end: u32,
    ) -> Self {
        Self {
            magic_word: APP_CFG_MAGIC,
            api_major_version: API_MAJOR_VERSION,
            api_minor_version: API_MINOR_VERSION,
            reserved: [0; 2],
            s_entry_addr: 0,
            s_int_handler: 0,
            ns_entry_addr,
            ns_int_handler,
            ns_iram_end,
            ns_irom_end,
            ns_drom_end,
        }
    }

    /// Whether the loader still has to fill in the secure fields.
    #[must_use]
    pub const fn secure_fields_blank(&self) -> bool {
        self.s_entry_addr == 0 && self.s_int_handler == 0
    }

    /// Little-endian serialization, e.g. for placing the header in an image.
    #[must_use]
    pub fn to_le_bytes(&self) -> [u8; Self::SIZE] {
        let words = [
            self.magic_word,
            self.api_major_version,
            self.api_minor_version,
            self.reserved[0],
            self.reserved[1],
            self.s_entry_addr,
            self.s_int_handler,
            self.ns_entry_addr,
            self.ns_int_handler,
            self.ns_iram_end,
            self.ns_irom_end,
            self.ns_drom_end,
        ];
        let mut out = [0u8; Self::SIZE];
        for (chunk, word) in out.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }
}

const _: () = {
    assert!(size_of::<AppConfigHeader>() == AppConfigHeader::SIZE);
};

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ids_round_trip_through_raw_numbers() {
        for id in ServiceId::ALL {
            assert_eq!(ServiceId::from_raw(id.as_raw()), Some(id));
        }
        assert_eq!(ServiceId::from_raw(MAX_SECURE_SERVICES), None);
    }

    #[test]
    fn slot_zero_is_reserved() {
        assert_eq!(ServiceId::from_raw(0), Some(ServiceId::InvalidSecureService));
        assert_eq!(ServiceId::InvalidSecureService.nargs(), 0);
    }

    #[test]
    fn attestation_call_uses_seven_words() {
        assert_eq!(ServiceId::EspTeeAttGenerateToken.argc(), 7);
        assert_eq!(ServiceId::MmuHalMapRegion.argc(), 7);
        assert_eq!(ServiceId::EspTeeSecStorageEncrypt.argc(), MAX_INPUT_ARG - 1);
    }

    #[test]
    fn sentinel_is_minus_one() {
        assert_eq!(SERVICE_CALL_FAILED as isize, -1);
    }

    #[test]
    fn header_serializes_little_endian_in_field_order() {
        let hdr = AppConfigHeader::new(1, 2, 3, 4, 5);
        let bytes = hdr.to_le_bytes();
        assert_eq!(&bytes[0..4], &APP_CFG_MAGIC.to_le_bytes());
        assert_eq!(&bytes[20..24], &[0; 4]);
        assert_eq!(bytes[28], 1);
        assert_eq!(bytes[32], 2);
        assert_eq!(bytes[44], 5);
        assert!(hdr.secure_fields_blank());
    }
}
