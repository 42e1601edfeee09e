//! Service status codes as seen by the REE.

use tee_app_abi::Word;
use tee_mmu::MmuError;

use crate::boundary::BoundaryViolation;

pub const ESP_OK: i32 = 0;
pub const ESP_FAIL: i32 = -1;
pub const ESP_ERR_NO_MEM: i32 = 0x101;
pub const ESP_ERR_INVALID_ARG: i32 = 0x102;
pub const ESP_ERR_INVALID_STATE: i32 = 0x103;
pub const ESP_ERR_INVALID_SIZE: i32 = 0x104;
pub const ESP_ERR_NOT_FOUND: i32 = 0x105;
pub const ESP_ERR_NOT_SUPPORTED: i32 = 0x106;

/// Failure of a secure service, carried to the REE as an `esp_err_t`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("operation failed")]
    Fail,
    #[error("out of memory")]
    NoMem,
    #[error("invalid argument")]
    InvalidArg,
    #[error("invalid state")]
    InvalidState,
    #[error("invalid size")]
    InvalidSize,
    #[error("not found")]
    NotFound,
    #[error("not supported")]
    NotSupported,
}

impl ServiceError {
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Fail => ESP_FAIL,
            Self::NoMem => ESP_ERR_NO_MEM,
            Self::InvalidArg => ESP_ERR_INVALID_ARG,
            Self::InvalidState => ESP_ERR_INVALID_STATE,
            Self::InvalidSize => ESP_ERR_INVALID_SIZE,
            Self::NotFound => ESP_ERR_NOT_FOUND,
            Self::NotSupported => ESP_ERR_NOT_SUPPORTED,
        }
    }

    /// The error for a non-`ESP_OK` code, `None` for `ESP_OK` and unknown codes.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            ESP_FAIL => Some(Self::Fail),
            ESP_ERR_NO_MEM => Some(Self::NoMem),
            ESP_ERR_INVALID_ARG => Some(Self::InvalidArg),
            ESP_ERR_INVALID_STATE => Some(Self::InvalidState),
            ESP_ERR_INVALID_SIZE => Some(Self::InvalidSize),
            ESP_ERR_NOT_FOUND => Some(Self::NotFound),
            ESP_ERR_NOT_SUPPORTED => Some(Self::NotSupported),
            _ => None,
        }
    }

    #[must_use]
    pub const fn word(self) -> Word {
        i32_word(self.code())
    }
}

impl From<MmuError> for ServiceError {
    fn from(e: MmuError) -> Self {
        match e {
            MmuError::NotMapped(_) => Self::NotFound,
            MmuError::UnsupportedMmuId(_)
            | MmuError::Unaligned(_)
            | MmuError::ZeroLength
            | MmuError::VaddrOutOfWindow { .. }
            | MmuError::PaddrOutOfRange { .. } => Self::InvalidArg,
        }
    }
}

impl From<BoundaryViolation> for ServiceError {
    fn from(_: BoundaryViolation) -> Self {
        Self::Fail
    }
}

/// Sign-extend a C `int` into a return word.
#[must_use]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
pub const fn i32_word(v: i32) -> Word {
    v as isize as Word
}

/// Reinterpret a word as a C `int` (the low 32 bits).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn word_i32(w: Word) -> i32 {
    w as i32
}

/// Status word for a service returning `esp_err_t`.
#[must_use]
pub const fn status_word(result: Result<(), ServiceError>) -> Word {
    match result {
        Ok(()) => i32_word(ESP_OK),
        Err(e) => e.word(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for e in [
            ServiceError::Fail,
            ServiceError::NoMem,
            ServiceError::InvalidArg,
            ServiceError::InvalidState,
            ServiceError::InvalidSize,
            ServiceError::NotFound,
            ServiceError::NotSupported,
        ] {
            assert_eq!(ServiceError::from_code(e.code()), Some(e));
        }
        assert_eq!(ServiceError::from_code(ESP_OK), None);
    }

    #[test]
    fn words_sign_extend() {
        assert_eq!(ServiceError::Fail.word(), Word::MAX);
        assert_eq!(word_i32(ServiceError::Fail.word()), -1);
        assert_eq!(status_word(Ok(())), 0);
        assert_eq!(status_word(Err(ServiceError::InvalidArg)), 0x102);
    }

    #[test]
    fn mmu_errors_map_to_codes() {
        assert_eq!(ServiceError::from(MmuError::NotMapped(0)), ServiceError::NotFound);
        assert_eq!(ServiceError::from(MmuError::ZeroLength), ServiceError::InvalidArg);
    }
}
