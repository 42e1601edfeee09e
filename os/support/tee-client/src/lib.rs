//! # Secure Gate Client
//!
//! What an REE application links to reach the secure partition.
//!
//! * [`gate`] moves a call across the privilege boundary ([`EcallGate`](gate::EcallGate)
//!   on the chip, any [`SecureGate`](gate::SecureGate) elsewhere).
//! * [`call`] packs the service id and arguments and applies the argument
//!   limit before anything is sent.
//! * [`wrappers`] exposes individual services with Rust signatures.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![cfg_attr(not(feature = "gate"), forbid(unsafe_code))]
#![cfg_attr(feature = "gate", allow(unsafe_code))]

#[cfg(feature = "gate")]
pub mod call;
#[cfg(feature = "gate")]
pub mod gate;
#[cfg(feature = "wrappers")]
pub mod wrappers;

pub use tee_app_abi::{SERVICE_CALL_FAILED, ServiceId, Word};

/// A secure service answered with an `esp_err_t` other than `ESP_OK`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[error("secure service failed with {0:#x}")]
pub struct ServiceFailed(pub i32);

impl ServiceFailed {
    /// Interpret a returned word as `esp_err_t`.
    ///
    /// # Errors
    /// Any value but `ESP_OK`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn check(ret: Word) -> Result<(), Self> {
        match ret as i32 {
            0 => Ok(()),
            code => Err(Self(code)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn esp_ok_is_success() {
        assert_eq!(ServiceFailed::check(0), Ok(()));
        assert_eq!(ServiceFailed::check(0x102), Err(ServiceFailed(0x102)));
        assert_eq!(ServiceFailed::check(SERVICE_CALL_FAILED), Err(ServiceFailed(-1)));
    }
}
