//! The secure service catalogue.
//!
//! Every service has the calling convention the dispatcher expects: up to
//! nine word arguments, one word result. Arguments are narrowed to the C
//! parameter types they stand for, pointers are validated through
//! [`ReeRegion`](crate::ree_mem::ReeRegion), and the typed request goes to
//! the installed [`Platform`].

#![allow(clippy::must_use_candidate)]

pub mod aes;
pub mod attestation;
pub mod efuse;
pub mod interrupts;
pub mod invalid;
pub mod mmu;
pub mod ota;
pub mod sec_storage;
pub mod sha;
pub mod test_services;
pub mod wdt;

use tee_app_abi::Word;

use crate::error::{ServiceError, i32_word, status_word, word_i32 as arg_i32};
use crate::platform::{Platform, platform};

/// `esp_err_t` result.
fn status(f: impl FnOnce(&'static Platform) -> Result<(), ServiceError>) -> Word {
    status_word(platform().and_then(f))
}

/// Plain value result, zero without a platform.
fn value(f: impl FnOnce(&'static Platform) -> Word) -> Word {
    platform().map_or(0, f)
}

/// `bool` result, `false` on any error.
fn flag(f: impl FnOnce(&'static Platform) -> Result<bool, ServiceError>) -> Word {
    Word::from(platform().and_then(f).unwrap_or(false))
}

/// Driver status code, or the `esp_err_t` of a rejected argument.
fn driver_code(f: impl FnOnce(&'static Platform) -> Result<i32, ServiceError>) -> Word {
    match platform().and_then(f) {
        Ok(code) => i32_word(code),
        Err(e) => e.word(),
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn arg_u32(w: Word) -> u32 {
    w as u32
}

#[allow(clippy::cast_possible_truncation)]
const fn arg_u16(w: Word) -> u16 {
    w as u16
}

#[allow(clippy::cast_possible_truncation)]
const fn arg_u8(w: Word) -> u8 {
    w as u8
}

const fn arg_bool(w: Word) -> bool {
    w != 0
}
