//! # Secure Services
//!
//! The service catalogue of the secure partition and the entry point the
//! secure gate jumps to.
//!
//! * [`SECURE_SERVICE_TABLE`] binds every number of the service list to
//!   its implementation in [`services`].
//! * [`esp_tee_service_dispatcher`] turns the trap frame into a
//!   [`RawVaList`] and hands it to [`tee_dispatch::dispatch`].
//! * [`boundary`] and [`fault_assert!`] keep REE-initiated MMU operations
//!   out of the secure partition.
//! * [`ree_mem`] validates every pointer the REE passes in.
//! * [`platform`] holds the hardware drivers the services delegate to,
//!   installed once by [`boot::init`].

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

pub mod abi;
pub mod boot;
pub mod boundary;
pub mod error;
pub mod fault;
pub mod platform;
pub mod ree_mem;
pub mod services;
mod table;

#[cfg(test)]
mod mock;

use tee_app_abi::Word;
use tee_dispatch::{RawVaList, dispatch};

pub use error::ServiceError;
pub use table::SECURE_SERVICE_TABLE;

/// Secure entry for service calls, reached from the machine-mode trap
/// vector with the caller's argument count and saved argument words.
///
/// # Safety
/// `ap` must be null or point to `argc` readable words (at most ten are
/// read).
#[unsafe(no_mangle)]
pub unsafe extern "C-unwind" fn esp_tee_service_dispatcher(argc: Word, ap: *const Word) -> Word {
    // SAFETY: forwarded to the caller.
    let mut args = unsafe { RawVaList::new(ap) };
    dispatch(&SECURE_SERVICE_TABLE, argc, &mut args)
}
