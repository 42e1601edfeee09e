//! # Secure Service Dispatcher
//!
//! Entry logic of the secure world for calls coming through the secure gate.
//! A call arrives as `argc` words behind a `va_list`; the first word is the
//! service id. The dispatcher
//!
//! 1. refuses calls with more than [`MAX_INPUT_ARG`](tee_app_abi::MAX_INPUT_ARG)
//!    words before reading any of them,
//! 2. reads the id and refuses ids outside the [`ServiceTable`],
//! 3. marshals the remaining words into an [`ArgBuffer`] and finalizes the
//!    cursor,
//! 4. transfers the words to the service and returns its result unchanged.
//!
//! Refused calls return [`SERVICE_CALL_FAILED`](tee_app_abi::SERVICE_CALL_FAILED)
//! and leave a line on the secure console; nothing else reaches the caller.
//!
//! The hand-over uses the arity-typed [`ServiceFn::call`], so the compiler
//! places words in `a0`..`a7` and on the stack. With the `asm-trampoline`
//! feature on riscv32 a naked routine does the placement instead.
//!
//! ```rust
//! use tee_app_abi::{SERVICE_CALL_FAILED, Word};
//! use tee_dispatch::{ServiceFn, ServiceTable, WordCursor, dispatch};
//!
//! extern "C-unwind" fn invalid() -> Word { panic!("invalid secure service") }
//! extern "C-unwind" fn add(a: Word, b: Word) -> Word { a + b }
//!
//! static TABLE: ServiceTable =
//!     ServiceTable::new(ServiceFn::Args0(invalid)).with_slot(7, ServiceFn::Args2(add));
//!
//! assert_eq!(dispatch(&TABLE, 3, &mut WordCursor::new(&[7, 8, 9])), 17);
//! assert_eq!(dispatch(&TABLE, 11, &mut WordCursor::new(&[7; 11])), SERVICE_CALL_FAILED);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod dispatch;
mod marshal;
mod service;
mod table;
#[cfg(all(target_arch = "riscv32", feature = "asm-trampoline"))]
mod trampoline;
mod va_list;

pub use dispatch::{CallRequest, DispatchError, dispatch};
pub use marshal::{ArgBuffer, marshal};
pub use service::{Fn0, Fn1, Fn2, Fn3, Fn4, Fn5, Fn6, Fn7, Fn8, Fn9, ServiceFn};
pub use table::ServiceTable;
pub use va_list::{RawVaList, VaList, WordCursor};
