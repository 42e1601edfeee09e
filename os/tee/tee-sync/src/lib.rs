//! # Secure-World Synchronization Primitives
//!
//! The secure partition has almost no shared mutable state: the service table
//! is immutable, and per-call buffers live on the dispatcher's stack. What is
//! left falls into two groups:
//!
//! * **Configuration written once at boot** and read on every trap afterwards
//!   (secure region bounds, the collaborator registry). [`SyncOnceCell`] makes
//!   the single-writer / many-reader rule explicit.
//! * **Hardware models with interior state** (the flash MMU table) that a
//!   service mutates while it runs. [`SpinLock`] serializes them across cores;
//!   [`SpinLock::lock_irq`] additionally masks machine interrupts so a secure
//!   interrupt handler cannot re-enter the critical section.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

pub mod irq;
mod spin_lock;
mod sync_once_cell;

pub use irq::IrqGuard;
pub use spin_lock::{IrqSpinLockGuard, SpinLock, SpinLockGuard};
pub use sync_once_cell::SyncOnceCell;
