//! Validation of pointers handed in by the REE.
//!
//! A service only ever dereferences REE memory through a [`ReeRegion`],
//! which is non-null, aligned, does not wrap the address space and stays
//! clear of secure SRAM and of the installed secure flash window
//! ([`boundary::secure_region`]). Regions a service
//! writes through must also be pairwise disjoint ([`ensure_disjoint`]) so
//! that no two live references alias.

use core::ffi::CStr;
use core::mem::{align_of, size_of};
use core::ptr;

use tee_app_abi::Word;
use tee_info::{TEE_SRAM_END, TEE_SRAM_START};

use crate::boundary;
use crate::error::ServiceError;

/// Whether `[addr, end)` reaches secure SRAM or the secure flash window.
fn reaches_secure(addr: Word, end: Word) -> bool {
    let flash = boundary::secure_region().vaddr;
    [
        (TEE_SRAM_START as Word, TEE_SRAM_END as Word),
        (flash.start().as_u32() as Word, flash.end().as_u32() as Word),
    ]
    .iter()
    .any(|&(lo, hi)| addr < hi && lo < end)
}

/// A validated span of REE memory.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ReeRegion {
    addr: Word,
    len: usize,
}

impl ReeRegion {
    /// Validate `len` bytes at `addr`, aligned to `align`.
    ///
    /// A zero-length region is valid at any address, including null.
    ///
    /// # Errors
    /// [`ServiceError::InvalidArg`] for null, misaligned, wrapping or
    /// secure-overlapping spans.
    pub fn new(addr: Word, len: usize, align: usize) -> Result<Self, ServiceError> {
        if len == 0 {
            return Ok(Self { addr, len });
        }
        if addr == 0 || !addr.is_multiple_of(align) {
            return Err(ServiceError::InvalidArg);
        }
        let end = addr.checked_add(len).ok_or(ServiceError::InvalidArg)?;
        if reaches_secure(addr, end) {
            return Err(ServiceError::InvalidArg);
        }
        Ok(Self { addr, len })
    }

    /// Validate a region holding one `T`.
    ///
    /// # Errors
    /// See [`ReeRegion::new`].
    pub fn of<T>(addr: Word) -> Result<Self, ServiceError> {
        Self::new(addr, size_of::<T>(), align_of::<T>())
    }

    /// Validate a byte buffer.
    ///
    /// # Errors
    /// See [`ReeRegion::new`].
    pub fn bytes(addr: Word, len: usize) -> Result<Self, ServiceError> {
        Self::new(addr, len, 1)
    }

    #[must_use]
    pub const fn addr(&self) -> Word {
        self.addr
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.addr < other.addr + other.len
            && other.addr < self.addr + self.len
    }

    /// # Safety
    /// The region must be live REE memory that nothing mutates for `'a`.
    #[must_use]
    pub unsafe fn as_slice<'a>(&self) -> &'a [u8] {
        if self.len == 0 {
            return &[];
        }
        // SAFETY: non-null and in bounds per `new`; liveness per caller.
        unsafe { core::slice::from_raw_parts(self.addr as *const u8, self.len) }
    }

    /// # Safety
    /// The region must be live REE memory with no other reference to it
    /// for `'a`.
    #[must_use]
    pub unsafe fn as_mut_slice<'a>(&self) -> &'a mut [u8] {
        if self.len == 0 {
            return &mut [];
        }
        // SAFETY: as above, exclusivity per caller.
        unsafe { core::slice::from_raw_parts_mut(self.addr as *mut u8, self.len) }
    }

    /// # Safety
    /// The region must have been created with [`ReeRegion::of::<T>`], hold
    /// a valid `T` and not be mutated for `'a`.
    #[must_use]
    pub unsafe fn as_ref<'a, T>(&self) -> &'a T {
        debug_assert_eq!(self.len, size_of::<T>());
        // SAFETY: aligned and sized per `of::<T>`.
        unsafe { &*(self.addr as *const T) }
    }

    /// # Safety
    /// The region must have been created with [`ReeRegion::of::<T>`], hold
    /// a valid `T` and have no other reference to it for `'a`.
    #[must_use]
    pub unsafe fn as_mut<'a, T>(&self) -> &'a mut T {
        debug_assert_eq!(self.len, size_of::<T>());
        // SAFETY: aligned and sized per `of::<T>`.
        unsafe { &mut *(self.addr as *mut T) }
    }

    /// Store `value` without forming a reference.
    ///
    /// # Safety
    /// The region must have been created with [`ReeRegion::of::<T>`].
    pub unsafe fn write<T>(&self, value: T) {
        debug_assert_eq!(self.len, size_of::<T>());
        // SAFETY: aligned and sized per `of::<T>`.
        unsafe { ptr::write_volatile(self.addr as *mut T, value) }
    }

    /// Copy this region's bytes to the start of `dst`, tolerating overlap.
    ///
    /// # Errors
    /// [`ServiceError::InvalidSize`] if `dst` is shorter.
    ///
    /// # Safety
    /// Both regions must be live REE memory not referenced elsewhere
    /// during the copy.
    pub unsafe fn copy_to(&self, dst: &Self) -> Result<(), ServiceError> {
        if dst.len < self.len {
            return Err(ServiceError::InvalidSize);
        }
        if self.len != 0 {
            // SAFETY: both spans validated, `ptr::copy` is overlap safe.
            unsafe { ptr::copy(self.addr as *const u8, dst.addr as *mut u8, self.len) }
        }
        Ok(())
    }
}

/// Fail unless no two of `regions` overlap.
///
/// # Errors
/// [`ServiceError::InvalidArg`] on the first overlapping pair.
pub fn ensure_disjoint(regions: &[&ReeRegion]) -> Result<(), ServiceError> {
    for (i, a) in regions.iter().enumerate() {
        if regions[i + 1..].iter().any(|b| a.overlaps(b)) {
            return Err(ServiceError::InvalidArg);
        }
    }
    Ok(())
}

/// Borrow a NUL-terminated string of at most `max_len` bytes (terminator
/// included).
///
/// # Errors
/// [`ServiceError::InvalidArg`] for invalid pointers or a missing
/// terminator.
///
/// # Safety
/// `addr` must point to live REE memory that is not mutated for `'a`.
pub unsafe fn ree_cstr<'a>(addr: Word, max_len: usize) -> Result<(&'a CStr, ReeRegion), ServiceError> {
    if addr == 0 {
        return Err(ServiceError::InvalidArg);
    }
    let mut len = 0;
    loop {
        if len == max_len {
            return Err(ServiceError::InvalidArg);
        }
        let next = ReeRegion::bytes(addr + len, 1)?;
        // SAFETY: one validated byte.
        let byte = unsafe { ptr::read_volatile(next.addr() as *const u8) };
        len += 1;
        if byte == 0 {
            break;
        }
    }
    let region = ReeRegion::bytes(addr, len)?;
    // SAFETY: validated span, nul-terminated at `len - 1`.
    let bytes = unsafe { region.as_slice() };
    let s = CStr::from_bytes_with_nul(bytes).map_err(|_| ServiceError::InvalidArg)?;
    Ok((s, region))
}
