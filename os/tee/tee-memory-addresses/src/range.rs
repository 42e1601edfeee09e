use core::fmt;

use crate::{PhysicalAddress, VirtualAddress};

/// Half-open address range `[start, end)`.
///
/// Used for memory the secure partition owns exclusively; containment and
/// overlap tests are plain comparisons so they stay cheap on the trap path.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct AddressRange<A> {
    start: A,
    end: A,
}

impl<A: Copy + Ord> AddressRange<A> {
    /// Build `[start, end)`. An inverted pair yields an empty range.
    #[inline]
    #[must_use]
    pub fn new(start: A, end: A) -> Self {
        if end < start {
            Self { start, end: start }
        } else {
            Self { start, end }
        }
    }

    #[inline]
    #[must_use]
    pub const fn start(&self) -> A {
        self.start
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> A {
        self.end
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// `start <= addr < end`.
    #[inline]
    #[must_use]
    pub fn contains(&self, addr: A) -> bool {
        self.start <= addr && addr < self.end
    }

    /// Whether the two half-open ranges share at least one address.
    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely inside `self`.
    #[inline]
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        other.is_empty() || (self.start <= other.start && other.end <= self.end)
    }
}

impl AddressRange<VirtualAddress> {
    /// `[start, start + len)`, saturating at the top of the address space.
    #[inline]
    #[must_use]
    pub fn from_start_len(start: VirtualAddress, len: u32) -> Self {
        let end = start
            .checked_add(len)
            .unwrap_or(VirtualAddress::new(u32::MAX));
        Self::new(start, end)
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end.as_u32() - self.start.as_u32()
    }
}

impl AddressRange<PhysicalAddress> {
    /// `[start, start + len)`, saturating at the top of the address space.
    #[inline]
    #[must_use]
    pub fn from_start_len(start: PhysicalAddress, len: u32) -> Self {
        let end = start
            .checked_add(len)
            .unwrap_or(PhysicalAddress::new(u32::MAX));
        Self::new(start, end)
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end.as_u32() - self.start.as_u32()
    }
}

impl<A: fmt::Display> fmt::Debug for AddressRange<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
