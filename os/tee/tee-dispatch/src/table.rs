//! The ID-indexed service table.

use tee_app_abi::{MAX_SECURE_SERVICES, ServiceId};

use crate::ServiceFn;

/// Fixed table of [`MAX_SECURE_SERVICES`] service slots.
///
/// Slot 0 always holds the invalid-service handler, and so does every
/// lookup that misses: an unassigned slot or an out-of-range id never
/// resolves to anything else. Tables are built in `const` context and
/// placed in read-only memory:
///
/// ```rust
/// # use tee_app_abi::{ServiceId, Word};
/// # use tee_dispatch::{ServiceFn, ServiceTable};
/// extern "C-unwind" fn invalid() -> Word { panic!("invalid secure service") }
/// extern "C-unwind" fn add(a: Word, b: Word) -> Word { a.wrapping_add(b) }
///
/// static TABLE: ServiceTable = ServiceTable::new(ServiceFn::Args0(invalid))
///     .with(ServiceId::EspTeeServiceAdd, ServiceFn::Args2(add));
///
/// assert_eq!(TABLE.lookup(ServiceId::EspTeeServiceAdd.as_raw()).arity(), 2);
/// assert!(TABLE.resolve(ServiceId::EspTeeServiceSub.as_raw()).is_none());
/// ```
#[derive(Debug)]
pub struct ServiceTable {
    slots: [Option<ServiceFn>; MAX_SECURE_SERVICES],
    invalid: ServiceFn,
}

impl ServiceTable {
    /// Empty table with `invalid` in slot 0.
    #[must_use]
    pub const fn new(invalid: ServiceFn) -> Self {
        let mut slots = [None; MAX_SECURE_SERVICES];
        slots[0] = Some(invalid);
        Self { slots, invalid }
    }

    /// Assign `f` to the slot of `id`.
    ///
    /// # Panics
    /// At compile time when used in a `const`/`static` initializer, if the
    /// arity of `f` disagrees with the service table, or see
    /// [`ServiceTable::with_slot`].
    #[must_use]
    pub const fn with(self, id: ServiceId, f: ServiceFn) -> Self {
        assert!(f.arity() == id.nargs(), "service arity differs from the table");
        self.with_slot(id.as_raw(), f)
    }

    /// Assign `f` to slot `nr`.
    ///
    /// # Panics
    /// If `nr` is 0, out of range or already assigned.
    #[must_use]
    pub const fn with_slot(mut self, nr: usize, f: ServiceFn) -> Self {
        assert!(nr != 0, "slot 0 is reserved for the invalid service");
        assert!(nr < MAX_SECURE_SERVICES, "service number out of range");
        assert!(self.slots[nr].is_none(), "service slot assigned twice");
        self.slots[nr] = Some(f);
        self
    }

    /// The service in slot `sid`, if one is assigned. Slot 0 resolves to
    /// the invalid-service handler.
    #[must_use]
    pub fn resolve(&self, sid: usize) -> Option<ServiceFn> {
        self.slots.get(sid).copied().flatten()
    }

    /// The service in slot `sid`, or the invalid-service handler.
    #[must_use]
    pub fn lookup(&self, sid: usize) -> ServiceFn {
        self.resolve(sid).unwrap_or(self.invalid)
    }

    /// The invalid-service handler.
    #[must_use]
    pub const fn invalid(&self) -> ServiceFn {
        self.invalid
    }

    /// Number of assigned slots, slot 0 included.
    #[must_use]
    pub fn assigned(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ArgBuffer;
    use tee_app_abi::Word;

    extern "C-unwind" fn invalid() -> Word {
        0xDEAD
    }

    extern "C-unwind" fn one() -> Word {
        1
    }

    static TABLE: ServiceTable = ServiceTable::new(ServiceFn::Args0(invalid))
        .with(ServiceId::DummySecureService, ServiceFn::Args0(one));

    #[test]
    fn misses_resolve_to_invalid() {
        let none = ArgBuffer::new();
        assert_eq!(TABLE.lookup(0).call(&none), 0xDEAD);
        assert_eq!(TABLE.lookup(1).call(&none), 0xDEAD);
        assert_eq!(TABLE.lookup(MAX_SECURE_SERVICES).call(&none), 0xDEAD);
        assert_eq!(TABLE.lookup(usize::MAX).call(&none), 0xDEAD);
        assert_eq!(
            TABLE
                .lookup(ServiceId::DummySecureService.as_raw())
                .call(&none),
            1
        );
    }

    #[test]
    fn resolve_distinguishes_unassigned() {
        assert!(TABLE.resolve(0).is_some());
        assert!(TABLE.resolve(1).is_none());
        assert!(TABLE.resolve(MAX_SECURE_SERVICES).is_none());
        assert_eq!(TABLE.assigned(), 2);
    }

    #[test]
    #[should_panic(expected = "slot 0 is reserved")]
    fn slot_zero_cannot_be_replaced() {
        let _ = ServiceTable::new(ServiceFn::Args0(invalid)).with_slot(0, ServiceFn::Args0(one));
    }

    #[test]
    #[should_panic(expected = "assigned twice")]
    fn duplicate_slots_are_refused() {
        let _ = ServiceTable::new(ServiceFn::Args0(invalid))
            .with_slot(3, ServiceFn::Args0(one))
            .with_slot(3, ServiceFn::Args0(one));
    }

    #[test]
    #[should_panic(expected = "arity differs")]
    fn arity_must_match_the_table() {
        let _ = ServiceTable::new(ServiceFn::Args0(invalid))
            .with(ServiceId::EspTeeServiceAdd, ServiceFn::Args0(one));
    }
}
