//! Sources of call words.

use tee_app_abi::Word;

/// A cursor over the words of a variadic call.
///
/// Mirrors the `va_arg`/`va_end` pair: [`VaList::arg`] consumes the next
/// word, [`VaList::end`] finalizes the cursor. A finalized cursor yields no
/// further words.
pub trait VaList {
    /// Next word, or `None` once the source is exhausted or finalized.
    fn arg(&mut self) -> Option<Word>;

    /// Finalize the cursor. Idempotent.
    fn end(&mut self);
}

/// A [`VaList`] over a word slice that records how it was used.
#[derive(Debug, Clone)]
pub struct WordCursor<'a> {
    words: &'a [Word],
    consumed: usize,
    ended: bool,
}

impl<'a> WordCursor<'a> {
    #[must_use]
    pub const fn new(words: &'a [Word]) -> Self {
        Self {
            words,
            consumed: 0,
            ended: false,
        }
    }

    /// Number of words handed out so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.consumed
    }

    #[must_use]
    pub const fn is_ended(&self) -> bool {
        self.ended
    }
}

impl VaList for WordCursor<'_> {
    fn arg(&mut self) -> Option<Word> {
        if self.ended {
            return None;
        }
        let word = *self.words.get(self.consumed)?;
        self.consumed += 1;
        Some(word)
    }

    fn end(&mut self) {
        self.ended = true;
    }
}

/// The caller's `va_list` as handed over through the secure gate.
///
/// On the ILP32 RISC-V ABI a `va_list` is a plain pointer to consecutive
/// word-sized slots, so reading an argument is a load and a pointer bump.
#[derive(Debug)]
pub struct RawVaList {
    next: *const Word,
}

impl RawVaList {
    /// # Safety
    /// `ap` must be null or point to as many readable, aligned words as the
    /// accompanying `argc` announces (at most `MAX_INPUT_ARG` are ever read).
    #[must_use]
    pub const unsafe fn new(ap: *const Word) -> Self {
        Self { next: ap }
    }
}

impl VaList for RawVaList {
    fn arg(&mut self) -> Option<Word> {
        if self.next.is_null() {
            return None;
        }
        // SAFETY: guaranteed by the contract of `RawVaList::new`; the
        // dispatcher never reads more than `argc` words.
        let word = unsafe { self.next.read() };
        self.next = self.next.wrapping_add(1);
        Some(word)
    }

    fn end(&mut self) {
        self.next = core::ptr::null();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cursor_counts_and_stops_at_end() {
        let words = [1, 2, 3];
        let mut c = WordCursor::new(&words);
        assert_eq!(c.arg(), Some(1));
        assert_eq!(c.consumed(), 1);
        c.end();
        assert!(c.is_ended());
        assert_eq!(c.arg(), None);
        assert_eq!(c.consumed(), 1);
    }

    #[test]
    fn cursor_exhausts() {
        let mut c = WordCursor::new(&[9]);
        assert_eq!(c.arg(), Some(9));
        assert_eq!(c.arg(), None);
        assert_eq!(c.consumed(), 1);
    }

    #[test]
    fn raw_list_walks_memory() {
        let words: [Word; 3] = [10, 20, 30];
        let mut ap = unsafe { RawVaList::new(words.as_ptr()) };
        assert_eq!(ap.arg(), Some(10));
        assert_eq!(ap.arg(), Some(20));
        ap.end();
        assert_eq!(ap.arg(), None);
    }
}
