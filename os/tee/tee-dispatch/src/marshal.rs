//! Argument marshaling into a fixed, position-addressable buffer.

use core::fmt;

use tee_app_abi::{MAX_INPUT_ARG, Word};

use crate::{DispatchError, VaList};

/// Up to [`MAX_INPUT_ARG`] call words in call order.
///
/// Lives on the stack; unused slots stay zero so a callee reading past the
/// marshaled count sees zeros, never stale data.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ArgBuffer {
    words: [Word; MAX_INPUT_ARG],
    len: usize,
}

impl ArgBuffer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: [0; MAX_INPUT_ARG],
            len: 0,
        }
    }

    /// Buffer holding `words`, or `None` if there are too many.
    #[must_use]
    pub fn from_slice(words: &[Word]) -> Option<Self> {
        let mut buf = Self::new();
        buf.words.get_mut(..words.len())?.copy_from_slice(words);
        buf.len = words.len();
        Some(buf)
    }

    /// The marshaled words.
    #[must_use]
    pub fn as_slice(&self) -> &[Word] {
        &self.words[..self.len]
    }

    /// All slots, including the zeroed ones past [`ArgBuffer::len`].
    #[must_use]
    pub const fn slots(&self) -> &[Word; MAX_INPUT_ARG] {
        &self.words
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for ArgBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ArgBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Pull exactly `count` words from `ap`, preserving order.
///
/// Does not finalize `ap`.
///
/// # Errors
/// [`DispatchError::TooManyArgs`] if `count` exceeds the buffer, without
/// reading anything; [`DispatchError::Truncated`] if `ap` runs dry early.
pub fn marshal<V: VaList + ?Sized>(ap: &mut V, count: usize) -> Result<ArgBuffer, DispatchError> {
    if count > MAX_INPUT_ARG {
        return Err(DispatchError::TooManyArgs { received: count });
    }

    let mut buf = ArgBuffer::new();
    for slot in &mut buf.words[..count] {
        *slot = ap.arg().ok_or(DispatchError::Truncated {
            expected: count,
            got: buf.len,
        })?;
        buf.len += 1;
    }
    Ok(buf)
}
