//! Arity-typed service handles.
//!
//! Every secure service is an `extern "C-unwind"` function taking between
//! zero and nine machine words. [`ServiceFn`] remembers the arity so the
//! dispatcher can call it with exactly that many words and leave the
//! register/stack placement to the compiler's own call lowering: the first
//! eight words travel in `a0`..`a7`, the ninth in the caller's outgoing
//! argument area right above the stack pointer.

use core::fmt;

use tee_app_abi::{MAX_INPUT_ARG, Word};

use crate::ArgBuffer;

pub type Fn0 = extern "C-unwind" fn() -> Word;
pub type Fn1 = extern "C-unwind" fn(Word) -> Word;
pub type Fn2 = extern "C-unwind" fn(Word, Word) -> Word;
pub type Fn3 = extern "C-unwind" fn(Word, Word, Word) -> Word;
pub type Fn4 = extern "C-unwind" fn(Word, Word, Word, Word) -> Word;
pub type Fn5 = extern "C-unwind" fn(Word, Word, Word, Word, Word) -> Word;
pub type Fn6 = extern "C-unwind" fn(Word, Word, Word, Word, Word, Word) -> Word;
pub type Fn7 = extern "C-unwind" fn(Word, Word, Word, Word, Word, Word, Word) -> Word;
pub type Fn8 = extern "C-unwind" fn(Word, Word, Word, Word, Word, Word, Word, Word) -> Word;
pub type Fn9 = extern "C-unwind" fn(Word, Word, Word, Word, Word, Word, Word, Word, Word) -> Word;

/// A secure service entry point.
#[derive(Clone, Copy)]
pub enum ServiceFn {
    Args0(Fn0),
    Args1(Fn1),
    Args2(Fn2),
    Args3(Fn3),
    Args4(Fn4),
    Args5(Fn5),
    Args6(Fn6),
    Args7(Fn7),
    Args8(Fn8),
    Args9(Fn9),
}

const _: () = assert!(MAX_INPUT_ARG == 10, "one id word plus up to nine service words");

impl ServiceFn {
    /// Number of words the service takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Args0(_) => 0,
            Self::Args1(_) => 1,
            Self::Args2(_) => 2,
            Self::Args3(_) => 3,
            Self::Args4(_) => 4,
            Self::Args5(_) => 5,
            Self::Args6(_) => 6,
            Self::Args7(_) => 7,
            Self::Args8(_) => 8,
            Self::Args9(_) => 9,
        }
    }

    /// Address of the entry point.
    #[must_use]
    pub fn addr(self) -> usize {
        match self {
            Self::Args0(f) => f as usize,
            Self::Args1(f) => f as usize,
            Self::Args2(f) => f as usize,
            Self::Args3(f) => f as usize,
            Self::Args4(f) => f as usize,
            Self::Args5(f) => f as usize,
            Self::Args6(f) => f as usize,
            Self::Args7(f) => f as usize,
            Self::Args8(f) => f as usize,
            Self::Args9(f) => f as usize,
        }
    }

    /// Call the service with the leading [`ServiceFn::arity`] words of `args`.
    ///
    /// Missing words are passed as zero, surplus words are not passed.
    pub fn call(self, args: &ArgBuffer) -> Word {
        let a = args.slots();
        match self {
            Self::Args0(f) => f(),
            Self::Args1(f) => f(a[0]),
            Self::Args2(f) => f(a[0], a[1]),
            Self::Args3(f) => f(a[0], a[1], a[2]),
            Self::Args4(f) => f(a[0], a[1], a[2], a[3]),
            Self::Args5(f) => f(a[0], a[1], a[2], a[3], a[4]),
            Self::Args6(f) => f(a[0], a[1], a[2], a[3], a[4], a[5]),
            Self::Args7(f) => f(a[0], a[1], a[2], a[3], a[4], a[5], a[6]),
            Self::Args8(f) => f(a[0], a[1], a[2], a[3], a[4], a[5], a[6], a[7]),
            Self::Args9(f) => f(a[0], a[1], a[2], a[3], a[4], a[5], a[6], a[7], a[8]),
        }
    }
}

impl fmt::Debug for ServiceFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceFn<{}>({:#x})", self.arity(), self.addr())
    }
}
