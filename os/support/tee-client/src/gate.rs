//! Crossing into the secure partition.

use tee_app_abi::Word;

/// Transfers one call to the secure partition and returns its result.
///
/// `words[0]` is the service id, the rest are its arguments; the length is
/// the `argc` the dispatcher sees.
pub trait SecureGate {
    fn enter(&self, words: &[Word]) -> Word;
}

impl<G: SecureGate + ?Sized> SecureGate for &G {
    fn enter(&self, words: &[Word]) -> Word {
        (**self).enter(words)
    }
}

/// The machine-mode trap: `a0 = argc`, `a1 = &words[0]`, result in `a0`.
#[cfg(target_arch = "riscv32")]
#[derive(Debug, Default, Copy, Clone)]
pub struct EcallGate;

#[cfg(target_arch = "riscv32")]
impl SecureGate for EcallGate {
    #[inline]
    fn enter(&self, words: &[Word]) -> Word {
        let ret: Word;
        // SAFETY: the secure partition reads at most `argc` words behind
        // `a1` and returns to the next instruction.
        unsafe {
            core::arch::asm!(
                "ecall",
                inlateout("a0") words.len() => ret,
                in("a1") words.as_ptr(),
                options(nostack)
            );
        }
        ret
    }
}

/// Masks the interrupts whose handlers live in flash for as long as it is
/// alive. Needed around services that disable the flash cache.
pub trait NonIramInterrupts {
    fn disable(&self);
    fn enable(&self);
}

/// Leaves every interrupt alone.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoInterrupts;

impl NonIramInterrupts for NoInterrupts {
    fn disable(&self) {}
    fn enable(&self) {}
}

pub(crate) struct NonIramGuard<'a, I: NonIramInterrupts + ?Sized>(&'a I);

impl<'a, I: NonIramInterrupts + ?Sized> NonIramGuard<'a, I> {
    pub(crate) fn new(intr: &'a I) -> Self {
        intr.disable();
        Self(intr)
    }
}

impl<I: NonIramInterrupts + ?Sized> Drop for NonIramGuard<'_, I> {
    fn drop(&mut self) {
        self.0.enable();
    }
}
