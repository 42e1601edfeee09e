//! Machine-mode interrupt masking.
//!
//! On RISC-V the global machine interrupt enable is `mstatus.MIE` (bit 3).
//! [`IrqGuard`] clears it for the lifetime of the guard and restores the
//! previous value on drop. On any other architecture (host builds and tests)
//! the guard only tracks a software flag so the nesting behavior stays
//! observable.

/// `mstatus.MIE`: machine interrupt enable.
pub const MSTATUS_MIE: usize = 1 << 3;

#[cfg(target_arch = "riscv32")]
mod arch {
    use super::MSTATUS_MIE;

    /// Clears `mstatus.MIE` and returns the previous `mstatus` value.
    #[inline]
    pub fn disable() -> usize {
        let prev: usize;
        unsafe {
            core::arch::asm!(
                "csrrc {0}, mstatus, {1}",
                out(reg) prev,
                in(reg) MSTATUS_MIE,
                options(nostack, preserves_flags)
            );
        }
        prev
    }

    #[inline]
    pub fn enable() {
        unsafe {
            core::arch::asm!(
                "csrs mstatus, {0}",
                in(reg) MSTATUS_MIE,
                options(nostack, preserves_flags)
            );
        }
    }
}

#[cfg(not(target_arch = "riscv32"))]
mod arch {
    use super::MSTATUS_MIE;
    use core::sync::atomic::{AtomicUsize, Ordering};

    /// Software stand-in for `mstatus` on hosts; starts with interrupts enabled.
    static MSTATUS: AtomicUsize = AtomicUsize::new(MSTATUS_MIE);

    #[inline]
    pub fn disable() -> usize {
        MSTATUS.fetch_and(!MSTATUS_MIE, Ordering::SeqCst)
    }

    #[inline]
    pub fn enable() {
        MSTATUS.fetch_or(MSTATUS_MIE, Ordering::SeqCst);
    }
}

/// RAII guard that disables machine interrupts on creation and restores them on drop.
///
/// Interrupts are re-enabled **only** if they were enabled when the guard was
/// created, so guards nest correctly.
///
/// # Examples
///
/// ```
/// use tee_sync::IrqGuard;
///
/// let outer = IrqGuard::new();
/// {
///     let inner = IrqGuard::new();
///     assert!(!inner.were_enabled());
/// }
/// assert!(outer.were_enabled());
/// ```
pub struct IrqGuard {
    were_enabled: bool,
}

impl Default for IrqGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl IrqGuard {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        let prev = arch::disable();
        Self {
            were_enabled: prev & MSTATUS_MIE != 0,
        }
    }

    /// Whether interrupts were enabled before this guard masked them.
    #[inline]
    #[must_use]
    pub const fn were_enabled(&self) -> bool {
        self.were_enabled
    }
}

impl Drop for IrqGuard {
    fn drop(&mut self) {
        if self.were_enabled {
            arch::enable();
        }
    }
}
