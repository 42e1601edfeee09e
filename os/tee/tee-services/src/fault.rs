//! Glitch-resistant checks.
//!
//! A security decision is taken twice: once as an ordinary early return and
//! once more through [`fault_assert!`](crate::fault_assert) right after it.
//! Skipping the branch of the first check with a voltage or clock glitch
//! then still ends in a panic instead of the protected operation.

/// Panic unless `cond` holds, evaluating it twice through
/// [`core::hint::black_box`] so the compiler cannot fold the re-check into
/// the preceding early return.
#[macro_export]
macro_rules! fault_assert {
    ($cond:expr $(,)?) => {{
        if !core::hint::black_box($cond) || !core::hint::black_box($cond) {
            $crate::fault::fault_detected(core::stringify!($cond));
        }
    }};
}

#[cold]
#[inline(never)]
#[doc(hidden)]
pub fn fault_detected(check: &str) -> ! {
    panic!("fault injection detected: `{check}` does not hold");
}

/// The branch condition of an early return.
///
/// Test builds can simulate an instruction-skip glitch with
/// [`glitch_next_branch`], making the next guarded branch fall through.
#[inline(always)]
#[allow(clippy::inline_always)]
pub fn guard(cond: bool) -> bool {
    #[cfg(test)]
    {
        let glitched = GLITCH.with(|g| g.replace(false));
        cond && !glitched
    }
    #[cfg(not(test))]
    {
        cond
    }
}

#[cfg(test)]
std::thread_local! {
    static GLITCH: core::cell::Cell<bool> = const { core::cell::Cell::new(false) };
}

/// Make the next [`guard`] on this thread report `false`.
#[cfg(test)]
pub fn glitch_next_branch() {
    GLITCH.with(|g| g.set(true));
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn holding_condition_passes() {
        crate::fault_assert!(1 + 1 == 2);
    }

    #[test]
    #[should_panic(expected = "fault injection detected")]
    fn failing_condition_panics() {
        let secure = true;
        crate::fault_assert!(!secure);
    }

    #[test]
    fn glitch_skips_exactly_one_branch() {
        glitch_next_branch();
        assert!(!guard(true));
        assert!(guard(true));
        assert!(!guard(false));
    }

    #[test]
    fn glitch_is_spent_on_a_false_branch() {
        glitch_next_branch();
        assert!(!guard(false));
        assert!(guard(true));
    }
}
