//! Slot 0 and the fallback for unassigned slots.

use tee_app_abi::Word;

/// Never returns. With `panic = "abort"` this halts the system.
pub extern "C-unwind" fn invalid_secure_service() -> Word {
    invalid_service_reached()
}

#[cold]
#[inline(never)]
fn invalid_service_reached() -> ! {
    panic!("invalid secure service invoked");
}
