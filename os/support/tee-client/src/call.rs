//! Packing service calls.

use log::warn;
use tee_app_abi::{MAX_INPUT_ARG, SERVICE_CALL_FAILED, ServiceId, Word};

use crate::gate::{NonIramGuard, NonIramInterrupts, SecureGate};

/// Call service `id` with `args`.
///
/// Calls with more than [`MAX_INPUT_ARG`] words (id included) never leave
/// the REE and return [`SERVICE_CALL_FAILED`].
pub fn service_call<G: SecureGate + ?Sized>(gate: &G, id: ServiceId, args: &[Word]) -> Word {
    let argc = args.len() + 1;
    if argc > MAX_INPUT_ARG {
        warn!(target: "tee_client", "{} takes at most {} words, got {argc}", id.name(), MAX_INPUT_ARG);
        return SERVICE_CALL_FAILED;
    }

    let mut words = [0; MAX_INPUT_ARG];
    words[0] = id.as_raw();
    words[1..argc].copy_from_slice(args);
    gate.enter(&words[..argc])
}

/// [`service_call`] with the flash-resident interrupts masked for the
/// duration of the call.
pub fn service_call_with_noniram_intr_disabled<G, I>(gate: &G, intr: &I, id: ServiceId, args: &[Word]) -> Word
where
    G: SecureGate + ?Sized,
    I: NonIramInterrupts + ?Sized,
{
    let _masked = NonIramGuard::new(intr);
    service_call(gate, id, args)
}
