//! The per-call state machine.
//!
//! ```text
//!  Decode ──argc > MAX_INPUT_ARG──────────────► Fail (-1)
//!    │
//!  Resolve ─no id / id ≥ MAX_SECURE_SERVICES──► Fail (-1)
//!    │
//!  Marshal ─source ran dry────────────────────► Fail (-1)
//!    │
//!  Transfer → Invoke → Return (service result, verbatim)
//! ```
//!
//! The cursor is finalized on every path before anything is invoked.

use log::{error, trace};
use tee_app_abi::{MAX_INPUT_ARG, MAX_SECURE_SERVICES, SERVICE_CALL_FAILED, Word};

use crate::{ArgBuffer, ServiceFn, ServiceTable, VaList, marshal};

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum DispatchError {
    #[error("Input arguments overflow! Received {received}, Permitted {permitted}", permitted = MAX_INPUT_ARG)]
    TooManyArgs { received: usize },
    #[error("Invalid Service ID! No service id was passed")]
    MissingServiceId,
    #[error("Invalid Service ID! Received {received}, Permitted < {permitted}", permitted = MAX_SECURE_SERVICES)]
    InvalidServiceId { received: usize },
    #[error("Argument list ended after {got} of {expected} words")]
    Truncated { expected: usize, got: usize },
}

/// One decoded invocation: the service id and its marshaled arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallRequest {
    pub service_id: usize,
    pub argv: ArgBuffer,
}

impl CallRequest {
    /// Decode a call of `argc` words (service id included) from `ap`.
    ///
    /// `ap` is finalized on return, whatever the outcome. An `argc` above
    /// [`MAX_INPUT_ARG`] is refused before any word is read.
    ///
    /// # Errors
    /// See [`DispatchError`].
    pub fn decode<V: VaList + ?Sized>(argc: usize, ap: &mut V) -> Result<Self, DispatchError> {
        let request = Self::decode_words(argc, ap);
        ap.end();
        request
    }

    fn decode_words<V: VaList + ?Sized>(argc: usize, ap: &mut V) -> Result<Self, DispatchError> {
        if argc > MAX_INPUT_ARG {
            return Err(DispatchError::TooManyArgs { received: argc });
        }
        if argc == 0 {
            return Err(DispatchError::MissingServiceId);
        }

        let service_id = ap.arg().ok_or(DispatchError::MissingServiceId)?;
        if service_id >= MAX_SECURE_SERVICES {
            return Err(DispatchError::InvalidServiceId {
                received: service_id,
            });
        }

        let argv = marshal(ap, argc - 1)?;
        Ok(Self { service_id, argv })
    }

    /// Number of words in the call, service id included.
    #[must_use]
    pub const fn argc(&self) -> usize {
        self.argv.len() + 1
    }

    /// Hand the arguments to `service` and return its result.
    pub fn invoke(&self, service: ServiceFn) -> Word {
        #[cfg(all(target_arch = "riscv32", feature = "asm-trampoline"))]
        {
            // SAFETY: `service` is a valid entry point and the buffer holds
            // MAX_INPUT_ARG initialized words.
            unsafe { crate::trampoline::service_trampoline(service.addr(), self.argv.slots().as_ptr()) }
        }
        #[cfg(not(all(target_arch = "riscv32", feature = "asm-trampoline")))]
        {
            service.call(&self.argv)
        }
    }
}

/// Dispatch one secure service call.
///
/// Returns the service's result verbatim, or [`SERVICE_CALL_FAILED`] if the
/// call was refused. Refusals are logged on the secure console only.
pub fn dispatch<V: VaList + ?Sized>(table: &ServiceTable, argc: usize, ap: &mut V) -> Word {
    let request = match CallRequest::decode(argc, ap) {
        Ok(request) => request,
        Err(e) => {
            error!(target: "tee_dispatch", "{e}");
            return SERVICE_CALL_FAILED;
        }
    };

    let service = table.lookup(request.service_id);
    if service.arity() != request.argv.len() {
        trace!(
            target: "tee_dispatch",
            "service {} takes {} words, caller passed {}",
            request.service_id,
            service.arity(),
            request.argv.len()
        );
    }

    let ret = request.invoke(service);
    trace!(target: "tee_dispatch", "service {} returned {ret:#x}", request.service_id);
    ret
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::WordCursor;

    #[test]
    fn decode_splits_id_from_arguments() {
        let words = [7, 8, 9];
        let mut ap = WordCursor::new(&words);
        let req = CallRequest::decode(3, &mut ap).unwrap();
        assert_eq!(req.service_id, 7);
        assert_eq!(req.argv.as_slice(), &[8, 9]);
        assert_eq!(req.argc(), 3);
        assert!(ap.is_ended());
    }

    #[test]
    fn overflow_reads_nothing() {
        let words = [1; 11];
        let mut ap = WordCursor::new(&words);
        assert_eq!(
            CallRequest::decode(11, &mut ap),
            Err(DispatchError::TooManyArgs { received: 11 })
        );
        assert_eq!(ap.consumed(), 0);
        assert!(ap.is_ended());
    }

    #[test]
    fn bad_id_reads_only_the_id() {
        let words = [MAX_SECURE_SERVICES, 1, 2];
        let mut ap = WordCursor::new(&words);
        assert_eq!(
            CallRequest::decode(3, &mut ap),
            Err(DispatchError::InvalidServiceId {
                received: MAX_SECURE_SERVICES
            })
        );
        assert_eq!(ap.consumed(), 1);
        assert!(ap.is_ended());
    }

    #[test]
    fn zero_argc_has_no_id() {
        let mut ap = WordCursor::new(&[1]);
        assert_eq!(
            CallRequest::decode(0, &mut ap),
            Err(DispatchError::MissingServiceId)
        );
        assert_eq!(ap.consumed(), 0);
    }

    #[test]
    fn messages_name_received_and_permitted() {
        assert_eq!(
            DispatchError::TooManyArgs { received: 12 }.to_string(),
            "Input arguments overflow! Received 12, Permitted 10"
        );
        assert_eq!(
            DispatchError::InvalidServiceId { received: 77 }.to_string(),
            format!("Invalid Service ID! Received 77, Permitted < {MAX_SECURE_SERVICES}")
        );
    }
}
