//! SHA accelerator.

use tee_app_abi::Word;

use super::{arg_bool, arg_u32, driver_code, status};
use crate::abi::ShaType;
use crate::error::ServiceError;
use crate::ree_mem::{ReeRegion, ensure_disjoint};

fn sha_type(raw: Word) -> Result<ShaType, ServiceError> {
    ShaType::from_raw(arg_u32(raw)).ok_or(ServiceError::InvalidArg)
}

pub extern "C-unwind" fn esp_sha(ty: Word, input: Word, ilen: Word, output: Word) -> Word {
    status(|p| {
        let ty = sha_type(ty)?;
        let input = ReeRegion::bytes(input, ilen)?;
        let output = ReeRegion::bytes(output, ty.digest_len())?;
        ensure_disjoint(&[&input, &output])?;
        // SAFETY: validated and disjoint.
        unsafe { p.sha.sha(ty, input.as_slice(), output.as_mut_slice()) };
        Ok(())
    })
}

pub extern "C-unwind" fn esp_sha_dma(
    ty: Word,
    input: Word,
    ilen: Word,
    buf: Word,
    buf_len: Word,
    is_first_block: Word,
) -> Word {
    driver_code(|p| {
        let ty = sha_type(ty)?;
        let input = ReeRegion::bytes(input, ilen)?;
        let buf = ReeRegion::bytes(buf, buf_len)?;
        // SAFETY: validated, both read only.
        let code = unsafe { p.sha.sha_dma(ty, input.as_slice(), buf.as_slice(), arg_bool(is_first_block)) };
        Ok(code)
    })
}

pub extern "C-unwind" fn esp_sha_read_digest_state(ty: Word, state: Word) -> Word {
    status(|p| {
        let ty = sha_type(ty)?;
        let state = ReeRegion::new(state, ty.state_len(), 4)?;
        // SAFETY: validated, the only reference.
        p.sha.read_digest(ty, unsafe { state.as_mut_slice() });
        Ok(())
    })
}

pub extern "C-unwind" fn esp_sha_write_digest_state(ty: Word, state: Word) -> Word {
    status(|p| {
        let ty = sha_type(ty)?;
        let state = ReeRegion::new(state, ty.state_len(), 4)?;
        // SAFETY: validated, read only.
        p.sha.write_digest(ty, unsafe { state.as_slice() });
        Ok(())
    })
}

#[cfg(test)]
mod test {
    use core::ptr;

    use tee_app_abi::{ServiceId, Word};

    use crate::error::{ESP_ERR_INVALID_ARG, i32_word};
    use crate::mock;

    #[test]
    fn digest_length_follows_the_algorithm() {
        mock::install();
        let input = *b"abc";
        let mut out = [0u8; 32];
        let out_addr = ptr::from_mut(&mut out) as Word;
        let in_addr = ptr::from_ref(&input) as Word;

        assert_eq!(mock::call(ServiceId::EspSha, &[0, in_addr, 3, out_addr]), 0);
        assert_eq!(&out[..20], &[3; 20]);
        assert_eq!(&out[20..], &[0; 12]);

        assert_eq!(mock::call(ServiceId::EspSha, &[2, in_addr, 3, out_addr]), 0);
        assert_eq!(out, [3; 32]);
    }

    #[test]
    fn digest_state_round_trips_through_the_engine() {
        mock::install();
        let mut state = [7u32; 8];
        let addr = ptr::from_mut(&mut state) as Word;
        assert_eq!(mock::call(ServiceId::EspShaWriteDigestState, &[2, addr]), 0);
        state = [0; 8];
        assert_eq!(mock::call(ServiceId::EspShaReadDigestState, &[2, addr]), 0);
        assert_eq!(state, [7; 8]);
    }

    #[test]
    fn dma_passes_the_driver_code_through() {
        mock::install();
        let input = [0u8; 64];
        let addr = ptr::from_ref(&input) as Word;
        assert_eq!(mock::call(ServiceId::EspShaDma, &[1, addr, 64, 0, 0, 1]), 64);
    }

    #[test]
    fn unknown_algorithm_is_refused() {
        mock::install();
        let mut out = [0u8; 32];
        let ret = mock::call(ServiceId::EspSha, &[3, 0, 0, ptr::from_mut(&mut out) as Word]);
        assert_eq!(ret, i32_word(ESP_ERR_INVALID_ARG));
    }
}
