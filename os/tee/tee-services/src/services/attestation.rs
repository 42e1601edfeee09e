//! Entity attestation token.

use tee_app_abi::Word;

use super::{arg_u32, status};
use crate::abi::MAX_PSA_CERT_REF_LEN;
use crate::error::ServiceError;
use crate::ree_mem::{ReeRegion, ensure_disjoint, ree_cstr};

/// Writes the token length to `token_len` only when a token was produced.
pub extern "C-unwind" fn esp_tee_att_generate_token(
    nonce: Word,
    client_id: Word,
    psa_cert_ref: Word,
    token_buf: Word,
    token_buf_size: Word,
    token_len: Word,
) -> Word {
    status(|p| {
        // SAFETY: validated byte by byte, read only.
        let (cert_ref, cert_region) = unsafe { ree_cstr(psa_cert_ref, MAX_PSA_CERT_REF_LEN)? };
        let buf = ReeRegion::bytes(token_buf, token_buf_size)?;
        let len_out = ReeRegion::of::<u32>(token_len)?;
        ensure_disjoint(&[&cert_region, &buf, &len_out])?;

        // SAFETY: validated, disjoint from the other regions.
        let token = unsafe { buf.as_mut_slice() };
        let written = p
            .attestation
            .generate_token(arg_u32(nonce), arg_u32(client_id), cert_ref, token)?;
        let written = u32::try_from(written).map_err(|_| ServiceError::InvalidSize)?;
        // SAFETY: validated `u32` slot.
        unsafe { len_out.write(written) };
        Ok(())
    })
}
