//! Key slots in secure storage.
//!
//! Key material never leaves the secure partition: the REE only receives
//! public keys, signatures and ciphertext.

use core::mem::size_of;

use tee_app_abi::Word;

use super::{arg_u8, arg_u16, flag, status};
use crate::abi::{KeyType, SecStoragePubkey, SecStorageSign};
use crate::error::ServiceError;
use crate::ree_mem::{ReeRegion, ensure_disjoint};

pub extern "C-unwind" fn esp_tee_sec_storage_init() -> Word {
    status(|p| p.storage.init())
}

pub extern "C-unwind" fn esp_tee_sec_storage_gen_key(slot_id: Word, key_type: Word) -> Word {
    status(|p| {
        let key_type = KeyType::from_raw(arg_u8(key_type)).ok_or(ServiceError::InvalidArg)?;
        p.storage.gen_key(arg_u16(slot_id), key_type)
    })
}

pub extern "C-unwind" fn esp_tee_sec_storage_get_signature(
    slot_id: Word,
    hash: Word,
    hlen: Word,
    out_sign: Word,
) -> Word {
    status(|p| {
        let hash = ReeRegion::bytes(hash, hlen)?;
        let out = ReeRegion::bytes(out_sign, size_of::<SecStorageSign>())?;
        // SAFETY: validated, read only.
        let sign = p.storage.sign(arg_u16(slot_id), unsafe { hash.as_slice() })?;
        // SAFETY: validated, byte aligned layout.
        unsafe { out.write(sign) };
        Ok(())
    })
}

pub extern "C-unwind" fn esp_tee_sec_storage_get_pubkey(slot_id: Word, pubkey: Word) -> Word {
    status(|p| {
        let out = ReeRegion::bytes(pubkey, size_of::<SecStoragePubkey>())?;
        let key = p.storage.pubkey(arg_u16(slot_id))?;
        // SAFETY: validated, byte aligned layout.
        unsafe { out.write(key) };
        Ok(())
    })
}

/// Regions shared by encrypt and decrypt. `output` receives a copy of
/// `input` before the storage backend runs in place.
struct AeadRegions {
    output: ReeRegion,
    aad: ReeRegion,
    tag: ReeRegion,
}

impl AeadRegions {
    fn new(
        input: Word,
        len: Word,
        aad: Word,
        aad_len: Word,
        tag: Word,
        tag_len: Word,
        output: Word,
    ) -> Result<Self, ServiceError> {
        let len = usize::from(arg_u8(len));
        let input = ReeRegion::bytes(input, len)?;
        let regions = Self {
            output: ReeRegion::bytes(output, len)?,
            aad: ReeRegion::bytes(aad, usize::from(arg_u16(aad_len)))?,
            tag: ReeRegion::bytes(tag, usize::from(arg_u16(tag_len)))?,
        };
        ensure_disjoint(&[&regions.output, &regions.aad])?;
        ensure_disjoint(&[&regions.output, &regions.tag])?;
        // SAFETY: validated spans, nothing borrowed yet.
        unsafe { input.copy_to(&regions.output)? };
        Ok(regions)
    }
}

#[allow(clippy::too_many_arguments)]
pub extern "C-unwind" fn esp_tee_sec_storage_encrypt(
    slot_id: Word,
    input: Word,
    len: Word,
    aad: Word,
    aad_len: Word,
    tag: Word,
    tag_len: Word,
    output: Word,
) -> Word {
    status(|p| {
        let r = AeadRegions::new(input, len, aad, aad_len, tag, tag_len, output)?;
        ensure_disjoint(&[&r.aad, &r.tag])?;
        // SAFETY: validated, `output` and `tag` disjoint from everything else.
        unsafe {
            p.storage
                .encrypt(arg_u16(slot_id), r.output.as_mut_slice(), r.aad.as_slice(), r.tag.as_mut_slice())
        }
    })
}

#[allow(clippy::too_many_arguments)]
pub extern "C-unwind" fn esp_tee_sec_storage_decrypt(
    slot_id: Word,
    input: Word,
    len: Word,
    aad: Word,
    aad_len: Word,
    tag: Word,
    tag_len: Word,
    output: Word,
) -> Word {
    status(|p| {
        let r = AeadRegions::new(input, len, aad, aad_len, tag, tag_len, output)?;
        // SAFETY: validated, `output` disjoint from the read-only inputs.
        unsafe {
            p.storage
                .decrypt(arg_u16(slot_id), r.output.as_mut_slice(), r.aad.as_slice(), r.tag.as_slice())
        }
    })
}

pub extern "C-unwind" fn esp_tee_sec_storage_is_slot_empty(slot_id: Word) -> Word {
    flag(|p| Ok(p.storage.is_slot_empty(arg_u16(slot_id))))
}

pub extern "C-unwind" fn esp_tee_sec_storage_clear_slot(slot_id: Word) -> Word {
    status(|p| p.storage.clear_slot(arg_u16(slot_id)))
}
