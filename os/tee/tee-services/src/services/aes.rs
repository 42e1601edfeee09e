//! AES accelerator block modes.
//!
//! The input is first moved into the output buffer (overlap tolerated),
//! then the engine transforms the output in place. The context, IV state
//! and output are mutable and must not overlap one another.

use tee_app_abi::Word;

use super::{arg_i32, driver_code, status};
use crate::abi::{AES_BLOCK_BYTES, AesContext, AesMode};
use crate::error::ServiceError;
use crate::ree_mem::{ReeRegion, ensure_disjoint};

fn mode(raw: Word) -> Result<AesMode, ServiceError> {
    AesMode::from_raw(arg_i32(raw)).ok_or(ServiceError::InvalidArg)
}

fn block(addr: Word) -> Result<ReeRegion, ServiceError> {
    ReeRegion::of::<[u8; AES_BLOCK_BYTES]>(addr)
}

/// Move `length` bytes from `input` to `output` and hand out the output.
///
/// # Safety
/// `output` must be disjoint from every other region borrowed for the call.
unsafe fn stage<'a>(input: Word, output: &ReeRegion) -> Result<&'a mut [u8], ServiceError> {
    let input = ReeRegion::bytes(input, output.len())?;
    // SAFETY: validated spans, no references held yet.
    unsafe {
        input.copy_to(output)?;
        Ok(output.as_mut_slice())
    }
}

pub extern "C-unwind" fn esp_aes_intr_alloc() -> Word {
    status(|p| {
        p.aes.intr_alloc();
        Ok(())
    })
}

pub extern "C-unwind" fn esp_aes_crypt_cbc(
    ctx: Word,
    mode_raw: Word,
    length: Word,
    iv: Word,
    input: Word,
    output: Word,
) -> Word {
    driver_code(|p| {
        let mode = mode(mode_raw)?;
        let ctx = ReeRegion::of::<AesContext>(ctx)?;
        let iv = block(iv)?;
        let output = ReeRegion::bytes(output, length)?;
        ensure_disjoint(&[&ctx, &iv, &output])?;
        // SAFETY: validated and pairwise disjoint.
        unsafe {
            let data = stage(input, &output)?;
            Ok(p.aes.crypt_cbc(ctx.as_mut(), mode, iv.as_mut(), data))
        }
    })
}

pub extern "C-unwind" fn esp_aes_crypt_cfb128(
    ctx: Word,
    mode_raw: Word,
    length: Word,
    iv_off: Word,
    iv: Word,
    input: Word,
    output: Word,
) -> Word {
    driver_code(|p| {
        let mode = mode(mode_raw)?;
        let ctx = ReeRegion::of::<AesContext>(ctx)?;
        let iv_off = ReeRegion::of::<usize>(iv_off)?;
        let iv = block(iv)?;
        let output = ReeRegion::bytes(output, length)?;
        ensure_disjoint(&[&ctx, &iv_off, &iv, &output])?;
        // SAFETY: validated and pairwise disjoint.
        unsafe {
            let data = stage(input, &output)?;
            Ok(p.aes.crypt_cfb128(ctx.as_mut(), mode, iv_off.as_mut(), iv.as_mut(), data))
        }
    })
}

pub extern "C-unwind" fn esp_aes_crypt_cfb8(
    ctx: Word,
    mode_raw: Word,
    length: Word,
    iv: Word,
    input: Word,
    output: Word,
) -> Word {
    driver_code(|p| {
        let mode = mode(mode_raw)?;
        let ctx = ReeRegion::of::<AesContext>(ctx)?;
        let iv = block(iv)?;
        let output = ReeRegion::bytes(output, length)?;
        ensure_disjoint(&[&ctx, &iv, &output])?;
        // SAFETY: validated and pairwise disjoint.
        unsafe {
            let data = stage(input, &output)?;
            Ok(p.aes.crypt_cfb8(ctx.as_mut(), mode, iv.as_mut(), data))
        }
    })
}

pub extern "C-unwind" fn esp_aes_crypt_ctr(
    ctx: Word,
    length: Word,
    nc_off: Word,
    nonce_counter: Word,
    stream_block: Word,
    input: Word,
    output: Word,
) -> Word {
    driver_code(|p| {
        let ctx = ReeRegion::of::<AesContext>(ctx)?;
        let nc_off = ReeRegion::of::<usize>(nc_off)?;
        let nonce_counter = block(nonce_counter)?;
        let stream_block = block(stream_block)?;
        let output = ReeRegion::bytes(output, length)?;
        ensure_disjoint(&[&ctx, &nc_off, &nonce_counter, &stream_block, &output])?;
        // SAFETY: validated and pairwise disjoint.
        unsafe {
            let data = stage(input, &output)?;
            Ok(p.aes.crypt_ctr(
                ctx.as_mut(),
                nc_off.as_mut(),
                nonce_counter.as_mut(),
                stream_block.as_mut(),
                data,
            ))
        }
    })
}

pub extern "C-unwind" fn esp_aes_crypt_ecb(ctx: Word, mode_raw: Word, input: Word, output: Word) -> Word {
    driver_code(|p| {
        let mode = mode(mode_raw)?;
        let ctx = ReeRegion::of::<AesContext>(ctx)?;
        let output = block(output)?;
        ensure_disjoint(&[&ctx, &output])?;
        // SAFETY: validated and disjoint.
        unsafe {
            stage(input, &output)?;
            Ok(p.aes.crypt_ecb(ctx.as_mut(), mode, output.as_mut()))
        }
    })
}

pub extern "C-unwind" fn esp_aes_crypt_ofb(
    ctx: Word,
    length: Word,
    iv_off: Word,
    iv: Word,
    input: Word,
    output: Word,
) -> Word {
    driver_code(|p| {
        let ctx = ReeRegion::of::<AesContext>(ctx)?;
        let iv_off = ReeRegion::of::<usize>(iv_off)?;
        let iv = block(iv)?;
        let output = ReeRegion::bytes(output, length)?;
        ensure_disjoint(&[&ctx, &iv_off, &iv, &output])?;
        // SAFETY: validated and pairwise disjoint.
        unsafe {
            let data = stage(input, &output)?;
            Ok(p.aes.crypt_ofb(ctx.as_mut(), iv_off.as_mut(), iv.as_mut(), data))
        }
    })
}

#[cfg(test)]
mod test {
    use core::ptr;

    use tee_app_abi::{ServiceId, Word};

    use crate::abi::AesContext;
    use crate::error::{ESP_ERR_INVALID_ARG, i32_word};
    use crate::mock;

    fn key(byte: u8) -> AesContext {
        AesContext { key_bytes: 16, key_in_hardware: 0, key: [byte; 32] }
    }

    fn addr<T>(v: &mut T) -> Word {
        ptr::from_mut(v) as Word
    }

    #[test]
    fn cbc_separate_buffers() {
        mock::install();
        let mut ctx = key(0x0F);
        let mut iv = [0u8; 16];
        let mut input = [0xF0u8; 32];
        let mut output = [0u8; 32];
        let ret = mock::call(
            ServiceId::EspAesCryptCbc,
            &[addr(&mut ctx), 1, 32, addr(&mut iv), addr(&mut input), addr(&mut output)],
        );
        assert_eq!(ret, 0);
        assert_eq!(output, [0xFF; 32]);
        assert_eq!(input, [0xF0; 32]);
        // the mock advances the IV by one per block
        assert_eq!(iv[0], 2);
    }

    #[test]
    fn ecb_in_place() {
        mock::install();
        let mut ctx = key(0xFF);
        let mut buf = [0x0Fu8; 16];
        let b = addr(&mut buf);
        assert_eq!(mock::call(ServiceId::EspAesCryptEcb, &[addr(&mut ctx), 0, b, b]), 0);
        assert_eq!(buf, [0xF0; 16]);
    }

    #[test]
    fn iv_aliasing_the_output_is_refused() {
        mock::install();
        let mut ctx = key(1);
        let mut buf = [0u8; 48];
        let base = addr(&mut buf);
        let ret = mock::call(
            ServiceId::EspAesCryptCbc,
            &[addr(&mut ctx), 1, 32, base + 16, base, base],
        );
        assert_eq!(ret, i32_word(ESP_ERR_INVALID_ARG));
        assert_eq!(buf, [0; 48]);
    }

    #[test]
    fn bad_mode_is_refused() {
        mock::install();
        let mut ctx = key(1);
        let mut buf = [0u8; 16];
        let b = addr(&mut buf);
        assert_eq!(
            mock::call(ServiceId::EspAesCryptEcb, &[addr(&mut ctx), 7, b, b]),
            i32_word(ESP_ERR_INVALID_ARG)
        );
    }

    #[test]
    fn ctr_updates_offset() {
        mock::install();
        let mut ctx = key(0x01);
        let mut nc_off = 0usize;
        let mut nonce = [0u8; 16];
        let mut stream = [0u8; 16];
        let mut data = [0u8; 5];
        let d = addr(&mut data);
        let ret = mock::call(
            ServiceId::EspAesCryptCtr,
            &[addr(&mut ctx), 5, addr(&mut nc_off), addr(&mut nonce), addr(&mut stream), d, d],
        );
        assert_eq!(ret, 0);
        assert_eq!(data, [0x01; 5]);
        assert_eq!(nc_off, 5);
    }
}
