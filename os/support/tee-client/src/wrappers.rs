//! Typed entry points for individual secure services.

use core::ffi::CStr;
use core::ptr;

use tee_app_abi::{ServiceId, Word};

use crate::ServiceFailed;
use crate::call::{service_call, service_call_with_noniram_intr_disabled};
use crate::gate::{NonIramInterrupts, SecureGate};

const FLASH_TARGET: Word = 1;

#[allow(clippy::cast_possible_truncation)]
const fn word_u32(w: Word) -> u32 {
    w as u32
}

pub fn dummy_secure_service<G: SecureGate + ?Sized>(gate: &G) {
    service_call(gate, ServiceId::DummySecureService, &[]);
}

#[must_use]
pub fn add<G: SecureGate + ?Sized>(gate: &G, a: u32, b: u32) -> u32 {
    word_u32(service_call(gate, ServiceId::EspTeeServiceAdd, &[a as Word, b as Word]))
}

#[must_use]
pub fn sub<G: SecureGate + ?Sized>(gate: &G, a: u32, b: u32) -> u32 {
    word_u32(service_call(gate, ServiceId::EspTeeServiceSub, &[a as Word, b as Word]))
}

#[must_use]
pub fn mul<G: SecureGate + ?Sized>(gate: &G, a: u32, b: u32) -> u32 {
    word_u32(service_call(gate, ServiceId::EspTeeServiceMul, &[a as Word, b as Word]))
}

#[must_use]
pub fn div<G: SecureGate + ?Sized>(gate: &G, a: u32, b: u32) -> u32 {
    word_u32(service_call(gate, ServiceId::EspTeeServiceDiv, &[a as Word, b as Word]))
}

/// `a + iter * b`, one secure call per step.
#[must_use]
pub fn add_in_loop<G: SecureGate + ?Sized>(gate: &G, a: u32, b: u32, iter: u32) -> u32 {
    (0..iter).fold(a, |acc, _| add(gate, acc, b))
}

/// Request an attestation token into `token_buf`, returning its length.
///
/// # Errors
/// The service's `esp_err_t`.
pub fn att_generate_token<G, I>(
    gate: &G,
    intr: &I,
    nonce: u32,
    client_id: u32,
    psa_cert_ref: &CStr,
    token_buf: &mut [u8],
) -> Result<usize, ServiceFailed>
where
    G: SecureGate + ?Sized,
    I: NonIramInterrupts + ?Sized,
{
    let mut token_len = 0u32;
    let ret = service_call_with_noniram_intr_disabled(
        gate,
        intr,
        ServiceId::EspTeeAttGenerateToken,
        &[
            nonce as Word,
            client_id as Word,
            psa_cert_ref.as_ptr() as Word,
            token_buf.as_mut_ptr() as Word,
            token_buf.len(),
            ptr::from_mut(&mut token_len) as Word,
        ],
    );
    ServiceFailed::check(ret)?;
    Ok(token_len as usize)
}

/// Map `len` bytes of flash at `paddr` to `vaddr`, returning the mapped
/// length.
///
/// # Errors
/// The service's `esp_err_t`; secure memory is refused with `ESP_FAIL`.
pub fn mmu_map_region<G: SecureGate + ?Sized>(gate: &G, vaddr: u32, paddr: u32, len: u32) -> Result<u32, ServiceFailed> {
    let mut out_len = 0u32;
    let ret = service_call(
        gate,
        ServiceId::MmuHalMapRegion,
        &[
            0,
            FLASH_TARGET,
            vaddr as Word,
            paddr as Word,
            len as Word,
            ptr::from_mut(&mut out_len) as Word,
        ],
    );
    ServiceFailed::check(ret)?;
    Ok(out_len)
}

/// # Errors
/// The service's `esp_err_t`.
pub fn mmu_unmap_region<G: SecureGate + ?Sized>(gate: &G, vaddr: u32, len: u32) -> Result<(), ServiceFailed> {
    ServiceFailed::check(service_call(
        gate,
        ServiceId::MmuHalUnmapRegion,
        &[0, vaddr as Word, len as Word],
    ))
}

/// Flash address behind `vaddr`, `None` if unmapped or refused.
#[must_use]
pub fn mmu_vaddr_to_paddr<G: SecureGate + ?Sized>(gate: &G, vaddr: u32) -> Option<u32> {
    let (mut paddr, mut target) = (0u32, 0u32);
    let found = service_call(
        gate,
        ServiceId::MmuHalVaddrToPaddr,
        &[
            0,
            vaddr as Word,
            ptr::from_mut(&mut paddr) as Word,
            ptr::from_mut(&mut target) as Word,
        ],
    );
    (found == 1).then_some(paddr)
}

/// Stream a new secure-partition image into the passive slot.
///
/// # Errors
/// The first failing step's `esp_err_t`.
pub fn ota_update<'a, G, C>(gate: &G, chunks: C) -> Result<(), ServiceFailed>
where
    G: SecureGate + ?Sized,
    C: IntoIterator<Item = &'a [u8]>,
{
    ServiceFailed::check(service_call(gate, ServiceId::EspTeeOtaBegin, &[]))?;
    let mut offset = 0usize;
    for chunk in chunks {
        ServiceFailed::check(service_call(
            gate,
            ServiceId::EspTeeOtaWrite,
            &[offset, chunk.as_ptr() as Word, chunk.len()],
        ))?;
        offset += chunk.len();
    }
    ServiceFailed::check(service_call(gate, ServiceId::EspTeeOtaEnd, &[]))
}
