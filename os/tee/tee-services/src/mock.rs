//! Collaborators for unit tests.
//!
//! All state is thread local. Every test runs on its own thread, so tests
//! never see each other's keys, MMU entries or recorded calls.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::CStr;

use tee_app_abi::{ServiceId, Word};
use tee_dispatch::{WordCursor, dispatch};
use tee_memory_addresses::{PhysicalAddress, VirtualAddress};
use tee_mmu::{EntryTable, MMU_ID, Mmu, MmuEntry, MmuError, MmuHal, MmuTarget, VaddrKind};

use crate::SECURE_SERVICE_TABLE;
use crate::abi::{
    AES_BLOCK_BYTES, AesContext, AesMode, EfuseField, IntrType, KeyType, SecStoragePubkey,
    SecStorageSign, ShaType, WdtHalContext, WdtInst,
};
use crate::error::ServiceError;
use crate::platform::{
    self, AesEngine, Attestation, Efuse, InterruptController, OtaUpdater, Platform, SecureStorage,
    ShaEngine, Watchdog,
};

pub const MAC: [u8; 6] = [0x60, 0x55, 0xF9, 0x00, 0x12, 0x34];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntrCall {
    Route { cpu_no: i32, model_num: u32, intr_num: u32 },
    Enable(u32),
    Disable(u32),
    Priority(i32, u32),
    Type(i32, IntrType),
    Threshold(i32),
    EdgeAck(u32),
    GlobalEnable,
}

thread_local! {
    static INTR_CALLS: RefCell<Vec<IntrCall>> = const { RefCell::new(Vec::new()) };
    static CRYPT_CNT: Cell<u32> = const { Cell::new(0) };
    static SHA_STATE: RefCell<Vec<u8>> = const { RefCell::new(Vec::new()) };
    static OTA_WRITTEN: Cell<Option<usize>> = const { Cell::new(None) };
    static KEYS: RefCell<HashMap<u16, KeyType>> = RefCell::new(HashMap::new());
    static MMU: RefCell<Mmu<EntryTable>> = const { RefCell::new(Mmu::new(EntryTable::new())) };
}

struct Mock;

static MOCK: Mock = Mock;

/// Install the mock platform (idempotent).
pub fn install() {
    let _ = platform::install(Platform {
        interrupts: &MOCK,
        efuse: &MOCK,
        watchdog: &MOCK,
        aes: &MOCK,
        sha: &MOCK,
        ota: &MOCK,
        storage: &MOCK,
        attestation: &MOCK,
        mmu: &MOCK,
    });
}

/// Call a service the way the secure gate does.
pub fn call(id: ServiceId, args: &[Word]) -> Word {
    let mut words = vec![id.as_raw()];
    words.extend_from_slice(args);
    dispatch(&SECURE_SERVICE_TABLE, words.len(), &mut WordCursor::new(&words))
}

pub fn intr_calls() -> Vec<IntrCall> {
    INTR_CALLS.with_borrow(Clone::clone)
}

pub fn with_crypt_cnt<R>(cnt: u32, f: impl FnOnce() -> R) -> R {
    CRYPT_CNT.set(cnt);
    f()
}

pub fn ota_written() -> usize {
    OTA_WRITTEN.get().unwrap_or(0)
}

pub fn mmu_snapshot() -> Vec<(usize, MmuEntry)> {
    MMU.with_borrow(|m| m.store().valid_entries().collect())
}

/// Map a page directly, the way the secure partition maps itself at boot.
pub fn map_secure_page(vaddr: u32, paddr: u32) {
    MMU.with_borrow_mut(|m| {
        m.map_region(
            MMU_ID,
            MmuTarget::Flash,
            VirtualAddress::new(vaddr),
            PhysicalAddress::new(paddr),
            tee_info::SOC_MMU_PAGE_SIZE,
        )
        .unwrap()
    });
}

fn record(call: IntrCall) {
    INTR_CALLS.with_borrow_mut(|c| c.push(call));
}

impl InterruptController for Mock {
    fn route_intr_matrix(&self, cpu_no: i32, model_num: u32, intr_num: u32) {
        record(IntrCall::Route { cpu_no, model_num, intr_num });
    }
    fn intr_enable(&self, intr_mask: u32) {
        record(IntrCall::Enable(intr_mask));
    }
    fn intr_disable(&self, intr_mask: u32) {
        record(IntrCall::Disable(intr_mask));
    }
    fn set_priority(&self, rv_int_num: i32, priority: u32) {
        record(IntrCall::Priority(rv_int_num, priority));
    }
    fn set_type(&self, intr_num: i32, ty: IntrType) {
        record(IntrCall::Type(intr_num, ty));
    }
    fn set_threshold(&self, priority_threshold: i32) {
        record(IntrCall::Threshold(priority_threshold));
    }
    fn edge_ack(&self, intr_num: u32) {
        record(IntrCall::EdgeAck(intr_num));
    }
    fn global_enable(&self) {
        record(IntrCall::GlobalEnable);
    }
}

impl Efuse for Mock {
    fn chip_revision(&self) -> u32 {
        2
    }
    fn chip_ver_pkg(&self) -> u32 {
        0
    }
    fn disable_wafer_version_major(&self) -> bool {
        false
    }
    fn mac(&self) -> [u8; 6] {
        MAC
    }
    fn check_secure_version(&self, secure_version: u32) -> bool {
        secure_version <= 1
    }
    fn read_field_blob(&self, field: EfuseField<'_>, dst: &mut [u8], _dst_size_bits: usize) -> Result<(), ServiceError> {
        for (byte, desc) in dst.iter_mut().zip(field) {
            *byte = desc.efuse_block + desc.bit_start;
        }
        Ok(())
    }
    fn flash_crypt_cnt(&self) -> u32 {
        CRYPT_CNT.get()
    }
}

impl Watchdog for Mock {
    fn init(&self, hal: &mut WdtHalContext, inst: WdtInst, prescaler: u32, _enable_intr: bool) {
        hal.inst = inst as u32;
        hal.dev = prescaler as usize;
    }
    fn deinit(&self, hal: &mut WdtHalContext) {
        *hal = WdtHalContext::default();
    }
}

fn xor_key(ctx: &mut AesContext, data: &mut [u8]) {
    ctx.key_in_hardware = 1;
    for b in data {
        *b ^= ctx.key[0];
    }
}

#[allow(clippy::cast_possible_truncation)]
fn advance_iv(iv: &mut [u8; AES_BLOCK_BYTES], data: &[u8]) {
    iv[0] = iv[0].wrapping_add((data.len() / AES_BLOCK_BYTES) as u8);
}

impl AesEngine for Mock {
    fn intr_alloc(&self) {}
    fn crypt_cbc(&self, ctx: &mut AesContext, _mode: AesMode, iv: &mut [u8; AES_BLOCK_BYTES], data: &mut [u8]) -> i32 {
        xor_key(ctx, data);
        advance_iv(iv, data);
        0
    }
    fn crypt_cfb128(
        &self,
        ctx: &mut AesContext,
        _mode: AesMode,
        iv_off: &mut usize,
        iv: &mut [u8; AES_BLOCK_BYTES],
        data: &mut [u8],
    ) -> i32 {
        xor_key(ctx, data);
        advance_iv(iv, data);
        *iv_off = (*iv_off + data.len()) % AES_BLOCK_BYTES;
        0
    }
    fn crypt_cfb8(&self, ctx: &mut AesContext, _mode: AesMode, iv: &mut [u8; AES_BLOCK_BYTES], data: &mut [u8]) -> i32 {
        xor_key(ctx, data);
        advance_iv(iv, data);
        0
    }
    fn crypt_ctr(
        &self,
        ctx: &mut AesContext,
        nc_off: &mut usize,
        _nonce_counter: &mut [u8; AES_BLOCK_BYTES],
        _stream_block: &mut [u8; AES_BLOCK_BYTES],
        data: &mut [u8],
    ) -> i32 {
        xor_key(ctx, data);
        *nc_off += data.len();
        0
    }
    fn crypt_ecb(&self, ctx: &mut AesContext, _mode: AesMode, block: &mut [u8; AES_BLOCK_BYTES]) -> i32 {
        xor_key(ctx, block);
        0
    }
    fn crypt_ofb(
        &self,
        ctx: &mut AesContext,
        iv_off: &mut usize,
        iv: &mut [u8; AES_BLOCK_BYTES],
        data: &mut [u8],
    ) -> i32 {
        xor_key(ctx, data);
        advance_iv(iv, data);
        *iv_off = (*iv_off + data.len()) % AES_BLOCK_BYTES;
        0
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
impl ShaEngine for Mock {
    fn sha(&self, _ty: ShaType, input: &[u8], output: &mut [u8]) {
        output.fill(input.len() as u8);
    }
    fn sha_dma(&self, _ty: ShaType, input: &[u8], buf: &[u8], _is_first_block: bool) -> i32 {
        (input.len() + buf.len()) as i32
    }
    fn read_digest(&self, _ty: ShaType, state: &mut [u8]) {
        SHA_STATE.with_borrow(|s| {
            state.fill(0);
            let n = s.len().min(state.len());
            state[..n].copy_from_slice(&s[..n]);
        });
    }
    fn write_digest(&self, _ty: ShaType, state: &[u8]) {
        SHA_STATE.set(state.to_vec());
    }
}

impl OtaUpdater for Mock {
    fn begin(&self) -> Result<(), ServiceError> {
        OTA_WRITTEN.set(Some(0));
        Ok(())
    }
    fn write(&self, _rel_offset: u32, data: &[u8]) -> Result<(), ServiceError> {
        let written = OTA_WRITTEN.get().ok_or(ServiceError::InvalidState)?;
        OTA_WRITTEN.set(Some(written + data.len()));
        Ok(())
    }
    fn end(&self) -> Result<(), ServiceError> {
        OTA_WRITTEN.take().map(|_| ()).ok_or(ServiceError::InvalidState)
    }
}

fn key_byte(slot_id: u16) -> Result<u8, ServiceError> {
    if KEYS.with_borrow(|k| k.contains_key(&slot_id)) {
        #[allow(clippy::cast_possible_truncation)]
        Ok(slot_id as u8)
    } else {
        Err(ServiceError::NotFound)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn tag_of(key: u8, data: &[u8], aad: &[u8], tag: &mut [u8]) {
    let sum = data.iter().chain(aad).fold(key, |acc, b| acc.wrapping_add(*b));
    for (i, t) in tag.iter_mut().enumerate() {
        *t = sum.wrapping_add(i as u8) ^ 0x5A;
    }
}

impl SecureStorage for Mock {
    fn init(&self) -> Result<(), ServiceError> {
        Ok(())
    }
    fn gen_key(&self, slot_id: u16, key_type: KeyType) -> Result<(), ServiceError> {
        KEYS.with_borrow_mut(|k| k.insert(slot_id, key_type));
        Ok(())
    }
    fn sign(&self, slot_id: u16, hash: &[u8]) -> Result<SecStorageSign, ServiceError> {
        let key = key_byte(slot_id)?;
        if hash.is_empty() {
            return Err(ServiceError::InvalidArg);
        }
        let mut sign = SecStorageSign::default();
        for (i, r) in sign.sign_r.iter_mut().enumerate() {
            *r = key ^ hash[i % hash.len()];
        }
        sign.sign_s = [key; 32];
        Ok(sign)
    }
    fn pubkey(&self, slot_id: u16) -> Result<SecStoragePubkey, ServiceError> {
        let key = key_byte(slot_id)?;
        Ok(SecStoragePubkey {
            pub_x: [key; 32],
            pub_y: [!key; 32],
        })
    }
    fn encrypt(&self, slot_id: u16, data: &mut [u8], aad: &[u8], tag: &mut [u8]) -> Result<(), ServiceError> {
        let key = key_byte(slot_id)?;
        for b in data.iter_mut() {
            *b ^= key | 0x80;
        }
        tag_of(key, data, aad, tag);
        Ok(())
    }
    fn decrypt(&self, slot_id: u16, data: &mut [u8], aad: &[u8], tag: &[u8]) -> Result<(), ServiceError> {
        let key = key_byte(slot_id)?;
        let mut expected = vec![0; tag.len()];
        tag_of(key, data, aad, &mut expected);
        if expected != tag {
            return Err(ServiceError::Fail);
        }
        for b in data.iter_mut() {
            *b ^= key | 0x80;
        }
        Ok(())
    }
    fn is_slot_empty(&self, slot_id: u16) -> bool {
        key_byte(slot_id).is_err()
    }
    fn clear_slot(&self, slot_id: u16) -> Result<(), ServiceError> {
        KEYS.with_borrow_mut(|k| k.remove(&slot_id));
        Ok(())
    }
}

impl Attestation for Mock {
    fn generate_token(
        &self,
        nonce: u32,
        client_id: u32,
        psa_cert_ref: &CStr,
        token_buf: &mut [u8],
    ) -> Result<usize, ServiceError> {
        let token = format!(
            "EAT:{nonce:x}:{client_id:x}:{}",
            psa_cert_ref.to_str().map_err(|_| ServiceError::InvalidArg)?
        );
        let out = token_buf
            .get_mut(..token.len())
            .ok_or(ServiceError::InvalidSize)?;
        out.copy_from_slice(token.as_bytes());
        Ok(token.len())
    }
}

impl MmuHal for Mock {
    fn map_region(
        &self,
        mmu_id: u32,
        target: MmuTarget,
        vaddr: VirtualAddress,
        paddr: PhysicalAddress,
        len: u32,
    ) -> Result<u32, MmuError> {
        MMU.with_borrow_mut(|m| m.map_region(mmu_id, target, vaddr, paddr, len))
    }

    fn unmap_region(&self, mmu_id: u32, vaddr: VirtualAddress, len: u32) -> Result<(), MmuError> {
        MMU.with_borrow_mut(|m| m.unmap_region(mmu_id, vaddr, len))
    }

    fn vaddr_to_paddr(&self, mmu_id: u32, vaddr: VirtualAddress) -> Result<(PhysicalAddress, MmuTarget), MmuError> {
        MMU.with_borrow(|m| m.vaddr_to_paddr(mmu_id, vaddr))
    }

    fn paddr_to_vaddr(
        &self,
        mmu_id: u32,
        paddr: PhysicalAddress,
        target: MmuTarget,
        kind: VaddrKind,
    ) -> Result<VirtualAddress, MmuError> {
        MMU.with_borrow(|m| m.paddr_to_vaddr(mmu_id, paddr, target, kind))
    }
}
