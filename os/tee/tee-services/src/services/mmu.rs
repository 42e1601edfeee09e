//! REE-facing flash MMU operations.
//!
//! Every operation is refused when the addresses it names intersect the
//! secure partition. The refusal is an early return followed by a
//! [`fault_assert!`](crate::fault_assert) on the same condition, so a
//! skipped branch still cannot reach the MMU. The checks run before the
//! platform is consulted. Out-parameters are written only on success.

use tee_app_abi::Word;
use tee_memory_addresses::{PhysicalAddress, VirtualAddress};
use tee_mmu::{MmuTarget, VaddrKind};

use super::arg_u32;
use crate::boundary;
use crate::error::{ServiceError, status_word};
use crate::fault::guard;
use crate::fault_assert;
use crate::platform::platform;
use crate::ree_mem::ReeRegion;

fn target(raw: Word) -> Result<MmuTarget, ServiceError> {
    MmuTarget::from_raw(arg_u32(raw)).ok_or(ServiceError::InvalidArg)
}

/// Map `len` bytes of `mem_type` memory at `paddr` to `vaddr`, storing the
/// mapped length in `out_len`.
pub extern "C-unwind" fn mmu_hal_map_region(
    mmu_id: Word,
    mem_type: Word,
    vaddr: Word,
    paddr: Word,
    len: Word,
    out_len: Word,
) -> Word {
    status_word(map_region(
        arg_u32(mmu_id),
        mem_type,
        arg_u32(vaddr),
        arg_u32(paddr),
        arg_u32(len),
        out_len,
    ))
}

fn map_region(mmu_id: u32, mem_type: Word, vaddr: u32, paddr: u32, len: u32, out_len: Word) -> Result<(), ServiceError> {
    let target = target(mem_type)?;
    let out_len = ReeRegion::of::<u32>(out_len)?;

    let vaddr_chk = boundary::check_vaddr(vaddr, len);
    let paddr_chk = boundary::check_paddr(paddr, len);
    if guard(vaddr_chk.is_err() || paddr_chk.is_err()) {
        return vaddr_chk.and(paddr_chk).map_err(ServiceError::from);
    }
    fault_assert!(vaddr_chk.is_ok() && paddr_chk.is_ok());

    let mapped = platform()?.mmu.map_region(
        mmu_id,
        target,
        VirtualAddress::new(vaddr),
        PhysicalAddress::new(paddr),
        len,
    )?;
    // SAFETY: validated `u32` slot.
    unsafe { out_len.write(mapped) };
    Ok(())
}

pub extern "C-unwind" fn mmu_hal_unmap_region(mmu_id: Word, vaddr: Word, len: Word) -> Word {
    status_word(unmap_region(arg_u32(mmu_id), arg_u32(vaddr), arg_u32(len)))
}

fn unmap_region(mmu_id: u32, vaddr: u32, len: u32) -> Result<(), ServiceError> {
    let vaddr_chk = boundary::check_vaddr(vaddr, len);
    if guard(vaddr_chk.is_err()) {
        return vaddr_chk.map_err(ServiceError::from);
    }
    fault_assert!(vaddr_chk.is_ok());

    platform()?
        .mmu
        .unmap_region(mmu_id, VirtualAddress::new(vaddr), len)
        .map_err(ServiceError::from)
}

pub extern "C-unwind" fn mmu_hal_vaddr_to_paddr(
    mmu_id: Word,
    vaddr: Word,
    out_paddr: Word,
    out_target: Word,
) -> Word {
    Word::from(vaddr_to_paddr(arg_u32(mmu_id), arg_u32(vaddr), out_paddr, out_target).is_ok())
}

fn vaddr_to_paddr(mmu_id: u32, vaddr: u32, out_paddr: Word, out_target: Word) -> Result<(), ServiceError> {
    let out_paddr = ReeRegion::of::<u32>(out_paddr)?;
    let out_target = ReeRegion::of::<u32>(out_target)?;

    let vaddr_chk = boundary::check_vaddr(vaddr, 0);
    if guard(vaddr_chk.is_err()) {
        return vaddr_chk.map_err(ServiceError::from);
    }
    fault_assert!(vaddr_chk.is_ok());

    let (paddr, target) = platform()?.mmu.vaddr_to_paddr(mmu_id, VirtualAddress::new(vaddr))?;
    // SAFETY: validated `u32` slots.
    unsafe {
        out_paddr.write(paddr.as_u32());
        out_target.write(target.as_raw());
    }
    Ok(())
}

pub extern "C-unwind" fn mmu_hal_paddr_to_vaddr(
    mmu_id: Word,
    paddr: Word,
    mem_target: Word,
    vaddr_type: Word,
    out_vaddr: Word,
) -> Word {
    Word::from(paddr_to_vaddr(arg_u32(mmu_id), arg_u32(paddr), mem_target, vaddr_type, out_vaddr).is_ok())
}

fn paddr_to_vaddr(
    mmu_id: u32,
    paddr: u32,
    mem_target: Word,
    vaddr_type: Word,
    out_vaddr: Word,
) -> Result<(), ServiceError> {
    let target = target(mem_target)?;
    let kind = VaddrKind::from_raw(arg_u32(vaddr_type)).ok_or(ServiceError::InvalidArg)?;
    let out_vaddr = ReeRegion::of::<u32>(out_vaddr)?;

    let paddr_chk = boundary::check_paddr(paddr, 0);
    if guard(paddr_chk.is_err()) {
        return paddr_chk.map_err(ServiceError::from);
    }
    fault_assert!(paddr_chk.is_ok());

    let vaddr = platform()?
        .mmu
        .paddr_to_vaddr(mmu_id, PhysicalAddress::new(paddr), target, kind)?;
    // SAFETY: validated `u32` slot.
    unsafe { out_vaddr.write(vaddr.as_u32()) };
    Ok(())
}
