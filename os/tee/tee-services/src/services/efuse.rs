//! eFuse reads and the flash-encryption status.

use core::mem::size_of;

use log::warn;
use tee_app_abi::Word;

use super::{arg_u32, flag, status, value};
use crate::abi::{EFUSE_BLK_KEY0, EfuseDesc, MAX_EFUSE_FIELD_DESCS};
use crate::error::ServiceError;
use crate::ree_mem::ReeRegion;

const MAC_LEN: usize = 6;

static UNUSED_DESC: EfuseDesc = EfuseDesc {
    efuse_block: 0,
    bit_start: 0,
    bit_count: 0,
};

pub extern "C-unwind" fn efuse_hal_chip_revision() -> Word {
    value(|p| p.efuse.chip_revision() as Word)
}

pub extern "C-unwind" fn efuse_hal_get_chip_ver_pkg() -> Word {
    value(|p| p.efuse.chip_ver_pkg() as Word)
}

pub extern "C-unwind" fn efuse_hal_get_disable_wafer_version_major() -> Word {
    flag(|p| Ok(p.efuse.disable_wafer_version_major()))
}

pub extern "C-unwind" fn efuse_hal_get_mac(mac: Word) -> Word {
    status(|p| {
        let out = ReeRegion::bytes(mac, MAC_LEN)?;
        // SAFETY: validated REE buffer, the only reference to it.
        unsafe { out.as_mut_slice() }.copy_from_slice(&p.efuse.mac());
        Ok(())
    })
}

pub extern "C-unwind" fn esp_efuse_check_secure_version(secure_version: Word) -> Word {
    flag(|p| Ok(p.efuse.check_secure_version(arg_u32(secure_version))))
}

/// Reads from the key blocks are refused.
pub extern "C-unwind" fn esp_efuse_read_field_blob(field: Word, dst: Word, dst_size_bits: Word) -> Word {
    status(|p| {
        let dst = ReeRegion::bytes(dst, dst_size_bits.div_ceil(8))?;

        let mut descs = [&UNUSED_DESC; MAX_EFUSE_FIELD_DESCS];
        let mut count = 0;
        loop {
            if count == MAX_EFUSE_FIELD_DESCS {
                return Err(ServiceError::InvalidArg);
            }
            let slot_addr = count
                .checked_mul(size_of::<Word>())
                .and_then(|off| field.checked_add(off))
                .ok_or(ServiceError::InvalidArg)?;
            let slot = ReeRegion::of::<Word>(slot_addr)?;
            if slot.overlaps(&dst) {
                return Err(ServiceError::InvalidArg);
            }
            // SAFETY: validated, read only.
            let desc_addr = unsafe { *slot.as_ref::<Word>() };
            if desc_addr == 0 {
                break;
            }

            let region = ReeRegion::of::<EfuseDesc>(desc_addr)?;
            if region.overlaps(&dst) {
                return Err(ServiceError::InvalidArg);
            }
            // SAFETY: validated, disjoint from the only mutable region.
            let desc = unsafe { region.as_ref::<EfuseDesc>() };
            if desc.efuse_block >= EFUSE_BLK_KEY0 {
                warn!(target: "tee_services", "eFuse read from key block {} refused", desc.efuse_block);
                return Err(ServiceError::InvalidArg);
            }
            descs[count] = desc;
            count += 1;
        }
        if count == 0 {
            return Err(ServiceError::InvalidArg);
        }

        // SAFETY: validated REE buffer, disjoint from every descriptor.
        let dst_bytes = unsafe { dst.as_mut_slice() };
        p.efuse.read_field_blob(&descs[..count], dst_bytes, dst_size_bits)
    })
}

/// Flash encryption is on while an odd number of `SPI_BOOT_CRYPT_CNT` bits
/// is set.
pub extern "C-unwind" fn esp_flash_encryption_enabled() -> Word {
    flag(|p| Ok(p.efuse.flash_crypt_cnt().count_ones() % 2 == 1))
}
