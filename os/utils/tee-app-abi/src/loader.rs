//! Loader side of the application configuration handshake.
//!
//! The TEE locates the [`AppConfigHeader`] inside the REE image, refuses
//! images it cannot serve and then patches its own entry points into the two
//! blank secure fields.

use log::{debug, warn};
use tee_info::{
    REE_SRAM_START, SOC_MMU_VADDR_BASE, SOC_MMU_VADDR_END, SOC_SRAM_HIGH, SOC_SRAM_LOW,
    TEE_FLASH_VADDR_END,
};

use crate::{API_MAJOR_VERSION, API_MINOR_VERSION, APP_CFG_MAGIC, AppConfigHeader};

const OFF_MAGIC: usize = 0;
const OFF_MAJOR: usize = 4;
const OFF_MINOR: usize = 8;
const OFF_RESERVED: usize = 12;
const OFF_S_ENTRY: usize = 20;
const OFF_S_INT: usize = 24;
const OFF_NS_ENTRY: usize = 28;
const OFF_NS_INT: usize = 32;
const OFF_NS_IRAM_END: usize = 36;
const OFF_NS_IROM_END: usize = 40;
const OFF_NS_DROM_END: usize = 44;

const _: () = assert!(OFF_NS_DROM_END + 4 == AppConfigHeader::SIZE);

/// REE memory segment whose end address the header reports.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Region {
    Iram,
    Irom,
    Drom,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum AppConfigError {
    #[error("{len} bytes are too short for the application configuration")]
    TooShort { len: usize },
    #[error("bad magic word {found:#010x}")]
    BadMagic { found: u32 },
    #[error("unsupported API major version {found} (expected {expected})", expected = API_MAJOR_VERSION)]
    UnsupportedMajor { found: u32 },
    #[error("API minor version {found} is newer than {supported}", supported = API_MINOR_VERSION)]
    MinorTooNew { found: u32 },
    #[error("reserved words are not zero")]
    ReservedNotZero,
    #[error("secure entry fields are already set")]
    SecureFieldsNotBlank,
    #[error("{region:?} end {addr:#010x} lies outside its memory window")]
    RegionOutOfWindow { region: Region, addr: u32 },
    #[error("{region:?} end {addr:#010x} overlaps TEE memory")]
    RegionOverlapsSecure { region: Region, addr: u32 },
    #[error("{field} {addr:#010x} is not in REE code memory")]
    BadEntryPoint { field: &'static str, addr: u32 },
}

#[inline]
fn read_u32_le(buf: &[u8], off: usize) -> Result<u32, AppConfigError> {
    let too_short = AppConfigError::TooShort { len: buf.len() };
    let end = off.checked_add(4).ok_or(too_short)?;
    let s = buf.get(off..end).ok_or(too_short)?;
    Ok(u32::from_le_bytes([s[0], s[1], s[2], s[3]]))
}

#[inline]
fn write_u32_le(buf: &mut [u8], off: usize, value: u32) -> Result<(), AppConfigError> {
    let len = buf.len();
    let s = buf
        .get_mut(off..off + 4)
        .ok_or(AppConfigError::TooShort { len })?;
    s.copy_from_slice(&value.to_le_bytes());
    Ok(())
}

/// Read the header at the start of `blob`.
///
/// Only the length and the magic word are checked here; nothing else in the
/// header is trusted before the magic matches. Use
/// [`AppConfigHeader::validate`] before acting on the contents.
///
/// # Errors
/// [`AppConfigError::TooShort`] or [`AppConfigError::BadMagic`].
pub fn parse(blob: &[u8]) -> Result<AppConfigHeader, AppConfigError> {
    if blob.len() < AppConfigHeader::SIZE {
        return Err(AppConfigError::TooShort { len: blob.len() });
    }

    let magic_word = read_u32_le(blob, OFF_MAGIC)?;
    if magic_word != APP_CFG_MAGIC {
        return Err(AppConfigError::BadMagic { found: magic_word });
    }

    Ok(AppConfigHeader {
        magic_word,
        api_major_version: read_u32_le(blob, OFF_MAJOR)?,
        api_minor_version: read_u32_le(blob, OFF_MINOR)?,
        reserved: [
            read_u32_le(blob, OFF_RESERVED)?,
            read_u32_le(blob, OFF_RESERVED + 4)?,
        ],
        s_entry_addr: read_u32_le(blob, OFF_S_ENTRY)?,
        s_int_handler: read_u32_le(blob, OFF_S_INT)?,
        ns_entry_addr: read_u32_le(blob, OFF_NS_ENTRY)?,
        ns_int_handler: read_u32_le(blob, OFF_NS_INT)?,
        ns_iram_end: read_u32_le(blob, OFF_NS_IRAM_END)?,
        ns_irom_end: read_u32_le(blob, OFF_NS_IROM_END)?,
        ns_drom_end: read_u32_le(blob, OFF_NS_DROM_END)?,
    })
}

/// Check a region end against its window `[low, high]` and the secure part
/// `[low, secure_end]` at the bottom of it.
const fn check_region_end(
    region: Region,
    addr: u32,
    low: u32,
    secure_end: u32,
    high: u32,
) -> Result<(), AppConfigError> {
    if addr < low || addr > high {
        return Err(AppConfigError::RegionOutOfWindow { region, addr });
    }
    if addr <= secure_end {
        return Err(AppConfigError::RegionOverlapsSecure { region, addr });
    }
    Ok(())
}

/// REE code lives in non-secure SRAM or in the non-secure flash window.
const fn is_ree_code(addr: u32) -> bool {
    let in_sram = addr >= REE_SRAM_START && addr < SOC_SRAM_HIGH;
    let in_flash = addr >= TEE_FLASH_VADDR_END && addr < SOC_MMU_VADDR_END;
    in_sram || in_flash
}

impl AppConfigHeader {
    /// Check that the TEE can serve the image this header belongs to.
    ///
    /// # Errors
    /// The first failed check, in field order.
    pub fn validate(&self) -> Result<(), AppConfigError> {
        if self.magic_word != APP_CFG_MAGIC {
            return Err(AppConfigError::BadMagic {
                found: self.magic_word,
            });
        }
        if self.api_major_version != API_MAJOR_VERSION {
            return Err(AppConfigError::UnsupportedMajor {
                found: self.api_major_version,
            });
        }
        if self.api_minor_version > API_MINOR_VERSION {
            return Err(AppConfigError::MinorTooNew {
                found: self.api_minor_version,
            });
        }
        if self.reserved != [0; 2] {
            return Err(AppConfigError::ReservedNotZero);
        }
        if !self.secure_fields_blank() {
            return Err(AppConfigError::SecureFieldsNotBlank);
        }

        for (field, addr) in [
            ("ns_entry_addr", self.ns_entry_addr),
            ("ns_int_handler", self.ns_int_handler),
        ] {
            if !is_ree_code(addr) {
                return Err(AppConfigError::BadEntryPoint { field, addr });
            }
        }

        check_region_end(
            Region::Iram,
            self.ns_iram_end,
            SOC_SRAM_LOW,
            REE_SRAM_START,
            SOC_SRAM_HIGH,
        )?;
        check_region_end(
            Region::Irom,
            self.ns_irom_end,
            SOC_MMU_VADDR_BASE,
            TEE_FLASH_VADDR_END,
            SOC_MMU_VADDR_END,
        )?;
        check_region_end(
            Region::Drom,
            self.ns_drom_end,
            SOC_MMU_VADDR_BASE,
            TEE_FLASH_VADDR_END,
            SOC_MMU_VADDR_END,
        )
    }
}

/// Validate the header at the start of `blob` and patch the TEE's service
/// entry and interrupt handler into it.
///
/// Returns the header as it now reads from `blob`. The blob is left
/// untouched on error.
///
/// # Errors
/// Any [`AppConfigError`] from [`parse`] or [`AppConfigHeader::validate`];
/// a header whose secure fields are already set is refused.
pub fn patch_secure_fields(
    blob: &mut [u8],
    s_entry_addr: u32,
    s_int_handler: u32,
) -> Result<AppConfigHeader, AppConfigError> {
    let mut hdr = parse(blob)?;
    if let Err(e) = hdr.validate() {
        warn!(target: "tee_app_abi", "Refusing REE image: {e}");
        return Err(e);
    }

    write_u32_le(blob, OFF_S_ENTRY, s_entry_addr)?;
    write_u32_le(blob, OFF_S_INT, s_int_handler)?;
    hdr.s_entry_addr = s_entry_addr;
    hdr.s_int_handler = s_int_handler;

    debug!(
        target: "tee_app_abi",
        "REE app config v{}.{}: ns_entry={:#010x} s_entry={s_entry_addr:#010x} s_intr={s_int_handler:#010x}",
        hdr.api_major_version,
        hdr.api_minor_version,
        hdr.ns_entry_addr,
    );
    Ok(hdr)
}
