//! Services exercised by the REE-side test applications.
//!
//! Operands are `uint32_t` and so is the arithmetic.

use log::info;
use tee_app_abi::Word;

use super::arg_u32;

pub extern "C-unwind" fn dummy_secure_service() -> Word {
    info!(target: "tee_services", "Dummy secure service");
    0
}

pub extern "C-unwind" fn esp_tee_service_add(a: Word, b: Word) -> Word {
    arg_u32(a).wrapping_add(arg_u32(b)) as Word
}

pub extern "C-unwind" fn esp_tee_service_sub(a: Word, b: Word) -> Word {
    arg_u32(a).wrapping_sub(arg_u32(b)) as Word
}

pub extern "C-unwind" fn esp_tee_service_mul(a: Word, b: Word) -> Word {
    arg_u32(a).wrapping_mul(arg_u32(b)) as Word
}

/// Division by zero yields zero.
pub extern "C-unwind" fn esp_tee_service_div(a: Word, b: Word) -> Word {
    arg_u32(a).checked_div(arg_u32(b)).unwrap_or(0) as Word
}
