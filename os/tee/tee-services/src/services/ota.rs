//! Update of the passive secure-partition slot.

use tee_app_abi::Word;

use super::{arg_u32, status};
use crate::ree_mem::ReeRegion;

pub extern "C-unwind" fn esp_tee_ota_begin() -> Word {
    status(|p| p.ota.begin())
}

pub extern "C-unwind" fn esp_tee_ota_write(rel_offset: Word, data: Word, size: Word) -> Word {
    status(|p| {
        let data = ReeRegion::bytes(data, size)?;
        // SAFETY: validated, read only.
        p.ota.write(arg_u32(rel_offset), unsafe { data.as_slice() })
    })
}

pub extern "C-unwind" fn esp_tee_ota_end() -> Word {
    status(|p| p.ota.end())
}

#[cfg(test)]
mod test {
    use core::ptr;

    use tee_app_abi::{ServiceId, Word};

    use crate::error::{ESP_ERR_INVALID_STATE, i32_word};
    use crate::mock;

    #[test]
    fn image_is_streamed_between_begin_and_end() {
        mock::install();
        let chunk = [0xA5u8; 16];
        let addr = ptr::from_ref(&chunk) as Word;

        assert_eq!(mock::call(ServiceId::EspTeeOtaWrite, &[0, addr, 16]), i32_word(ESP_ERR_INVALID_STATE));
        assert_eq!(mock::call(ServiceId::EspTeeOtaBegin, &[]), 0);
        assert_eq!(mock::call(ServiceId::EspTeeOtaWrite, &[0, addr, 16]), 0);
        assert_eq!(mock::call(ServiceId::EspTeeOtaWrite, &[16, addr, 8]), 0);
        assert_eq!(mock::ota_written(), 24);
        assert_eq!(mock::call(ServiceId::EspTeeOtaEnd, &[]), 0);
        assert_eq!(mock::call(ServiceId::EspTeeOtaEnd, &[]), i32_word(ESP_ERR_INVALID_STATE));
    }
}
