//! Watchdog HAL.

use tee_app_abi::Word;

use super::{arg_bool, arg_u32, status};
use crate::abi::{WdtHalContext, WdtInst};
use crate::error::ServiceError;
use crate::ree_mem::ReeRegion;

pub extern "C-unwind" fn wdt_hal_init(hal: Word, inst: Word, prescaler: Word, enable_intr: Word) -> Word {
    status(|p| {
        let inst = WdtInst::from_raw(arg_u32(inst)).ok_or(ServiceError::InvalidArg)?;
        let hal = ReeRegion::of::<WdtHalContext>(hal)?;
        // SAFETY: validated, the only reference to the context.
        let hal = unsafe { hal.as_mut::<WdtHalContext>() };
        p.watchdog.init(hal, inst, arg_u32(prescaler), arg_bool(enable_intr));
        Ok(())
    })
}

pub extern "C-unwind" fn wdt_hal_deinit(hal: Word) -> Word {
    status(|p| {
        let hal = ReeRegion::of::<WdtHalContext>(hal)?;
        // SAFETY: as above.
        p.watchdog.deinit(unsafe { hal.as_mut::<WdtHalContext>() });
        Ok(())
    })
}

#[cfg(test)]
mod test {
    use core::ptr;

    use tee_app_abi::{ServiceId, Word};

    use crate::abi::WdtHalContext;
    use crate::error::{ESP_ERR_INVALID_ARG, i32_word};
    use crate::mock;

    #[test]
    fn init_and_deinit_touch_the_context() {
        mock::install();
        let mut hal = WdtHalContext::default();
        let hal_addr = ptr::from_mut(&mut hal) as Word;
        assert_eq!(mock::call(ServiceId::WdtHalInit, &[hal_addr, 2, 40, 1]), 0);
        assert_eq!(hal.inst, 2);
        assert_eq!(hal.dev, 40);
        assert_eq!(mock::call(ServiceId::WdtHalDeinit, &[hal_addr]), 0);
        assert_eq!(hal, WdtHalContext::default());
    }

    #[test]
    fn unknown_instance_is_refused() {
        mock::install();
        let mut hal = WdtHalContext::default();
        let ret = mock::call(ServiceId::WdtHalInit, &[ptr::from_mut(&mut hal) as Word, 3, 40, 0]);
        assert_eq!(ret, i32_word(ESP_ERR_INVALID_ARG));
    }
}
