//! Interrupt matrix routing and CPU interrupt control.

use tee_app_abi::Word;

use super::{arg_i32, arg_u32, status};
use crate::abi::IntrType;
use crate::error::ServiceError;

pub extern "C-unwind" fn esp_rom_route_intr_matrix(cpu_no: Word, model_num: Word, intr_num: Word) -> Word {
    status(|p| {
        p.interrupts
            .route_intr_matrix(arg_i32(cpu_no), arg_u32(model_num), arg_u32(intr_num));
        Ok(())
    })
}

pub extern "C-unwind" fn rv_utils_intr_enable(intr_mask: Word) -> Word {
    status(|p| {
        p.interrupts.intr_enable(arg_u32(intr_mask));
        Ok(())
    })
}

pub extern "C-unwind" fn rv_utils_intr_disable(intr_mask: Word) -> Word {
    status(|p| {
        p.interrupts.intr_disable(arg_u32(intr_mask));
        Ok(())
    })
}

pub extern "C-unwind" fn rv_utils_intr_set_priority(rv_int_num: Word, priority: Word) -> Word {
    status(|p| {
        p.interrupts.set_priority(arg_i32(rv_int_num), arg_u32(priority));
        Ok(())
    })
}

pub extern "C-unwind" fn rv_utils_intr_set_type(intr_num: Word, ty: Word) -> Word {
    status(|p| {
        let ty = IntrType::from_raw(arg_u32(ty)).ok_or(ServiceError::InvalidArg)?;
        p.interrupts.set_type(arg_i32(intr_num), ty);
        Ok(())
    })
}

pub extern "C-unwind" fn rv_utils_intr_set_threshold(priority_threshold: Word) -> Word {
    status(|p| {
        p.interrupts.set_threshold(arg_i32(priority_threshold));
        Ok(())
    })
}

pub extern "C-unwind" fn rv_utils_intr_edge_ack(intr_num: Word) -> Word {
    status(|p| {
        p.interrupts.edge_ack(arg_u32(intr_num));
        Ok(())
    })
}

pub extern "C-unwind" fn rv_utils_intr_global_enable() -> Word {
    status(|p| {
        p.interrupts.global_enable();
        Ok(())
    })
}
