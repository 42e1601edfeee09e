//! Calls through the exported entry point, without a platform installed.

use tee_app_abi::{SERVICE_CALL_FAILED, ServiceId, Word};
use tee_services::error::{ESP_ERR_INVALID_STATE, i32_word};
use tee_services::esp_tee_service_dispatcher;

fn call(words: &[Word]) -> Word {
    // SAFETY: `words` holds `words.len()` readable words.
    unsafe { esp_tee_service_dispatcher(words.len(), words.as_ptr()) }
}

#[test]
fn arithmetic_services_answer_without_a_platform() {
    assert_eq!(call(&[ServiceId::EspTeeServiceAdd.as_raw(), 40, 2]), 42);
    assert_eq!(call(&[ServiceId::EspTeeServiceMul.as_raw(), 6, 7]), 42);
    assert_eq!(call(&[ServiceId::DummySecureService.as_raw()]), 0);
}

#[test]
fn hardware_services_report_missing_platform() {
    assert_eq!(
        call(&[ServiceId::EspTeeOtaBegin.as_raw()]),
        i32_word(ESP_ERR_INVALID_STATE)
    );
    assert_eq!(call(&[ServiceId::EspFlashEncryptionEnabled.as_raw()]), 0);
    assert_eq!(call(&[ServiceId::EfuseHalChipRevision.as_raw()]), 0);
}

#[test]
fn refused_calls_return_the_sentinel() {
    assert_eq!(call(&[ServiceId::EspTeeServiceAdd.as_raw(); 11]), SERVICE_CALL_FAILED);
    assert_eq!(call(&[50, 1, 2]), SERVICE_CALL_FAILED);
    assert_eq!(call(&[]), SERVICE_CALL_FAILED);
    // SAFETY: a null cursor is never read past `argc == 0`.
    assert_eq!(unsafe { esp_tee_service_dispatcher(0, core::ptr::null()) }, SERVICE_CALL_FAILED);
}

#[test]
#[should_panic(expected = "invalid secure service")]
fn service_zero_halts() {
    call(&[ServiceId::InvalidSecureService.as_raw()]);
}
