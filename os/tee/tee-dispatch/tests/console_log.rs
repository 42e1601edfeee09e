use log::LevelFilter;
use tee_app_abi::{MAX_SECURE_SERVICES, SERVICE_CALL_FAILED, Word};
use tee_console::{UartLogger, uart_fmt};
use tee_dispatch::{ServiceFn, ServiceTable, WordCursor, dispatch};

extern "C-unwind" fn invalid() -> Word {
    panic!("invalid secure service");
}

static TABLE: ServiceTable = ServiceTable::new(ServiceFn::Args0(invalid));

#[test]
fn refusals_are_logged_with_received_and_permitted() {
    UartLogger::new(LevelFilter::Error).init().unwrap();

    assert_eq!(
        dispatch(&TABLE, 12, &mut WordCursor::new(&[0; 12])),
        SERVICE_CALL_FAILED
    );
    assert_eq!(
        dispatch(&TABLE, 1, &mut WordCursor::new(&[MAX_SECURE_SERVICES + 3])),
        SERVICE_CALL_FAILED
    );

    uart_fmt::with_captured(|out| {
        assert!(out.contains(
            "[ERROR] tee_dispatch: Input arguments overflow! Received 12, Permitted 10\n"
        ));
        assert!(out.contains(&format!(
            "[ERROR] tee_dispatch: Invalid Service ID! Received {}, Permitted < {MAX_SECURE_SERVICES}\n",
            MAX_SECURE_SERVICES + 3
        )));
    });
}
