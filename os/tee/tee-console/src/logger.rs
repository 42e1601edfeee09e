use crate::uart_trace;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use tee_sync::SyncOnceCell;

static LOGGER: SyncOnceCell<UartLogger> = SyncOnceCell::new();

pub struct UartLogger {
    max_level: LevelFilter,
}

impl UartLogger {
    #[must_use]
    pub const fn new(max_level: LevelFilter) -> Self {
        Self { max_level }
    }

    /// Install as the global logger. Call once during early init.
    ///
    /// # Errors
    /// If another logger (or an earlier `UartLogger`) is already installed.
    pub fn init(self) -> Result<(), SetLoggerError> {
        let max_level = self.max_level;
        let logger = match LOGGER.set(self) {
            Ok(logger) => logger,
            Err(_) => LOGGER.wait(),
        };
        log::set_logger(logger)?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl Log for UartLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        uart_trace!(
            "[{}] {}: {}\n",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}
