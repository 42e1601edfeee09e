//! One-time setup of the secure services.

use log::{LevelFilter, info};
use tee_console::UartLogger;

use crate::boundary::{self, SecureRegionBounds, SecureRegionError};
use crate::platform::{self, Platform};

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum BootError {
    #[error("a logger is already installed")]
    Logger,
    #[error(transparent)]
    SecureRegion(#[from] SecureRegionError),
    #[error("a platform is already installed")]
    Platform,
}

/// Boot-time settings.
#[derive(Copy, Clone)]
pub struct BootConfig {
    pub platform: Platform,
    /// `None` keeps the bounds of the partition layout.
    pub secure_region: Option<SecureRegionBounds>,
    pub log_level: LevelFilter,
}

/// Install the console logger, the secure region and the platform, in that
/// order. Must run before the REE is started.
///
/// # Errors
/// The first step that had already been done, or
/// [`SecureRegionError::Unaligned`] for bounds inside MMU pages.
pub fn init(config: BootConfig) -> Result<(), BootError> {
    UartLogger::new(config.log_level)
        .init()
        .map_err(|_| BootError::Logger)?;

    let bounds = config.secure_region.unwrap_or_else(SecureRegionBounds::from_layout);
    boundary::install_secure_region(bounds)?;
    platform::install(config.platform).map_err(|_| BootError::Platform)?;

    info!(
        target: "tee_services",
        "secure services ready, secure flash {:?} mapped at {:?}",
        bounds.paddr,
        bounds.vaddr
    );
    Ok(())
}
