//! Platform-agnostic building blocks: configuration, file intake, the
//! analysis client and small formatting helpers.

pub mod analysis;
pub mod config;
pub mod format;
pub mod intake;
pub mod platform;
pub mod preview;
pub mod theme;
