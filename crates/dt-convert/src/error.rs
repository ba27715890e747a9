//! Error types for the dt-convert crate.
//!
//! Only errors that abort a whole run live here. Problems with a single
//! file are captured as a failed outcome in the report and never become
//! a [`ConvertError`].

use dt_core::ConfigError;
use dt_scanner::ScanError;

/// Errors that abort a directory conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The conversion options are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Discovery failed before any file was converted.
    #[error(transparent)]
    Scan(#[from] ScanError),
}
