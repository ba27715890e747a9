//! Error types for the dt-core crate.
//!
//! This module provides the [`ConfigError`] type for option-validation
//! errors that can occur across the workspace.

use camino::Utf8PathBuf;

/// Errors that can occur while validating conversion options.
///
/// # Examples
///
/// ```
/// use dt_core::ConfigError;
/// use camino::Utf8PathBuf;
///
/// let error = ConfigError::MissingDirectory(Utf8PathBuf::from("/some/path"));
/// assert!(error.to_string().contains("/some/path"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required directory does not exist.
    #[error("missing required directory: {0}")]
    MissingDirectory(Utf8PathBuf),

    /// The target path exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(Utf8PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_display() {
        let error = ConfigError::MissingDirectory(Utf8PathBuf::from("/missing/dir"));
        assert!(error.to_string().contains("/missing/dir"));
    }

    #[test]
    fn test_not_a_directory_display() {
        let error = ConfigError::NotADirectory(Utf8PathBuf::from("/some/file.ts"));
        assert!(error.to_string().contains("/some/file.ts"));
    }
}
