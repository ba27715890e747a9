//! Error types for the dt-scanner crate.

use camino::Utf8PathBuf;

/// Errors that can occur during directory discovery.
///
/// Walker and configuration errors are fatal; individual file problems
/// are handled downstream and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Failed to walk a directory.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Failed to read an ignore file.
    #[error("failed to read ignore file {path}: {source}")]
    IgnoreFile {
        /// The path of the ignore file that couldn't be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An ignore line could not be compiled into a glob.
    #[error("invalid ignore pattern {pattern:?}: {source}")]
    Pattern {
        /// The offending pattern line.
        pattern: String,
        /// The underlying glob error.
        #[source]
        source: globset::Error,
    },

    /// Invalid scanner configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A path is not valid UTF-8.
    ///
    /// This crate uses UTF-8 paths throughout. If a non-UTF-8 path is
    /// encountered, it cannot be processed.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),
}

impl ScanError {
    /// Creates a new [`ScanError::Config`] error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
