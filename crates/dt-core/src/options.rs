//! Caller-supplied options for a conversion run.
//!
//! [`ConvertOptions`] carries the root directory and traversal settings.
//! It is built once by the invoking caller (the CLI) and threaded
//! explicitly through the coordinator, orchestrator, and engine; there is
//! no global configuration state.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Options for converting a directory tree.
///
/// # Examples
///
/// ```
/// use dt_core::ConvertOptions;
/// use camino::Utf8Path;
///
/// let options = ConvertOptions::new(Utf8Path::new("."))
///     .with_skip_dirs(&["vendor"]);
/// assert_eq!(options.root, Utf8Path::new("."));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Root directory whose tree is converted.
    pub root: Utf8PathBuf,

    /// Additional directory names to skip during discovery.
    pub skip_dirs: Vec<String>,

    /// Whether to follow symbolic links during discovery.
    pub follow_links: bool,
}

impl ConvertOptions {
    /// Creates options for the given root directory.
    #[must_use]
    pub fn new(root: &Utf8Path) -> Self {
        Self {
            root: root.to_owned(),
            skip_dirs: Vec::new(),
            follow_links: false,
        }
    }

    /// Adds directory names to skip during discovery.
    ///
    /// These are in addition to the default skip list (`node_modules`,
    /// `dist`, `.git`, ...).
    #[must_use]
    pub fn with_skip_dirs(mut self, dirs: &[&str]) -> Self {
        self.skip_dirs.extend(dirs.iter().map(ToString::to_string));
        self
    }

    /// Configures whether to follow symbolic links.
    #[must_use]
    pub const fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Validates that the root exists and is a directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDirectory`] if the root does not exist,
    /// or [`ConfigError::NotADirectory`] if it is not a directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.root.exists() {
            return Err(ConfigError::MissingDirectory(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(ConfigError::NotADirectory(self.root.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_skip_dirs() {
        let options = ConvertOptions::new(Utf8Path::new(".")).with_skip_dirs(&["vendor", "gen"]);
        assert!(options.skip_dirs.contains(&"vendor".to_owned()));
        assert!(options.skip_dirs.contains(&"gen".to_owned()));
    }

    #[test]
    fn test_validate_missing_root() {
        let options = ConvertOptions::new(Utf8Path::new("/definitely/not/here"));
        assert!(matches!(
            options.validate(),
            Err(ConfigError::MissingDirectory(_))
        ));
    }

    #[test]
    fn test_validate_existing_root() {
        let options = ConvertOptions::new(Utf8Path::new("."));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_serialization_round_trip() {
        let options = ConvertOptions::new(Utf8Path::new("./src")).with_follow_links(true);
        let json = serde_json::to_string(&options).unwrap();
        let parsed: ConvertOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(options, parsed);
    }
}
