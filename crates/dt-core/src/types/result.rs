//! Per-file conversion results.
//!
//! Conversion steps never unwind across the orchestrator boundary.
//! Failures are carried as data in [`Outcome::Failed`] so the coordinator
//! can record them and keep processing the batch.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// How a single file conversion ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The file was rewritten; the coordinator writes the new content.
    Converted,

    /// The file passed through without modification (ambient declarations,
    /// fence-less component files). No filesystem mutation takes place.
    Unchanged,

    /// Conversion failed; the message explains why. The result still
    /// carries the original content and path, so nothing is destroyed.
    Failed(String),
}

/// The output of converting one [`ConversionTask`](super::ConversionTask).
///
/// Invariant: on failure, `content` holds the best-effort original content
/// and `new_path` is the original (unrenamed) path. A failed file is never
/// relocated.
///
/// # Examples
///
/// ```
/// use dt_core::{Outcome, TransformResult};
/// use camino::Utf8PathBuf;
///
/// let ok = TransformResult::converted(Utf8PathBuf::from("a.js"), "const x = 1;".into());
/// assert!(ok.succeeded());
///
/// let err = TransformResult::failed(Utf8PathBuf::from("a.ts"), "src".into(), "syntax error".into());
/// assert_eq!(err.error_message(), Some("syntax error"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformResult {
    /// Where the converted content belongs.
    pub new_path: Utf8PathBuf,

    /// The converted content, or the original content on failure.
    pub content: String,

    /// How the conversion ended.
    pub outcome: Outcome,
}

impl TransformResult {
    /// Creates a successful result with rewritten content.
    #[must_use]
    pub fn converted(new_path: Utf8PathBuf, content: String) -> Self {
        Self {
            new_path,
            content,
            outcome: Outcome::Converted,
        }
    }

    /// Creates a pass-through result: original path, original content.
    #[must_use]
    pub fn unchanged(path: Utf8PathBuf, content: String) -> Self {
        Self {
            new_path: path,
            content,
            outcome: Outcome::Unchanged,
        }
    }

    /// Creates a failed result preserving the original path and content.
    #[must_use]
    pub fn failed(path: Utf8PathBuf, original_content: String, message: String) -> Self {
        Self {
            new_path: path,
            content: original_content,
            outcome: Outcome::Failed(message),
        }
    }

    /// Returns `true` unless the conversion failed.
    #[inline]
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        !matches!(self.outcome, Outcome::Failed(_))
    }

    /// The failure message, if any.
    #[inline]
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converted_succeeds() {
        let result = TransformResult::converted(Utf8PathBuf::from("a.js"), String::new());
        assert!(result.succeeded());
        assert_eq!(result.error_message(), None);
    }

    #[test]
    fn test_unchanged_succeeds() {
        let result = TransformResult::unchanged(Utf8PathBuf::from("a.d.ts"), String::new());
        assert!(result.succeeded());
        assert_eq!(result.outcome, Outcome::Unchanged);
    }

    #[test]
    fn test_failed_preserves_original() {
        let result = TransformResult::failed(
            Utf8PathBuf::from("a.ts"),
            "original source".to_owned(),
            "parse error".to_owned(),
        );
        assert!(!result.succeeded());
        assert_eq!(result.new_path, Utf8PathBuf::from("a.ts"));
        assert_eq!(result.content, "original source");
        assert_eq!(result.error_message(), Some("parse error"));
    }
}
