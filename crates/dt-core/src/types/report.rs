//! Batch-level conversion report.

use camino::Utf8PathBuf;
use serde::Serialize;

/// Aggregate result of a directory conversion run.
///
/// Built incrementally by the coordinator while the batch runs and
/// immutable once it completes. The report has no persistence beyond the
/// run; it is surfaced through logging and console output only.
///
/// # Examples
///
/// ```
/// use dt_core::ConversionReport;
/// use camino::Utf8PathBuf;
///
/// let mut report = ConversionReport::new();
/// report.record_converted();
/// report.record_failure(Utf8PathBuf::from("bad.ts"), "syntax error".into());
///
/// assert_eq!(report.converted, 1);
/// assert_eq!(report.failed(), 1);
/// assert!(!report.is_clean());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    /// Number of files successfully rewritten.
    pub converted: usize,

    /// Number of files passed through without modification.
    pub unchanged: usize,

    /// Every failure, in discovery order: `(source path, message)`.
    pub failures: Vec<(Utf8PathBuf, String)>,
}

impl ConversionReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one successfully converted file.
    pub fn record_converted(&mut self) {
        self.converted += 1;
    }

    /// Records one pass-through file.
    pub fn record_unchanged(&mut self) {
        self.unchanged += 1;
    }

    /// Records one failed file with its error message.
    pub fn record_failure(&mut self, path: Utf8PathBuf, message: String) {
        self.failures.push((path, message));
    }

    /// Number of failed files.
    #[inline]
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Total number of files the batch saw.
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.converted + self.unchanged + self.failures.len()
    }

    /// Returns `true` if no file failed.
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns `true` if a given source path is recorded as failed.
    #[must_use]
    pub fn is_failure(&self, path: &camino::Utf8Path) -> bool {
        self.failures.iter().any(|(p, _)| p == path)
    }
}
