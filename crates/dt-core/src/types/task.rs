//! A single discovered file to convert.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use super::kind::FileKind;

/// Identifies one discovered file awaiting conversion.
///
/// A task is created once per discovered path and consumed exactly once
/// by the orchestrator.
///
/// # Examples
///
/// ```
/// use dt_core::{ConversionTask, FileKind};
/// use camino::Utf8Path;
///
/// let task = ConversionTask::classify(Utf8Path::new("/proj/src/app.ts")).unwrap();
/// assert_eq!(task.kind, FileKind::Module);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionTask {
    /// Absolute path to the source file.
    pub source_path: Utf8PathBuf,

    /// The file's kind, fixed at discovery time.
    pub kind: FileKind,
}

impl ConversionTask {
    /// Creates a task with an explicit kind.
    #[must_use]
    pub fn new(source_path: Utf8PathBuf, kind: FileKind) -> Self {
        Self { source_path, kind }
    }

    /// Classifies a path and creates a task for it.
    ///
    /// Returns `None` for paths that are not recognized input files.
    #[must_use]
    pub fn classify(source_path: &Utf8Path) -> Option<Self> {
        let kind = FileKind::classify(source_path)?;
        Some(Self::new(source_path.to_owned(), kind))
    }
}
