//! Error types for the dt-transform crate.
//!
//! This module provides the [`TransformError`] type for errors that can
//! occur while parsing, rewriting, or regenerating a source file.

/// Errors that can occur during a single file transformation.
///
/// The engine never partially applies rules: any of these errors aborts
/// the transformation of the current file, and the orchestrator falls back
/// to preserving the original content.
///
/// # Examples
///
/// ```
/// use dt_transform::TransformError;
///
/// let err = TransformError::Syntax { line: 3, column: 7 };
/// assert!(err.to_string().contains("3:7"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Failed to set the TypeScript language on the parser.
    #[error("failed to set TypeScript language")]
    LanguageInit,

    /// The parser returned no tree.
    ///
    /// This typically indicates the parser ran out of memory or was
    /// cancelled.
    #[error("failed to parse source code")]
    Parse,

    /// The source does not conform to the expected dialect.
    ///
    /// Reported with the 1-indexed line and 0-indexed column of the first
    /// syntax error found in the tree.
    #[error("syntax error at {line}:{column}")]
    Syntax {
        /// 1-indexed line of the first error node.
        line: usize,
        /// 0-indexed column of the first error node.
        column: usize,
    },

    /// Two rewrite rules produced overlapping edits.
    ///
    /// Regeneration refuses to guess which edit wins; the whole file
    /// transformation fails instead.
    #[error("overlapping edits at byte offsets {first} and {second}")]
    OverlappingEdits {
        /// Start offset of the earlier edit.
        first: usize,
        /// Start offset of the conflicting edit.
        second: usize,
    },

    /// An edit range does not fall on a UTF-8 character boundary.
    #[error("edit range {start}..{end} is not on a character boundary")]
    InvalidRange {
        /// Start byte offset.
        start: usize,
        /// End byte offset.
        end: usize,
    },
}
