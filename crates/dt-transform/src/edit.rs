//! Span edits and source regeneration.
//!
//! The engine does not rebuild source text from the syntax tree. Each
//! rewrite rule yields an [`Edit`] (a byte-range replacement against the
//! original text), and [`apply_edits`] plays the collected edits back in
//! order. Untouched source is preserved byte-for-byte, including comments
//! and formatting.

use crate::error::TransformError;

/// A single replacement of a byte range in the original source.
///
/// The range is half-open (`start..end`). An empty range is an insertion;
/// an empty replacement is a deletion.
///
/// # Examples
///
/// ```
/// use dt_transform::edit::{Edit, apply_edits};
///
/// let edits = vec![Edit::replace(0, 3, "let".to_owned())];
/// let out = apply_edits("var x = 1;", edits).unwrap();
/// assert_eq!(out, "let x = 1;");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Byte offset where the replaced range starts.
    pub start: usize,
    /// Byte offset one past the end of the replaced range.
    pub end: usize,
    /// Replacement text (may be empty).
    pub text: String,
}

impl Edit {
    /// Creates a replacement edit.
    #[must_use]
    pub fn replace(start: usize, end: usize, text: String) -> Self {
        Self { start, end, text }
    }

    /// Creates a deletion edit.
    #[must_use]
    pub fn remove(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            text: String::new(),
        }
    }

    /// Creates an insertion edit at a single position.
    #[must_use]
    pub fn insert(at: usize, text: String) -> Self {
        Self {
            start: at,
            end: at,
            text,
        }
    }

    /// Returns `true` if this edit inserts without removing anything.
    #[inline]
    #[must_use]
    pub const fn is_insertion(&self) -> bool {
        self.start == self.end
    }
}

/// Applies a set of edits to the source, producing the rewritten text.
///
/// Edits are sorted by start offset. Touching ranges are allowed (the
/// ranges are half-open); genuinely overlapping ranges mean two rules
/// fought over the same span and the transformation fails.
///
/// # Errors
///
/// - [`TransformError::OverlappingEdits`] if two edits overlap.
/// - [`TransformError::InvalidRange`] if a range is out of bounds or not
///   on a character boundary.
pub fn apply_edits(source: &str, mut edits: Vec<Edit>) -> Result<String, TransformError> {
    edits.sort_by_key(|e| (e.start, e.end));

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;

    for edit in &edits {
        if edit.start < cursor {
            return Err(TransformError::OverlappingEdits {
                first: cursor,
                second: edit.start,
            });
        }
        let gap = source
            .get(cursor..edit.start)
            .ok_or(TransformError::InvalidRange {
                start: cursor,
                end: edit.start,
            })?;
        out.push_str(gap);
        // Validate the replaced range itself before skipping it
        source
            .get(edit.start..edit.end)
            .ok_or(TransformError::InvalidRange {
                start: edit.start,
                end: edit.end,
            })?;
        out.push_str(&edit.text);
        cursor = edit.end;
    }

    let tail = source.get(cursor..).ok_or(TransformError::InvalidRange {
        start: cursor,
        end: source.len(),
    })?;
    out.push_str(tail);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_edits_is_identity() {
        let src = "const x = 1;\n";
        assert_eq!(apply_edits(src, Vec::new()).unwrap(), src);
    }

    #[test]
    fn test_single_removal() {
        let src = "let x: number = 1;";
        let edits = vec![Edit::remove(5, 13)];
        assert_eq!(apply_edits(src, edits).unwrap(), "let x = 1;");
    }

    #[test]
    fn test_insertion() {
        let src = "const x = 1;";
        let edits = vec![Edit::insert(12, "\nexports.x = x;".to_owned())];
        assert_eq!(
            apply_edits(src, edits).unwrap(),
            "const x = 1;\nexports.x = x;"
        );
    }

    #[test]
    fn test_out_of_order_edits_are_sorted() {
        let src = "abcdef";
        let edits = vec![Edit::replace(4, 5, "E".to_owned()), Edit::remove(0, 1)];
        assert_eq!(apply_edits(src, edits).unwrap(), "bcdEf");
    }

    #[test]
    fn test_touching_ranges_allowed() {
        let src = "abcdef";
        let edits = vec![Edit::remove(0, 3), Edit::replace(3, 6, "x".to_owned())];
        assert_eq!(apply_edits(src, edits).unwrap(), "x");
    }

    #[test]
    fn test_overlap_is_an_error() {
        let src = "abcdef";
        let edits = vec![Edit::remove(0, 4), Edit::remove(2, 6)];
        assert!(matches!(
            apply_edits(src, edits),
            Err(TransformError::OverlappingEdits { .. })
        ));
    }

    #[test]
    fn test_range_past_end_is_an_error() {
        let src = "abc";
        let edits = vec![Edit::remove(0, 10)];
        assert!(matches!(
            apply_edits(src, edits),
            Err(TransformError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_non_char_boundary_is_an_error() {
        let src = "é";
        let edits = vec![Edit::remove(1, 2)];
        assert!(matches!(
            apply_edits(src, edits),
            Err(TransformError::InvalidRange { .. })
        ));
    }
}
