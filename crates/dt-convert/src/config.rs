//! Project configuration migration.
//!
//! `tsconfig.json` becomes a sibling `jsconfig.json` with its strictness
//! loosened. The rewrite is textual, not a parse-and-reserialize pass,
//! so comments and formatting in the file survive untouched. JSON-with-
//! comments is common in these config files and a strict JSON parser
//! would reject them.

use camino::{Utf8Path, Utf8PathBuf};

/// The configuration file name produced by migration.
const TARGET_CONFIG_NAME: &str = "jsconfig.json";

/// Returns the migrated path for a config file: a sibling
/// `jsconfig.json`.
#[must_use]
pub fn config_target_path(source: &Utf8Path) -> Utf8PathBuf {
    source.with_file_name(TARGET_CONFIG_NAME)
}

/// Replaces every `"strict": true` entry with `"checkJs": false`.
///
/// Everything else in the file, including comments, key order, and
/// indentation, is preserved. Occurrences where the value is not the
/// literal `true` are left alone.
#[must_use]
pub fn relax_strict_flag(source: &str) -> String {
    const KEY: &str = "\"strict\"";

    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(pos) = rest.find(KEY) {
        let (before, from_key) = rest.split_at(pos);
        let after_key = &from_key[KEY.len()..];

        if let Some(value_rest) = strict_true_value(after_key) {
            out.push_str(before);
            out.push_str("\"checkJs\": false");
            rest = value_rest;
        } else {
            out.push_str(before);
            out.push_str(KEY);
            rest = after_key;
        }
    }

    out.push_str(rest);
    out
}

/// If `after_key` starts with `: true` (modulo whitespace) at a value
/// boundary, returns the text following the `true` literal.
fn strict_true_value(after_key: &str) -> Option<&str> {
    let tail = after_key.trim_start().strip_prefix(':')?;
    let value_rest = tail.trim_start().strip_prefix("true")?;
    let at_boundary = value_rest
        .chars()
        .next()
        .is_none_or(|c| !c.is_ascii_alphanumeric());
    at_boundary.then_some(value_rest)
}
