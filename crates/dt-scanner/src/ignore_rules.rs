//! Ignore-pattern resolution from a project's `.gitignore`.
//!
//! The coordinator resolves ignore rules once per run, before discovery,
//! so every later step shares the same view of what is excluded. A
//! missing ignore file is not an error: the walk simply proceeds with no
//! exclusions, after a logged warning.

use camino::Utf8Path;
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};

use crate::error::ScanError;

/// The ignore file consulted at the conversion root.
const IGNORE_FILE: &str = ".gitignore";

/// Compiled ignore patterns for one conversion root.
///
/// Patterns are matched against paths relative to the root, which keeps
/// the rules independent of where the root itself lives.
#[derive(Debug, Default)]
pub struct IgnoreRules {
    set: GlobSet,
    patterns: Vec<String>,
}

impl IgnoreRules {
    /// Loads ignore rules from `<root>/.gitignore`.
    ///
    /// A missing file yields an empty rule set and a warning; every other
    /// read failure is an error. Negation lines (`!pattern`) are not
    /// supported and are skipped with a debug log.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::IgnoreFile`] if the file exists but cannot be
    /// read, or [`ScanError::Pattern`] if a line cannot be compiled.
    pub fn from_root(root: &Utf8Path) -> Result<Self, ScanError> {
        let path = root.join(IGNORE_FILE);

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path, "no ignore file found, converting everything");
                return Ok(Self::default());
            }
            Err(source) => return Err(ScanError::IgnoreFile { path, source }),
        };

        Self::from_lines(contents.lines())
    }

    /// Compiles ignore rules from raw pattern lines.
    pub fn from_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Result<Self, ScanError> {
        let mut builder = GlobSetBuilder::new();
        let mut patterns = Vec::new();

        for line in lines {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('!') {
                debug!(pattern = line, "skipping unsupported negation pattern");
                continue;
            }

            let pattern = line.trim_end_matches('/');
            // A bare name matches at any depth; anchored patterns
            // (containing a slash) match from the root only
            let anywhere = if pattern.contains('/') {
                pattern.trim_start_matches('/').to_owned()
            } else {
                format!("**/{pattern}")
            };

            for glob_text in [anywhere.clone(), format!("{anywhere}/**")] {
                let glob = Glob::new(&glob_text).map_err(|source| ScanError::Pattern {
                    pattern: line.to_owned(),
                    source,
                })?;
                builder.add(glob);
            }
            patterns.push(line.to_owned());
        }

        let set = builder.build().map_err(|source| ScanError::Pattern {
            pattern: String::new(),
            source,
        })?;

        debug!(count = patterns.len(), "compiled ignore patterns");
        Ok(Self { set, patterns })
    }

    /// Checks whether a root-relative path is excluded.
    #[must_use]
    pub fn is_ignored(&self, relative: &Utf8Path) -> bool {
        self.set.is_match(relative.as_std_path())
    }

    /// Returns the raw pattern lines that were compiled.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns `true` if no patterns were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
