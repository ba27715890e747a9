//! Directory traversal for convertible files.
//!
//! This module provides [`FileWalker`], which walks a directory tree and
//! classifies every file the converter knows how to handle into a
//! [`ConversionTask`]. Exclusions come from two places: a built-in list
//! of directories that never hold project sources, and the project's own
//! ignore rules resolved by [`IgnoreRules`](crate::IgnoreRules).

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;
use tracing::debug;

use dt_core::{ConversionTask, FileKind};

use crate::error::ScanError;
use crate::ignore_rules::IgnoreRules;

/// Default directories to skip during discovery.
///
/// These hold third-party or generated code that should never be
/// converted in place.
const SKIP_DIRECTORIES: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    ".git",
    ".astro",
    "coverage",
    ".turbo",
    ".next",
    ".nuxt",
];

/// A file walker that discovers convertible files in a directory tree.
///
/// Discovery is a single pass: the walker collects and classifies every
/// candidate up front, and the resulting task list is sorted by path so
/// conversion order and report order are stable across runs.
#[derive(Debug)]
pub struct FileWalker {
    /// The root directory to walk.
    root: Utf8PathBuf,
    /// Additional directories to skip (beyond the built-in list).
    skip_dirs: Vec<String>,
    /// Whether to follow symbolic links.
    follow_links: bool,
}

impl FileWalker {
    /// Creates a new file walker for the given root directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if the root path doesn't exist or
    /// isn't a directory.
    pub fn new(root: &Utf8Path) -> Result<Self, ScanError> {
        if !root.exists() {
            return Err(ScanError::config(format!(
                "root path does not exist: {root}"
            )));
        }
        if !root.is_dir() {
            return Err(ScanError::config(format!(
                "root path is not a directory: {root}"
            )));
        }

        Ok(Self {
            root: root.to_owned(),
            skip_dirs: Vec::new(),
            follow_links: false,
        })
    }

    /// Adds directories to skip during traversal.
    ///
    /// These are in addition to the built-in skip list (`node_modules`,
    /// `dist`, and friends).
    #[must_use]
    pub fn with_skip_dirs<S: AsRef<str>>(mut self, dirs: &[S]) -> Self {
        self.skip_dirs
            .extend(dirs.iter().map(|d| d.as_ref().to_owned()));
        self
    }

    /// Configures whether to follow symbolic links.
    ///
    /// By default, symbolic links are not followed.
    #[must_use]
    pub const fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Collects every convertible file under the root as a
    /// [`ConversionTask`], sorted by path.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Walk`] if directory traversal fails and
    /// [`ScanError::NonUtf8Path`] if a non-UTF-8 path is encountered.
    pub fn collect_tasks(&self, ignore: &IgnoreRules) -> Result<Vec<ConversionTask>, ScanError> {
        let mut tasks = Vec::new();

        for result in self.build_walker() {
            let entry = result?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let utf8_path =
                Utf8Path::from_path(path).ok_or_else(|| ScanError::NonUtf8Path(path.to_owned()))?;

            let Some(kind) = FileKind::classify(utf8_path) else {
                continue;
            };

            if self.should_skip_path(utf8_path) {
                continue;
            }

            let relative = utf8_path.strip_prefix(&self.root).unwrap_or(utf8_path);
            if ignore.is_ignored(relative) {
                debug!(path = %relative, "excluded by ignore rules");
                continue;
            }

            tasks.push(ConversionTask::new(utf8_path.to_owned(), kind));
        }

        tasks.sort_by(|a, b| a.source_path.cmp(&b.source_path));
        debug!(count = tasks.len(), root = %self.root, "discovered convertible files");
        Ok(tasks)
    }

    /// Builds the underlying walker.
    ///
    /// Project ignore rules are applied by [`IgnoreRules`], not by the
    /// walker, so every run reports the same view of the tree whether or
    /// not the root is a git repository.
    fn build_walker(&self) -> ignore::Walk {
        WalkBuilder::new(&self.root)
            .standard_filters(false)
            .hidden(true)
            .follow_links(self.follow_links)
            .threads(1)
            .require_git(false)
            .build()
    }

    /// Checks if a path should be skipped based on directory name.
    fn should_skip_path(&self, path: &Utf8Path) -> bool {
        for component in path.components() {
            let component_str = component.as_str();

            if SKIP_DIRECTORIES.contains(&component_str) {
                return true;
            }
            if self.skip_dirs.iter().any(|d| d == component_str) {
                return true;
            }
        }

        false
    }

    /// Returns the root directory being walked.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_owned()).expect("utf-8 tempdir");
        (dir, root)
    }

    fn touch(root: &Utf8Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdirs");
        }
        fs::write(path, "const x = 1;\n").expect("write");
    }

    #[test]
    fn test_new_rejects_missing_root() {
        let err = FileWalker::new(Utf8Path::new("/definitely/not/here"))
            .expect_err("missing root should fail");
        assert!(matches!(err, ScanError::Config(_)));
    }

    #[test]
    fn test_collects_and_classifies() {
        let (_dir, root) = temp_root();
        touch(&root, "src/app.ts");
        touch(&root, "src/widget.tsx");
        touch(&root, "pages/index.astro");
        touch(&root, "src/env.d.ts");
        touch(&root, "tsconfig.json");
        touch(&root, "README.md");
        touch(&root, "src/plain.js");

        let walker = FileWalker::new(&root).expect("walker");
        let tasks = walker
            .collect_tasks(&IgnoreRules::default())
            .expect("collect");

        let kinds: Vec<(String, FileKind)> = tasks
            .iter()
            .map(|t| {
                let rel = t.source_path.strip_prefix(&root).expect("relative");
                (rel.to_string(), t.kind)
            })
            .collect();

        assert_eq!(
            kinds,
            vec![
                ("pages/index.astro".to_owned(), FileKind::ComponentMarkup),
                ("src/app.ts".to_owned(), FileKind::Module),
                ("src/env.d.ts".to_owned(), FileKind::AmbientDeclaration),
                ("src/widget.tsx".to_owned(), FileKind::Module),
                ("tsconfig.json".to_owned(), FileKind::Config),
            ]
        );
    }

    #[test]
    fn test_skip_directories_excluded() {
        let (_dir, root) = temp_root();
        touch(&root, "src/app.ts");
        touch(&root, "node_modules/pkg/index.ts");
        touch(&root, "dist/app.ts");
        touch(&root, "vendor/lib.ts");

        let walker = FileWalker::new(&root)
            .expect("walker")
            .with_skip_dirs(&["vendor"]);
        let tasks = walker
            .collect_tasks(&IgnoreRules::default())
            .expect("collect");

        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].source_path.ends_with("src/app.ts"));
    }

    #[test]
    fn test_ignore_rules_applied_relative_to_root() {
        let (_dir, root) = temp_root();
        touch(&root, "src/app.ts");
        touch(&root, "generated/api.ts");

        let ignore =
            IgnoreRules::from_lines(["generated"].into_iter()).expect("patterns compile");
        let walker = FileWalker::new(&root).expect("walker");
        let tasks = walker.collect_tasks(&ignore).expect("collect");

        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].source_path.ends_with("src/app.ts"));
    }

    #[test]
    fn test_hidden_files_skipped() {
        let (_dir, root) = temp_root();
        touch(&root, "src/app.ts");
        touch(&root, ".cache/stale.ts");

        let walker = FileWalker::new(&root).expect("walker");
        let tasks = walker
            .collect_tasks(&IgnoreRules::default())
            .expect("collect");

        assert_eq!(tasks.len(), 1);
    }
}
