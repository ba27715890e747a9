#![deny(clippy::all)]
#![warn(missing_docs)]

//! Directory discovery for convertible files.
//!
//! This crate finds every file the converter knows how to handle under a
//! conversion root and classifies it up front, so the conversion pass
//! works from a fixed task list.
//!
//! # Overview
//!
//! Two pieces cooperate:
//!
//! - [`IgnoreRules`]: compiles the project's `.gitignore` (if any) into
//!   glob patterns matched against root-relative paths
//! - [`FileWalker`]: walks the tree, skips excluded directories, and
//!   classifies every remaining candidate into a
//!   [`ConversionTask`](dt_core::ConversionTask)
//!
//! # Example
//!
//! ```ignore
//! use dt_scanner::{FileWalker, IgnoreRules};
//! use camino::Utf8Path;
//!
//! let root = Utf8Path::new("./my-project");
//! let ignore = IgnoreRules::from_root(root)?;
//! let tasks = FileWalker::new(root)?.collect_tasks(&ignore)?;
//!
//! for task in &tasks {
//!     println!("{}: {}", task.kind.label(), task.source_path);
//! }
//! ```

mod error;
mod ignore_rules;
mod walker;

pub use error::ScanError;
pub use ignore_rules::IgnoreRules;
pub use walker::FileWalker;
