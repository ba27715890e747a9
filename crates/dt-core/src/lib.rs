//! Core types, errors, and utilities for the detype tool.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`FileKind`] and [`ConversionTask`] for classifying discovered files
//! - [`TransformResult`] and [`Outcome`] for per-file conversion results
//! - [`ConversionReport`] for batch-level aggregation
//! - [`ConvertOptions`] for caller-supplied configuration
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std)

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod hash;
pub mod options;
pub mod types;

pub use error::ConfigError;
pub use hash::{FxBuildHasher, FxHashMap, FxHashSet, fx_hash_map, fx_hash_set};
pub use options::ConvertOptions;
pub use types::{ConversionReport, ConversionTask, FileKind, Outcome, TransformResult};
