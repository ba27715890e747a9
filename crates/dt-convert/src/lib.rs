#![deny(clippy::all)]
#![warn(missing_docs)]

//! Batch conversion of TypeScript projects to plain JavaScript.
//!
//! This crate ties the pipeline together: discovery from `dt-scanner`,
//! per-file rewriting from `dt-transform`, and the filesystem work that
//! turns one into the other. The conversion is in place and lossy by
//! design: types are erased, not checked.
//!
//! # Overview
//!
//! - [`convert_directory`]: runs a whole conversion and returns a
//!   [`ConversionReport`](dt_core::ConversionReport)
//! - [`convert_file`] / [`convert_source`]: convert a single file,
//!   never failing the caller; problems become a failed outcome
//! - [`relax_strict_flag`] / [`config_target_path`]: the config
//!   migration primitives
//!
//! # Example
//!
//! ```ignore
//! use dt_convert::convert_directory;
//! use dt_core::ConvertOptions;
//! use camino::Utf8Path;
//!
//! let report = convert_directory(&ConvertOptions::new(Utf8Path::new("./my-project")))?;
//! println!("{} converted, {} failed", report.converted, report.failed());
//! ```

mod config;
mod coordinator;
mod error;
mod file;

pub use config::{config_target_path, relax_strict_flag};
pub use coordinator::convert_directory;
pub use error::ConvertError;
pub use file::{convert_file, convert_source};
