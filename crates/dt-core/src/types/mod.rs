//! Domain types for the detype tool.
//!
//! # Module Organization
//!
//! - [`kind`] - File classification by extension and name pattern
//! - [`task`] - A single discovered file to convert
//! - [`result`] - Per-file conversion results
//! - [`report`] - Batch-level aggregation
//!
//! All public types are re-exported at this module level and at the crate
//! root:
//!
//! ```
//! use dt_core::{ConversionTask, FileKind, TransformResult};
//! ```

mod kind;
mod report;
mod result;
mod task;

pub use kind::FileKind;
pub use report::ConversionReport;
pub use result::{Outcome, TransformResult};
pub use task::ConversionTask;
