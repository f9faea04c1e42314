//! Use case orchestration for repoguard.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo, and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod report;

pub use check::{run_check, verdict_exit_code, CheckInput, CheckOutput, Validator};
pub use explain::{format_explanation, format_not_found, run_explain, ExplainOutput};
pub use report::{runtime_error_report, serialize_report, write_report};
