//! Filesystem adapters: discover policy documents and parse them into the
//! domain tree.
//!
//! This crate is allowed to do filesystem IO; everything downstream of it
//! operates on in-memory documents.

#![forbid(unsafe_code)]

mod load;
mod scan;

pub use load::{load_document, parse_source, LoadError};
pub use scan::scan_documents;

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use repoguard_domain::model::DocumentKind;

    /// Parse arbitrary text as a ruleset (JSON) document.
    ///
    /// Returns `Ok(())` on valid JSON, `Err(...)` otherwise. **Never panics**
    /// on any input.
    pub fn parse_ruleset_source(text: &str) -> Result<(), String> {
        super::parse_source(text, DocumentKind::Ruleset).map(|_| ())
    }

    /// Parse arbitrary text as a workflow (YAML) document.
    ///
    /// Returns `Ok(())` on valid YAML, `Err(...)` otherwise. **Never panics**
    /// on any input.
    pub fn parse_workflow_source(text: &str) -> Result<(), String> {
        super::parse_source(text, DocumentKind::Workflow).map(|_| ())
    }
}
