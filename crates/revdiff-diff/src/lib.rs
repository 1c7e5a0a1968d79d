//! Structural JSON differencer for revdiff.
//!
//! Compares two parsed JSON object documents and produces an itemized,
//! ordered list of property-level differences.
//!
//! # Key Types
//!
//! - [`DiffReport`] / [`DiffEntry`] / [`DiffKind`] -- Ordered property-level differences
//! - [`DiffOptions`] / [`DiffMode`] -- Shallow (top-level) or recursive comparison
//! - [`diff_documents`] -- The comparison entry point
//! - [`parse_document`] -- Parse raw file bytes into a JSON value

pub mod document_diff;
pub mod error;
pub mod report;

pub use document_diff::{
    diff_documents, diff_documents_with, parse_document, values_equal, DiffMode, DiffOptions,
};
pub use error::{DiffError, DiffResult, Side};
pub use report::{DiffEntry, DiffKind, DiffReport, NO_DIFFERENCES};
