//! Foundation types for revdiff.
//!
//! Every other revdiff crate depends on `revdiff-types`. It holds the values
//! that cross crate boundaries: the outcome envelope returned by every
//! fallible operation, validated revision identifiers, and changed-file paths.
//!
//! # Key Types
//!
//! - [`Outcome`] -- Success / partial / failure envelope with messages and errors
//! - [`Revision`] -- Validated opaque revision identifier (commit hash or ref)
//! - [`ChangedFile`] -- Repository-relative path touched between two revisions
//! - [`RevisionError`] -- Error taxonomy shared by gateway, differencer, and orchestrator

pub mod error;
pub mod outcome;
pub mod revision;

pub use error::RevisionError;
pub use outcome::{Outcome, Status};
pub use revision::{ChangedFile, Revision};
