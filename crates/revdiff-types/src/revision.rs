//! Revision identifiers and changed-file paths.
//!
//! Valid revisions:
//! - Must be non-empty
//! - Must not contain whitespace or control characters
//! - Must not contain `..` (it separates the two sides of a range)
//! - Must not contain `?`, `#`, `&` or `\` (they would corrupt request URLs)
//!
//! Valid changed-file paths:
//! - Must be non-empty and relative (no leading `/`)
//! - Must not contain empty, `.` or `..` components

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RevisionError;

/// Characters that are forbidden anywhere in a revision identifier.
const FORBIDDEN_CHARS: &[char] = &['?', '#', '&', '\\'];

/// Opaque revision identifier: a commit hash or a symbolic ref.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Revision(String);

impl Revision {
    pub fn new(id: impl Into<String>) -> Result<Self, RevisionError> {
        let id = id.into();
        if id.is_empty() {
            return Err(RevisionError::Validation(
                "revision must not be empty".into(),
            ));
        }
        if let Some(ch) = id.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(RevisionError::Validation(format!(
                "revision {id:?} contains whitespace or control character {ch:?}"
            )));
        }
        if let Some(ch) = FORBIDDEN_CHARS.iter().find(|ch| id.contains(**ch)) {
            return Err(RevisionError::Validation(format!(
                "revision {id:?} contains forbidden character {ch:?}"
            )));
        }
        if id.contains("..") {
            return Err(RevisionError::Validation(format!(
                "revision {id:?} must not contain '..'"
            )));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 characters, for log output.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(12) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Debug for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Revision({})", self.0)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Revision {
    type Err = RevisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Revision {
    type Error = RevisionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Revision> for String {
    fn from(rev: Revision) -> Self {
        rev.0
    }
}

/// Repository-relative path of a file touched between two revisions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChangedFile(String);

impl ChangedFile {
    pub fn new(path: impl Into<String>) -> Result<Self, RevisionError> {
        let path = path.into();
        if path.is_empty() {
            return Err(RevisionError::Validation("path must not be empty".into()));
        }
        if path.starts_with('/') {
            return Err(RevisionError::Validation(format!(
                "path {path:?} must be repository-relative"
            )));
        }
        if path
            .split('/')
            .any(|component| component.is_empty() || component == "." || component == "..")
        {
            return Err(RevisionError::Validation(format!(
                "path {path:?} contains an empty or relative component"
            )));
        }
        Ok(Self(path))
    }

    pub fn path(&self) -> &str {
        &self.0
    }

    /// Case-sensitive `.json` suffix check.
    pub fn is_json(&self) -> bool {
        self.0.ends_with(".json")
    }
}

impl fmt::Display for ChangedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ChangedFile {
    type Error = RevisionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChangedFile> for String {
    fn from(file: ChangedFile) -> Self {
        file.0
    }
}
