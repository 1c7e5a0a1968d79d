//! Diff entries, reports, and their human-readable rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Line printed for a report without entries.
pub const NO_DIFFERENCES: &str = "No differences found.";

/// The kind of a property-level difference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Changed,
    Added,
    Removed,
}

/// One detected difference between two JSON documents.
///
/// Values are compact JSON renderings: strings keep their quotes and an
/// explicit null renders as `null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub property_path: String,
    pub kind: DiffKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
}

impl DiffEntry {
    pub fn changed(path: impl Into<String>, old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            property_path: path.into(),
            kind: DiffKind::Changed,
            old_value: Some(old.into()),
            new_value: Some(new.into()),
        }
    }

    pub fn added(path: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            property_path: path.into(),
            kind: DiffKind::Added,
            old_value: None,
            new_value: Some(new.into()),
        }
    }

    pub fn removed(path: impl Into<String>, old: impl Into<String>) -> Self {
        Self {
            property_path: path.into(),
            kind: DiffKind::Removed,
            old_value: Some(old.into()),
            new_value: None,
        }
    }
}

impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let old = self.old_value.as_deref().unwrap_or_default();
        let new = self.new_value.as_deref().unwrap_or_default();
        match self.kind {
            DiffKind::Changed => write!(
                f,
                "Property '{}' changed from '{}' to '{}'",
                self.property_path, old, new
            ),
            DiffKind::Added => write!(
                f,
                "Property '{}' added with value '{}'",
                self.property_path, new
            ),
            DiffKind::Removed => write!(f, "Property '{}' removed", self.property_path),
        }
    }
}

/// The ordered result of comparing two documents.
///
/// Changed/removed entries come first in the old document's key order,
/// followed by added entries in the new document's key order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    pub entries: Vec<DiffEntry>,
}

impl DiffReport {
    pub fn new(entries: Vec<DiffEntry>) -> Self {
        Self { entries }
    }

    /// Returns `true` if the report has at least one entry.
    pub fn has_differences(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of added properties.
    pub fn additions(&self) -> usize {
        self.count(DiffKind::Added)
    }

    /// Number of removed properties.
    pub fn removals(&self) -> usize {
        self.count(DiffKind::Removed)
    }

    /// Number of changed properties.
    pub fn changes(&self) -> usize {
        self.count(DiffKind::Changed)
    }

    fn count(&self, kind: DiffKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// One line per entry, or a single "No differences found." line.
    pub fn render_lines(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec![NO_DIFFERENCES.to_string()];
        }
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_lines().join("\n"))
    }
}
