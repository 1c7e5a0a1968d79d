//! Optional on-disk copies of every fetched revision.
//!
//! Layout: `<root>/<revision>/<repository path>`, with `/` in the revision
//! replaced by `_` so refs like `refs/heads/main` stay one directory level.

use std::path::{Path, PathBuf};

use revdiff_types::{ChangedFile, Revision};
use tracing::debug;

#[derive(Clone, Debug)]
pub struct SnapshotWriter {
    root: PathBuf,
}

impl SnapshotWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, file: &ChangedFile, revision: &Revision) -> PathBuf {
        self.root
            .join(revision.as_str().replace('/', "_"))
            .join(file.path())
    }

    /// Write `content` for `file` at `revision`, creating directories as needed.
    pub async fn write(
        &self,
        file: &ChangedFile,
        revision: &Revision,
        content: &[u8],
    ) -> std::io::Result<PathBuf> {
        let path = self.path_for(file, revision);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, content).await?;
        debug!(path = %path.display(), bytes = content.len(), "snapshot written");
        Ok(path)
    }
}
