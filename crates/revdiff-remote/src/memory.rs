//! In-memory revision gateway for testing and embedding.
//!
//! [`InMemoryGateway`] keeps changed-file listings and file contents in
//! `HashMap`s behind `RwLock`s. It records every fetch so tests can assert
//! which paths were requested, and can be told to fail specific calls.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use revdiff_types::{ChangedFile, Revision};

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::RevisionGateway;

type RangeKey = (String, String);
type FileKey = (String, String);

/// An in-memory implementation of [`RevisionGateway`].
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    listings: RwLock<HashMap<RangeKey, Vec<ChangedFile>>>,
    contents: RwLock<HashMap<FileKey, Vec<u8>>>,
    failures: RwLock<HashMap<FileKey, GatewayError>>,
    listing_failure: RwLock<Option<GatewayError>>,
    fetches: RwLock<Vec<FileKey>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the files reported as changed between `from` and `to`.
    pub fn set_changes(&self, from: &Revision, to: &Revision, files: Vec<ChangedFile>) -> GatewayResult<()> {
        write_lock(&self.listings)?.insert(range_key(from, to), files);
        Ok(())
    }

    /// Store the content of `path` at `revision`.
    pub fn put_file(&self, path: &str, revision: &Revision, content: impl Into<Vec<u8>>) -> GatewayResult<()> {
        write_lock(&self.contents)?.insert(file_key(path, revision), content.into());
        Ok(())
    }

    /// Make every fetch of `path` at `revision` fail with `error`.
    pub fn fail_fetch(&self, path: &str, revision: &Revision, error: GatewayError) -> GatewayResult<()> {
        write_lock(&self.failures)?.insert(file_key(path, revision), error);
        Ok(())
    }

    /// Make every listing call fail with `error`.
    pub fn fail_listing(&self, error: GatewayError) -> GatewayResult<()> {
        *write_lock(&self.listing_failure)? = Some(error);
        Ok(())
    }

    /// `(path, revision)` pairs fetched so far, in call order.
    pub fn fetches(&self) -> GatewayResult<Vec<(String, String)>> {
        Ok(read_lock(&self.fetches)?.clone())
    }

    /// Returns `true` if `path` was fetched at any revision.
    pub fn was_fetched(&self, path: &str) -> GatewayResult<bool> {
        Ok(read_lock(&self.fetches)?.iter().any(|(p, _)| p == path))
    }
}

fn range_key(from: &Revision, to: &Revision) -> RangeKey {
    (from.to_string(), to.to_string())
}

fn file_key(path: &str, revision: &Revision) -> FileKey {
    (path.to_string(), revision.to_string())
}

fn write_lock<T>(lock: &RwLock<T>) -> GatewayResult<std::sync::RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| GatewayError::Transport(format!("lock poisoned: {e}")))
}

fn read_lock<T>(lock: &RwLock<T>) -> GatewayResult<std::sync::RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| GatewayError::Transport(format!("lock poisoned: {e}")))
}

#[async_trait]
impl RevisionGateway for InMemoryGateway {
    async fn list_changed_files(
        &self,
        from: &Revision,
        to: &Revision,
    ) -> GatewayResult<Vec<ChangedFile>> {
        if let Some(err) = read_lock(&self.listing_failure)?.clone() {
            return Err(err);
        }
        Ok(read_lock(&self.listings)?
            .get(&range_key(from, to))
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_file_content(
        &self,
        file: &ChangedFile,
        revision: &Revision,
    ) -> GatewayResult<Vec<u8>> {
        let key = file_key(file.path(), revision);
        write_lock(&self.fetches)?.push(key.clone());

        if let Some(err) = read_lock(&self.failures)?.get(&key) {
            return Err(err.clone());
        }
        read_lock(&self.contents)?
            .get(&key)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound {
                path: file.path().to_string(),
                revision: revision.to_string(),
            })
    }
}
