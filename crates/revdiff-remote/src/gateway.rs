use async_trait::async_trait;
use revdiff_types::{ChangedFile, Revision};

use crate::error::GatewayResult;

/// Access to a remote repository's revisions.
///
/// Implementations must be `Send + Sync`; the comparison engine may issue
/// concurrent calls against one instance, so per-call state must not be
/// shared mutably.
#[async_trait]
pub trait RevisionGateway: Send + Sync {
    /// Files touched between `from` and `to`, in the order the remote reports
    /// them. At most one page of results is returned; callers needing
    /// completeness must account for truncation.
    async fn list_changed_files(
        &self,
        from: &Revision,
        to: &Revision,
    ) -> GatewayResult<Vec<ChangedFile>>;

    /// The complete content of `file` at `revision`, or an error. Partial
    /// content is never returned.
    async fn fetch_file_content(
        &self,
        file: &ChangedFile,
        revision: &Revision,
    ) -> GatewayResult<Vec<u8>>;
}
