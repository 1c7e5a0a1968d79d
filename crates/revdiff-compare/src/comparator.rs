use std::sync::Arc;

use futures::stream::{self, StreamExt};
use revdiff_diff::{diff_documents_with, parse_document, DiffReport};
use revdiff_remote::RevisionGateway;
use revdiff_types::{ChangedFile, Outcome, Revision, RevisionError};
use tracing::{debug, info, warn};

use crate::comparison::{ComparisonRun, FileComparison};
use crate::error::{CompareError, CompareResult};
use crate::options::CompareOptions;
use crate::snapshot::SnapshotWriter;

/// Compares the JSON files changed between two revisions of one remote
/// repository.
pub struct Comparator {
    gateway: Arc<dyn RevisionGateway>,
    options: CompareOptions,
    snapshots: Option<SnapshotWriter>,
}

impl Comparator {
    pub fn new(gateway: Arc<dyn RevisionGateway>) -> Self {
        Self::with_options(gateway, CompareOptions::default())
    }

    pub fn with_options(gateway: Arc<dyn RevisionGateway>, options: CompareOptions) -> Self {
        let snapshots = options.snapshot_dir.clone().map(SnapshotWriter::new);
        Self {
            gateway,
            options,
            snapshots,
        }
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Like [`compare_revisions`](Self::compare_revisions), validating raw
    /// revision identifiers first.
    pub async fn compare_revision_ids(&self, from: &str, to: &str) -> Outcome<ComparisonRun> {
        let revisions = Revision::new(from).and_then(|from| Ok((from, Revision::new(to)?)));
        match revisions {
            Ok((from, to)) => self.compare_revisions(&from, &to).await,
            Err(e) => Outcome::failure([e.to_string()]),
        }
    }

    /// Run a full comparison.
    ///
    /// A listing failure fails the whole run. Any other failure is recorded
    /// per file (`"<path>: <reason>"`) and the remaining files are still
    /// compared; reports keep the listing order.
    pub async fn compare_revisions(&self, from: &Revision, to: &Revision) -> Outcome<ComparisonRun> {
        info!(from = from.short(), to = to.short(), "comparing revisions");

        let changed = match self.gateway.list_changed_files(from, to).await {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %e, "listing changed files failed");
                return Outcome::failure([RevisionError::from(e).to_string()]);
            }
        };

        let total = changed.len();
        let (json_files, other_files): (Vec<_>, Vec<_>) =
            changed.into_iter().partition(ChangedFile::is_json);
        for file in &other_files {
            debug!(path = %file, "skipping non-JSON file");
        }

        let concurrency = self.options.concurrency.max(1);
        let results: Vec<(ChangedFile, Outcome<DiffReport>)> = stream::iter(json_files)
            .map(|file| async move {
                let outcome = self.compare_file(&file, from, to).await;
                (file, outcome)
            })
            .buffered(concurrency)
            .collect()
            .await;

        let mut files = Vec::with_capacity(results.len());
        let mut messages = Vec::new();
        let mut errors = Vec::new();
        for (path, outcome) in results {
            messages.extend(outcome.messages().iter().cloned());
            errors.extend(outcome.errors().iter().cloned());
            if let Some(report) = outcome.into_data() {
                files.push(FileComparison { path, report });
            }
        }

        let compared = files.len();
        let run = ComparisonRun {
            files,
            skipped: other_files.len(),
        };
        let mut outcome = Outcome::success_with(run, messages);
        outcome.add_message(format!(
            "compared {compared} of {} JSON file(s) among {total} changed file(s)",
            compared + errors.len()
        ));
        for error in errors {
            outcome.add_error(error);
        }

        info!(
            compared,
            failed = outcome.errors().len(),
            skipped = other_files.len(),
            "comparison finished"
        );
        outcome
    }

    /// Fetch `file` at both revisions and diff the two documents.
    ///
    /// Honors the configured per-file timeout and cancellation signal; both
    /// are reported as transport failures for this file.
    pub async fn compare_file(
        &self,
        file: &ChangedFile,
        from: &Revision,
        to: &Revision,
    ) -> Outcome<DiffReport> {
        let mut notes = Vec::new();
        let result = if self.options.cancel.is_cancelled() {
            Err(CompareError::Cancelled)
        } else {
            let work = async {
                match self.options.file_timeout {
                    Some(limit) => tokio::time::timeout(limit, self.fetch_and_diff(file, from, to, &mut notes))
                        .await
                        .unwrap_or_else(|_| Err(CompareError::Timeout(limit))),
                    None => self.fetch_and_diff(file, from, to, &mut notes).await,
                }
            };
            tokio::select! {
                biased;
                _ = self.options.cancel.cancelled() => Err(CompareError::Cancelled),
                result = work => result,
            }
        };

        match result {
            Ok(report) => {
                debug!(path = %file, entries = report.len(), "file compared");
                Outcome::success_with(report, notes)
            }
            Err(e) => {
                warn!(path = %file, error = %e, "file could not be compared");
                let mut outcome = Outcome::failure([format!("{file}: {}", RevisionError::from(e))]);
                for note in notes {
                    outcome.add_message(note);
                }
                outcome
            }
        }
    }

    async fn fetch_and_diff(
        &self,
        file: &ChangedFile,
        from: &Revision,
        to: &Revision,
        notes: &mut Vec<String>,
    ) -> CompareResult<DiffReport> {
        let old_bytes = self.fetch(file, from, notes).await?;
        let new_bytes = self.fetch(file, to, notes).await?;

        let old = parse_document(&old_bytes).map_err(|source| CompareError::Parse {
            revision: from.to_string(),
            source,
        })?;
        let new = parse_document(&new_bytes).map_err(|source| CompareError::Parse {
            revision: to.to_string(),
            source,
        })?;

        Ok(diff_documents_with(&old, &new, self.options.diff)?)
    }

    async fn fetch(
        &self,
        file: &ChangedFile,
        revision: &Revision,
        notes: &mut Vec<String>,
    ) -> CompareResult<Vec<u8>> {
        let bytes = self
            .gateway
            .fetch_file_content(file, revision)
            .await
            .map_err(|source| CompareError::Fetch {
                revision: revision.to_string(),
                source,
            })?;

        if let Some(writer) = &self.snapshots {
            // A failed snapshot never fails the comparison.
            if let Err(e) = writer.write(file, revision, &bytes).await {
                warn!(path = %file, revision = revision.short(), error = %e, "snapshot write failed");
                notes.push(format!("{file}: snapshot at {revision} not written: {e}"));
            }
        }
        Ok(bytes)
    }
}
