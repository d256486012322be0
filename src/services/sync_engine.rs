//! Sync Engine for Linkding Sync.
//!
//! One run is Fetch → Resolve-Destination → Append-Loop. A failure while fetching or
//! resolving aborts before the destination is touched; a failure inside the append
//! loop leaves the blocks already written in place. Nothing is retried and no state
//! is kept between runs.

use std::sync::Arc;

use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::services::bookmark_formatter::format_bookmark;
use crate::services::linkding_client::LinkdingClient;
use crate::services::notifier::Notifier;
use crate::services::vault_store::{EntryKind, FileStore};
use crate::types::errors::SyncError;
use crate::types::settings::SyncSettings;

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub run_id: Uuid,
    pub destination: String,
    /// Number of bookmark blocks appended, one per fetched bookmark.
    pub appended: usize,
    /// Total matches reported by the server, when present.
    pub total_available: Option<u64>,
}

/// Fetches bookmarks and appends them to the destination note.
pub struct SyncEngine {
    client: LinkdingClient,
    files: Arc<dyn FileStore>,
    notifier: Arc<dyn Notifier>,
}

impl SyncEngine {
    pub fn new(client: LinkdingClient, files: Arc<dyn FileStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            files,
            notifier,
        }
    }

    /// Runs one sync with the settings as they are at call time.
    ///
    /// Failures are logged and surfaced as a notice before being returned.
    pub async fn sync_bookmarks(&self, settings: &SyncSettings) -> Result<SyncReport, SyncError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("sync_run", %run_id);

        let result = self.run(run_id, settings).instrument(span).await;
        match &result {
            Ok(report) => info!(
                %run_id,
                appended = report.appended,
                destination = %report.destination,
                "Bookmark sync finished"
            ),
            Err(e) => {
                error!(%run_id, error = %e, written_before_failure = !e.is_before_write(), "Bookmark sync failed");
                self.notifier.notify(&format!("Linkding sync failed: {}", e));
            }
        }
        result
    }

    async fn run(&self, run_id: Uuid, settings: &SyncSettings) -> Result<SyncReport, SyncError> {
        let page = self.client.fetch_bookmarks(settings).await?;
        info!(fetched = page.results.len(), total = ?page.count, "Fetched bookmarks");
        self.notifier.notify(&format!(
            "Fetched {} bookmarks from Linkding",
            page.results.len()
        ));

        let destination = settings.destination_path.as_str();
        self.resolve_destination(destination).await?;

        let mut appended = 0;
        for bookmark in &page.results {
            let block = format_bookmark(bookmark);
            self.files
                .append(destination, &block)
                .await
                .map_err(|e| SyncError::Append {
                    written: appended,
                    message: e.to_string(),
                })?;
            appended += 1;
        }

        Ok(SyncReport {
            run_id,
            destination: destination.to_string(),
            appended,
            total_available: page.count,
        })
    }

    /// Ensures `path` names a file, creating it empty when nothing is there.
    async fn resolve_destination(&self, path: &str) -> Result<(), SyncError> {
        let kind = self
            .files
            .entry_kind(path)
            .await
            .map_err(|e| SyncError::Destination(e.to_string()))?;

        let kind = match kind {
            Some(kind) => kind,
            None => {
                info!(destination = path, "Creating destination note");
                self.files
                    .create(path, "")
                    .await
                    .map_err(|e| SyncError::Destination(e.to_string()))?;
                self.files
                    .entry_kind(path)
                    .await
                    .map_err(|e| SyncError::Destination(e.to_string()))?
                    .unwrap_or(EntryKind::Other)
            }
        };

        if kind != EntryKind::File {
            return Err(SyncError::DestinationNotFile(path.to_string()));
        }
        Ok(())
    }
}
