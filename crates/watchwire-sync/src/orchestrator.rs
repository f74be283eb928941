//! Batch sweep over every item that is due for a change check.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use watchwire_core::{ContentKind, ContentStore};

use crate::checker::{CheckOutcome, ItemChecker};
use crate::error::SyncError;

/// Tally of one completed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub kind: ContentKind,
    pub candidates: usize,
    pub unchanged: usize,
    pub updated: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl BatchReport {
    fn new(kind: ContentKind, candidates: usize) -> Self {
        Self {
            kind,
            candidates,
            unchanged: 0,
            updated: 0,
            failed: 0,
            elapsed: Duration::ZERO,
        }
    }
}

/// Something that can run a whole batch for one content kind. The scheduler
/// depends on this rather than on the orchestrator directly.
#[async_trait]
pub trait UpdateBatch: Send + Sync {
    /// # Errors
    ///
    /// Returns an error only when the batch could not start at all.
    /// Per-item failures are counted in the report.
    async fn run_batch(&self, kind: ContentKind) -> Result<BatchReport, SyncError>;
}

pub struct UpdateOrchestrator {
    store: Arc<dyn ContentStore>,
    checker: Arc<dyn ItemChecker>,
}

impl UpdateOrchestrator {
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>, checker: Arc<dyn ItemChecker>) -> Self {
        Self { store, checker }
    }

    /// # Errors
    ///
    /// Returns [`SyncError::Store`] if the candidate list cannot be loaded.
    pub async fn update_shows(&self) -> Result<BatchReport, SyncError> {
        self.run(ContentKind::Show).await
    }

    /// # Errors
    ///
    /// Returns [`SyncError::Store`] if the candidate list cannot be loaded.
    pub async fn update_movies(&self) -> Result<BatchReport, SyncError> {
        self.run(ContentKind::Movie).await
    }

    async fn run(&self, kind: ContentKind) -> Result<BatchReport, SyncError> {
        let started = Instant::now();

        let items = match self.store.items_for_updates(kind).await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(
                    kind = %kind,
                    error = %e,
                    "sync: failed to load update candidates; batch aborted"
                );
                return Err(e.into());
            }
        };

        tracing::info!(kind = %kind, count = items.len(), "sync: checking items for changes");
        let mut report = BatchReport::new(kind, items.len());

        // Sequential on purpose: the checker paces every catalog request.
        for item in &items {
            match self.checker.check_for_changes(item).await {
                Ok(CheckOutcome::Unchanged) => report.unchanged += 1,
                Ok(CheckOutcome::Updated { .. }) => report.updated += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::error!(
                        kind = %kind,
                        item_id = item.id,
                        error = %e,
                        "sync: item check failed; continuing with next item"
                    );
                }
            }
        }

        report.elapsed = started.elapsed();
        tracing::info!(
            kind = %kind,
            candidates = report.candidates,
            unchanged = report.unchanged,
            updated = report.updated,
            failed = report.failed,
            elapsed_ms = u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
            "sync: batch complete"
        );
        Ok(report)
    }
}

#[async_trait]
impl UpdateBatch for UpdateOrchestrator {
    async fn run_batch(&self, kind: ContentKind) -> Result<BatchReport, SyncError> {
        self.run(kind).await
    }
}

impl std::fmt::Debug for UpdateOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateOrchestrator").finish_non_exhaustive()
    }
}
