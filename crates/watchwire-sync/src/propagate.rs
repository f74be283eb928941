//! Re-opens watch status when new content lands under a favorited show.
//!
//! A profile that has fully watched a show (or season) is moved back to
//! `Watching` once a new season (or episode) appears. No other status is
//! touched, and a profile without a status record is left alone.

use std::collections::HashSet;
use std::sync::Arc;

use watchwire_core::{StoreError, WatchStatus, WatchStatusStore};

/// Per-call tally of what propagation did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationSummary {
    pub transitioned: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl PropagationSummary {
    fn record(&mut self, outcome: Result<bool, StoreError>) -> Result<(), StoreError> {
        match outcome {
            Ok(true) => self.transitioned += 1,
            Ok(false) => self.unchanged += 1,
            Err(e) => {
                self.failed += 1;
                return Err(e);
            }
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct WatchStatusPropagator {
    store: Arc<dyn WatchStatusStore>,
}

impl WatchStatusPropagator {
    #[must_use]
    pub fn new(store: Arc<dyn WatchStatusStore>) -> Self {
        Self { store }
    }

    /// Show-level propagation after a new season was added to `show_id`.
    ///
    /// Never fails: a storage error for one profile is logged and counted,
    /// and the remaining profiles are still processed.
    pub async fn propagate_new_season(
        &self,
        show_id: i64,
        profile_ids: &[i64],
    ) -> PropagationSummary {
        let mut summary = PropagationSummary::default();

        for profile_id in distinct(profile_ids) {
            let outcome = self.reopen_show(profile_id, show_id).await;
            if let Err(e) = summary.record(outcome) {
                tracing::error!(
                    profile_id,
                    show_id,
                    error = %e,
                    "sync: failed to propagate new season to profile"
                );
            }
        }

        log_summary(show_id, None, summary);
        summary
    }

    /// Season-level propagation after new episodes were added to
    /// `season_id`. When a profile's season is re-opened the parent show gets
    /// the same treatment.
    pub async fn propagate_new_episodes(
        &self,
        show_id: i64,
        season_id: i64,
        profile_ids: &[i64],
    ) -> PropagationSummary {
        let mut summary = PropagationSummary::default();

        for profile_id in distinct(profile_ids) {
            let outcome = self.reopen_season(profile_id, show_id, season_id).await;
            if let Err(e) = summary.record(outcome) {
                tracing::error!(
                    profile_id,
                    show_id,
                    season_id,
                    error = %e,
                    "sync: failed to propagate new episodes to profile"
                );
            }
        }

        log_summary(show_id, Some(season_id), summary);
        summary
    }

    async fn reopen_show(&self, profile_id: i64, show_id: i64) -> Result<bool, StoreError> {
        let current = self.store.show_watch_status(profile_id, show_id).await?;
        let Some(next) = current.and_then(WatchStatus::after_new_content) else {
            return Ok(false);
        };
        self.store
            .update_show_watch_status(profile_id, show_id, next)
            .await
    }

    async fn reopen_season(
        &self,
        profile_id: i64,
        show_id: i64,
        season_id: i64,
    ) -> Result<bool, StoreError> {
        let current = self.store.season_watch_status(profile_id, season_id).await?;
        let Some(next) = current.and_then(WatchStatus::after_new_content) else {
            return Ok(false);
        };
        let updated = self
            .store
            .update_season_watch_status(profile_id, season_id, next)
            .await?;
        if updated {
            self.reopen_show(profile_id, show_id).await?;
        }
        Ok(updated)
    }
}

impl std::fmt::Debug for WatchStatusPropagator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchStatusPropagator").finish_non_exhaustive()
    }
}

fn distinct(profile_ids: &[i64]) -> impl Iterator<Item = i64> + '_ {
    let mut seen = HashSet::new();
    profile_ids.iter().copied().filter(move |id| seen.insert(*id))
}

fn log_summary(show_id: i64, season_id: Option<i64>, summary: PropagationSummary) {
    if summary == PropagationSummary::default() {
        return;
    }
    tracing::info!(
        show_id,
        season_id,
        transitioned = summary.transitioned,
        unchanged = summary.unchanged,
        failed = summary.failed,
        "sync: watch status propagation finished"
    );
}

#[cfg(test)]
#[path = "propagate_test.rs"]
mod tests;
