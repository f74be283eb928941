//! Per-item change detection and application.

use std::sync::Arc;

use async_trait::async_trait;
use watchwire_core::{
    generate_date_range, ChangeCatalog, ChangeRecord, Clock, ContentKind, ContentStore,
    DateWindow, SeasonSummary, TrackedItem,
};

use crate::error::SyncError;
use crate::filter::{
    added_season_ids, filter_unique_season_ids, has_structural_additions, is_relevant,
};
use crate::pacing::Pacer;
use crate::propagate::WatchStatusPropagator;

/// What a single check did to local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No relevant changes inside the window; nothing was written.
    Unchanged,
    /// Metadata was refreshed. Counts are zero for metadata-only changes.
    Updated {
        new_seasons: usize,
        new_episodes: usize,
    },
}

/// Checks one tracked item against the external catalog.
#[async_trait]
pub trait ItemChecker: Send + Sync {
    async fn check_for_changes(&self, item: &TrackedItem) -> Result<CheckOutcome, SyncError>;
}

pub struct ChangeChecker {
    store: Arc<dyn ContentStore>,
    catalog: Arc<dyn ChangeCatalog>,
    propagator: WatchStatusPropagator,
    pacer: Arc<dyn Pacer>,
    clock: Arc<dyn Clock>,
    lookback_days: u32,
}

impl ChangeChecker {
    #[must_use]
    pub fn new(
        store: Arc<dyn ContentStore>,
        catalog: Arc<dyn ChangeCatalog>,
        propagator: WatchStatusPropagator,
        pacer: Arc<dyn Pacer>,
        clock: Arc<dyn Clock>,
        lookback_days: u32,
    ) -> Self {
        Self {
            store,
            catalog,
            propagator,
            pacer,
            clock,
            lookback_days,
        }
    }

    async fn check_item(&self, item: &TrackedItem) -> Result<CheckOutcome, SyncError> {
        let window = generate_date_range(self.clock.as_ref(), self.lookback_days);

        self.pacer.acquire().await;
        let changes: Vec<ChangeRecord> = self
            .catalog
            .changes(item.kind, item.external_id, &window)
            .await?
            .into_iter()
            .filter(is_relevant)
            .collect();

        if changes.is_empty() {
            tracing::debug!(
                item_id = item.id,
                external_id = item.external_id,
                kind = %item.kind,
                past_date = %window.past_date,
                current_date = %window.current_date,
                "sync: no relevant changes"
            );
            return Ok(CheckOutcome::Unchanged);
        }

        tracing::debug!(
            item_id = item.id,
            external_id = item.external_id,
            count = changes.len(),
            "sync: relevant changes found"
        );

        match item.kind {
            ContentKind::Movie => self.apply_movie_changes(item).await,
            ContentKind::Show => self.apply_show_changes(item, &changes, &window).await,
        }
    }

    async fn apply_movie_changes(&self, item: &TrackedItem) -> Result<CheckOutcome, SyncError> {
        self.pacer.acquire().await;
        let metadata = self.catalog.movie_details(item.external_id).await?;
        self.store.update_movie_metadata(item.id, &metadata).await?;

        tracing::info!(item_id = item.id, title = %item.title, "sync: movie metadata updated");
        Ok(CheckOutcome::Updated {
            new_seasons: 0,
            new_episodes: 0,
        })
    }

    async fn apply_show_changes(
        &self,
        item: &TrackedItem,
        changes: &[ChangeRecord],
        window: &DateWindow,
    ) -> Result<CheckOutcome, SyncError> {
        self.pacer.acquire().await;
        let details = self.catalog.show_details(item.external_id).await?;

        // Must precede the first season or episode write.
        let season_ids = filter_unique_season_ids(changes);
        let profiles = if season_ids.is_empty() {
            Vec::new()
        } else {
            self.store
                .favoriting_profiles(ContentKind::Show, item.id)
                .await?
        };

        self.store
            .update_show_metadata(item.id, &details.metadata)
            .await?;

        let added_seasons = added_season_ids(changes);
        let mut new_seasons = 0usize;
        let mut new_episodes = 0usize;

        for season_external_id in season_ids {
            let Some(season) = details
                .seasons
                .iter()
                .find(|season| season.external_id == season_external_id)
            else {
                // Reported but no longer listed, e.g. a deleted season.
                tracing::debug!(
                    item_id = item.id,
                    season_external_id,
                    "sync: changed season not in show details; skipping"
                );
                continue;
            };

            let upsert = self.store.upsert_season(item.id, season).await?;

            if upsert.inserted || added_seasons.contains(&season_external_id) {
                let inserted = self
                    .store_season_episodes(item, upsert.season_id, season)
                    .await?;
                new_episodes += inserted;
                // `added` records repeat on every sweep inside the window.
                if upsert.inserted || inserted > 0 {
                    new_seasons += 1;
                    if new_seasons == 1 {
                        self.propagator
                            .propagate_new_season(item.id, &profiles)
                            .await;
                    }
                }
                continue;
            }

            self.pacer.acquire().await;
            let season_changes = self
                .catalog
                .season_changes(season_external_id, window)
                .await?;
            if !has_structural_additions(&season_changes) {
                continue;
            }

            let inserted = self
                .store_season_episodes(item, upsert.season_id, season)
                .await?;
            if inserted > 0 {
                new_episodes += inserted;
                self.propagator
                    .propagate_new_episodes(item.id, upsert.season_id, &profiles)
                    .await;
            }
        }

        tracing::info!(
            item_id = item.id,
            title = %item.title,
            new_seasons,
            new_episodes,
            "sync: show updated"
        );
        Ok(CheckOutcome::Updated {
            new_seasons,
            new_episodes,
        })
    }

    async fn store_season_episodes(
        &self,
        item: &TrackedItem,
        season_id: i64,
        season: &SeasonSummary,
    ) -> Result<usize, SyncError> {
        self.pacer.acquire().await;
        let episodes = self
            .catalog
            .season_episodes(item.external_id, season.season_number)
            .await?;
        let inserted = self
            .store
            .upsert_episodes(item.id, season_id, &episodes)
            .await?;
        Ok(inserted)
    }
}

#[async_trait]
impl ItemChecker for ChangeChecker {
    async fn check_for_changes(&self, item: &TrackedItem) -> Result<CheckOutcome, SyncError> {
        self.check_item(item).await.inspect_err(|e| {
            tracing::warn!(
                item_id = item.id,
                title = %item.title,
                external_id = item.external_id,
                kind = %item.kind,
                error = %e,
                "sync: change check failed"
            );
        })
    }
}

impl std::fmt::Debug for ChangeChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeChecker")
            .field("lookback_days", &self.lookback_days)
            .finish_non_exhaustive()
    }
}
