use async_trait::async_trait;
use sqlx::PgPool;
use watchwire_core::{
    ContentKind, ContentStore, EpisodeSummary, MovieMetadata, SeasonSummary, SeasonUpsert,
    ShowMetadata, StoreError, TrackedItem, WatchStatus, WatchStatusStore,
};

use crate::{favorites, items, seasons, watch_status};

/// Postgres-backed implementation of the storage ports.
///
/// Cloning is cheap; the pool is reference-counted.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ContentStore for PgStore {
    async fn items_for_updates(&self, kind: ContentKind) -> Result<Vec<TrackedItem>, StoreError> {
        let rows = match kind {
            ContentKind::Show => items::list_shows_for_updates(&self.pool).await?,
            ContentKind::Movie => items::list_movies_for_updates(&self.pool).await?,
        };
        tracing::debug!(kind = %kind, count = rows.len(), "db: loaded update candidates");
        Ok(rows.into_iter().map(|row| row.into_item(kind)).collect())
    }

    async fn favoriting_profiles(
        &self,
        kind: ContentKind,
        item_id: i64,
    ) -> Result<Vec<i64>, StoreError> {
        let ids = match kind {
            ContentKind::Show => {
                favorites::list_show_favoriting_profiles(&self.pool, item_id).await?
            }
            ContentKind::Movie => {
                favorites::list_movie_favoriting_profiles(&self.pool, item_id).await?
            }
        };
        Ok(ids)
    }

    async fn update_show_metadata(
        &self,
        show_id: i64,
        metadata: &ShowMetadata,
    ) -> Result<(), StoreError> {
        items::update_show_metadata(&self.pool, show_id, metadata).await?;
        Ok(())
    }

    async fn update_movie_metadata(
        &self,
        movie_id: i64,
        metadata: &MovieMetadata,
    ) -> Result<(), StoreError> {
        items::update_movie_metadata(&self.pool, movie_id, metadata).await?;
        Ok(())
    }

    async fn upsert_season(
        &self,
        show_id: i64,
        season: &SeasonSummary,
    ) -> Result<SeasonUpsert, StoreError> {
        Ok(seasons::upsert_season(&self.pool, show_id, season).await?)
    }

    async fn upsert_episodes(
        &self,
        show_id: i64,
        season_id: i64,
        episodes: &[EpisodeSummary],
    ) -> Result<usize, StoreError> {
        Ok(seasons::upsert_episodes(&self.pool, show_id, season_id, episodes).await?)
    }
}

#[async_trait]
impl WatchStatusStore for PgStore {
    async fn show_watch_status(
        &self,
        profile_id: i64,
        show_id: i64,
    ) -> Result<Option<WatchStatus>, StoreError> {
        Ok(watch_status::get_show_watch_status(&self.pool, profile_id, show_id).await?)
    }

    async fn update_show_watch_status(
        &self,
        profile_id: i64,
        show_id: i64,
        status: WatchStatus,
    ) -> Result<bool, StoreError> {
        Ok(watch_status::set_show_watch_status(&self.pool, profile_id, show_id, status).await?)
    }

    async fn season_watch_status(
        &self,
        profile_id: i64,
        season_id: i64,
    ) -> Result<Option<WatchStatus>, StoreError> {
        Ok(watch_status::get_season_watch_status(&self.pool, profile_id, season_id).await?)
    }

    async fn update_season_watch_status(
        &self,
        profile_id: i64,
        season_id: i64,
        status: WatchStatus,
    ) -> Result<bool, StoreError> {
        Ok(
            watch_status::set_season_watch_status(&self.pool, profile_id, season_id, status)
                .await?,
        )
    }
}
