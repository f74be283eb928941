//! Contracts the reconciliation engine consumes. Postgres and TMDB adapters
//! implement these in their own crates; tests use in-memory fakes.

use async_trait::async_trait;

use crate::changes::ChangeRecord;
use crate::dates::DateWindow;
use crate::error::{CatalogError, StoreError};
use crate::items::{
    ContentKind, EpisodeSummary, MovieMetadata, SeasonSummary, SeasonUpsert, ShowDetails,
    ShowMetadata, TrackedItem,
};
use crate::watch_status::WatchStatus;

/// Item-level storage: candidate selection, metadata writes, favorites.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Items of `kind` that are due for a change check.
    async fn items_for_updates(&self, kind: ContentKind) -> Result<Vec<TrackedItem>, StoreError>;

    /// Profiles that favorited the item. May contain duplicates.
    async fn favoriting_profiles(
        &self,
        kind: ContentKind,
        item_id: i64,
    ) -> Result<Vec<i64>, StoreError>;

    /// Writes show metadata and refreshes `updated_at`.
    async fn update_show_metadata(
        &self,
        show_id: i64,
        metadata: &ShowMetadata,
    ) -> Result<(), StoreError>;

    /// Writes movie metadata and refreshes `updated_at`.
    async fn update_movie_metadata(
        &self,
        movie_id: i64,
        metadata: &MovieMetadata,
    ) -> Result<(), StoreError>;

    async fn upsert_season(
        &self,
        show_id: i64,
        season: &SeasonSummary,
    ) -> Result<SeasonUpsert, StoreError>;

    /// Writes episodes for a season and returns how many rows were new.
    async fn upsert_episodes(
        &self,
        show_id: i64,
        season_id: i64,
        episodes: &[EpisodeSummary],
    ) -> Result<usize, StoreError>;
}

/// Per-profile watch status for shows and seasons.
#[async_trait]
pub trait WatchStatusStore: Send + Sync {
    async fn show_watch_status(
        &self,
        profile_id: i64,
        show_id: i64,
    ) -> Result<Option<WatchStatus>, StoreError>;

    /// Returns `true` when a row was updated.
    async fn update_show_watch_status(
        &self,
        profile_id: i64,
        show_id: i64,
        status: WatchStatus,
    ) -> Result<bool, StoreError>;

    async fn season_watch_status(
        &self,
        profile_id: i64,
        season_id: i64,
    ) -> Result<Option<WatchStatus>, StoreError>;

    /// Returns `true` when a row was updated.
    async fn update_season_watch_status(
        &self,
        profile_id: i64,
        season_id: i64,
        status: WatchStatus,
    ) -> Result<bool, StoreError>;
}

/// External catalog that reports changes and serves current details.
#[async_trait]
pub trait ChangeCatalog: Send + Sync {
    /// Changes reported for a show or movie inside `window`.
    async fn changes(
        &self,
        kind: ContentKind,
        external_id: i64,
        window: &DateWindow,
    ) -> Result<Vec<ChangeRecord>, CatalogError>;

    /// Changes reported for one season (episode additions live here).
    async fn season_changes(
        &self,
        season_external_id: i64,
        window: &DateWindow,
    ) -> Result<Vec<ChangeRecord>, CatalogError>;

    async fn show_details(&self, external_id: i64) -> Result<ShowDetails, CatalogError>;

    async fn season_episodes(
        &self,
        show_external_id: i64,
        season_number: i32,
    ) -> Result<Vec<EpisodeSummary>, CatalogError>;

    async fn movie_details(&self, external_id: i64) -> Result<MovieMetadata, CatalogError>;
}
