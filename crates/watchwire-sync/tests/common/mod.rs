//! In-memory implementations of the storage and catalog ports.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use watchwire_core::{
    CatalogError, ChangeAction, ChangeCatalog, ChangeKey, ChangeRecord, ChangeValue, ContentKind,
    ContentStore, DateWindow, EpisodeSummary, MovieMetadata, SeasonSummary, SeasonUpsert,
    ShowDetails, ShowMetadata, StoreError, TrackedItem, WatchStatus, WatchStatusStore,
};

pub fn item(id: i64, kind: ContentKind, external_id: i64) -> TrackedItem {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid timestamp");
    TrackedItem {
        id,
        kind,
        title: format!("Item {id}"),
        external_id,
        created_at: at,
        updated_at: at,
    }
}

pub fn change(key: ChangeKey, action: ChangeAction, value: Option<ChangeValue>) -> ChangeRecord {
    ChangeRecord {
        id: "c".to_string(),
        key,
        action,
        time: None,
        iso_639_1: None,
        iso_3166_1: None,
        value,
        original_value: None,
    }
}

pub fn season_added(season_id: i64) -> ChangeRecord {
    change(
        ChangeKey::Season,
        ChangeAction::Added,
        Some(ChangeValue::Season {
            season_id,
            season_number: None,
        }),
    )
}

pub fn season_updated(season_id: i64) -> ChangeRecord {
    change(
        ChangeKey::Season,
        ChangeAction::Updated,
        Some(ChangeValue::Season {
            season_id,
            season_number: None,
        }),
    )
}

pub fn episode_added(episode_id: i64) -> ChangeRecord {
    change(
        ChangeKey::Episode,
        ChangeAction::Added,
        Some(ChangeValue::Episode {
            episode_id,
            episode_number: None,
        }),
    )
}

pub fn overview_updated() -> ChangeRecord {
    change(
        ChangeKey::Overview,
        ChangeAction::Updated,
        Some(ChangeValue::Metadata),
    )
}

pub fn season_summary(external_id: i64, season_number: i32) -> SeasonSummary {
    SeasonSummary {
        external_id,
        season_number,
        name: format!("Season {season_number}"),
        overview: None,
        air_date: NaiveDate::from_ymd_opt(2024, 5, 1),
        episode_count: 1,
        poster_path: None,
    }
}

pub fn episode_summary(
    external_id: i64,
    season_number: i32,
    episode_number: i32,
) -> EpisodeSummary {
    EpisodeSummary {
        external_id,
        episode_number,
        season_number,
        name: format!("Episode {episode_number}"),
        overview: None,
        air_date: None,
        runtime: None,
        still_path: None,
    }
}

pub fn show_details(seasons: Vec<SeasonSummary>) -> ShowDetails {
    ShowDetails {
        metadata: ShowMetadata {
            title: "Refreshed".to_string(),
            overview: Some("Updated overview".to_string()),
            status: Some("Returning Series".to_string()),
            poster_path: None,
            first_air_date: None,
            last_air_date: None,
            season_count: i32::try_from(seasons.len()).unwrap_or(i32::MAX),
            episode_count: 0,
        },
        seasons,
    }
}

pub fn movie_metadata() -> MovieMetadata {
    MovieMetadata {
        title: "Refreshed Movie".to_string(),
        overview: None,
        release_date: NaiveDate::from_ymd_opt(2024, 6, 1),
        runtime: Some(120),
        poster_path: None,
        status: Some("Released".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryStore {
    pub candidates: Mutex<HashMap<ContentKind, Vec<TrackedItem>>>,
    pub fail_candidates: bool,
    pub favorites: Mutex<HashMap<i64, Vec<i64>>>,
    pub show_metadata: Mutex<Vec<(i64, ShowMetadata)>>,
    pub movie_metadata: Mutex<Vec<(i64, MovieMetadata)>>,
    /// season external id -> local id
    pub seasons: Mutex<HashMap<i64, i64>>,
    /// episode external ids already stored
    pub episodes: Mutex<Vec<i64>>,
    pub show_status: Mutex<HashMap<(i64, i64), WatchStatus>>,
    pub season_status: Mutex<HashMap<(i64, i64), WatchStatus>>,
    pub favorites_calls: Mutex<usize>,
    /// favoriting-profile lookups that fail before one succeeds
    pub favorites_failures: Mutex<usize>,
}

impl MemoryStore {
    pub fn with_candidates(self, kind: ContentKind, items: Vec<TrackedItem>) -> Self {
        self.candidates.lock().expect("lock").insert(kind, items);
        self
    }

    pub fn with_favorites(self, show_id: i64, profiles: Vec<i64>) -> Self {
        self.favorites.lock().expect("lock").insert(show_id, profiles);
        self
    }

    pub fn with_season(self, external_id: i64, local_id: i64) -> Self {
        self.seasons.lock().expect("lock").insert(external_id, local_id);
        self
    }

    pub fn with_episode(self, external_id: i64) -> Self {
        self.episodes.lock().expect("lock").push(external_id);
        self
    }

    pub fn with_show_status(self, profile_id: i64, show_id: i64, status: WatchStatus) -> Self {
        self.show_status
            .lock()
            .expect("lock")
            .insert((profile_id, show_id), status);
        self
    }

    pub fn with_season_status(self, profile_id: i64, season_id: i64, status: WatchStatus) -> Self {
        self.season_status
            .lock()
            .expect("lock")
            .insert((profile_id, season_id), status);
        self
    }

    pub fn show_status(&self, profile_id: i64, show_id: i64) -> Option<WatchStatus> {
        self.show_status
            .lock()
            .expect("lock")
            .get(&(profile_id, show_id))
            .copied()
    }

    pub fn season_status(&self, profile_id: i64, season_id: i64) -> Option<WatchStatus> {
        self.season_status
            .lock()
            .expect("lock")
            .get(&(profile_id, season_id))
            .copied()
    }

    pub fn metadata_writes(&self) -> usize {
        self.show_metadata.lock().expect("lock").len()
            + self.movie_metadata.lock().expect("lock").len()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn items_for_updates(&self, kind: ContentKind) -> Result<Vec<TrackedItem>, StoreError> {
        if self.fail_candidates {
            return Err(StoreError::Backend("pool timed out".into()));
        }
        Ok(self
            .candidates
            .lock()
            .expect("lock")
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }

    async fn favoriting_profiles(
        &self,
        _kind: ContentKind,
        item_id: i64,
    ) -> Result<Vec<i64>, StoreError> {
        *self.favorites_calls.lock().expect("lock") += 1;
        let mut failures = self.favorites_failures.lock().expect("lock");
        if *failures > 0 {
            *failures -= 1;
            return Err(StoreError::Backend("connection reset".into()));
        }
        Ok(self
            .favorites
            .lock()
            .expect("lock")
            .get(&item_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_show_metadata(
        &self,
        show_id: i64,
        metadata: &ShowMetadata,
    ) -> Result<(), StoreError> {
        self.show_metadata
            .lock()
            .expect("lock")
            .push((show_id, metadata.clone()));
        Ok(())
    }

    async fn update_movie_metadata(
        &self,
        movie_id: i64,
        metadata: &MovieMetadata,
    ) -> Result<(), StoreError> {
        self.movie_metadata
            .lock()
            .expect("lock")
            .push((movie_id, metadata.clone()));
        Ok(())
    }

    async fn upsert_season(
        &self,
        _show_id: i64,
        season: &SeasonSummary,
    ) -> Result<SeasonUpsert, StoreError> {
        let mut seasons = self.seasons.lock().expect("lock");
        if let Some(&season_id) = seasons.get(&season.external_id) {
            return Ok(SeasonUpsert {
                season_id,
                inserted: false,
            });
        }
        let season_id = 1000 + i64::try_from(seasons.len()).unwrap_or(0);
        seasons.insert(season.external_id, season_id);
        Ok(SeasonUpsert {
            season_id,
            inserted: true,
        })
    }

    async fn upsert_episodes(
        &self,
        _show_id: i64,
        _season_id: i64,
        episodes: &[EpisodeSummary],
    ) -> Result<usize, StoreError> {
        let mut stored = self.episodes.lock().expect("lock");
        let mut inserted = 0;
        for episode in episodes {
            if !stored.contains(&episode.external_id) {
                stored.push(episode.external_id);
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[async_trait]
impl WatchStatusStore for MemoryStore {
    async fn show_watch_status(
        &self,
        profile_id: i64,
        show_id: i64,
    ) -> Result<Option<WatchStatus>, StoreError> {
        Ok(self.show_status(profile_id, show_id))
    }

    async fn update_show_watch_status(
        &self,
        profile_id: i64,
        show_id: i64,
        status: WatchStatus,
    ) -> Result<bool, StoreError> {
        let mut map = self.show_status.lock().expect("lock");
        Ok(map
            .get_mut(&(profile_id, show_id))
            .map(|slot| *slot = status)
            .is_some())
    }

    async fn season_watch_status(
        &self,
        profile_id: i64,
        season_id: i64,
    ) -> Result<Option<WatchStatus>, StoreError> {
        Ok(self.season_status(profile_id, season_id))
    }

    async fn update_season_watch_status(
        &self,
        profile_id: i64,
        season_id: i64,
        status: WatchStatus,
    ) -> Result<bool, StoreError> {
        let mut map = self.season_status.lock().expect("lock");
        Ok(map
            .get_mut(&(profile_id, season_id))
            .map(|slot| *slot = status)
            .is_some())
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryCatalog {
    pub changes: HashMap<i64, Vec<ChangeRecord>>,
    pub season_changes: HashMap<i64, Vec<ChangeRecord>>,
    pub shows: HashMap<i64, ShowDetails>,
    /// (show external id, season number) -> episodes
    pub episodes: HashMap<(i64, i32), Vec<EpisodeSummary>>,
    pub movies: HashMap<i64, MovieMetadata>,
    pub failing_items: Vec<i64>,
    pub windows: Mutex<Vec<DateWindow>>,
    pub requests: Mutex<usize>,
}

impl MemoryCatalog {
    fn count(&self) {
        *self.requests.lock().expect("lock") += 1;
    }

    pub fn request_count(&self) -> usize {
        *self.requests.lock().expect("lock")
    }
}

#[async_trait]
impl ChangeCatalog for MemoryCatalog {
    async fn changes(
        &self,
        _kind: ContentKind,
        external_id: i64,
        window: &DateWindow,
    ) -> Result<Vec<ChangeRecord>, CatalogError> {
        self.count();
        self.windows.lock().expect("lock").push(window.clone());
        if self.failing_items.contains(&external_id) {
            return Err(CatalogError::Transport("connection refused".into()));
        }
        Ok(self.changes.get(&external_id).cloned().unwrap_or_default())
    }

    async fn season_changes(
        &self,
        season_external_id: i64,
        _window: &DateWindow,
    ) -> Result<Vec<ChangeRecord>, CatalogError> {
        self.count();
        Ok(self
            .season_changes
            .get(&season_external_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn show_details(&self, external_id: i64) -> Result<ShowDetails, CatalogError> {
        self.count();
        self.shows
            .get(&external_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("tv/{external_id}")))
    }

    async fn season_episodes(
        &self,
        show_external_id: i64,
        season_number: i32,
    ) -> Result<Vec<EpisodeSummary>, CatalogError> {
        self.count();
        Ok(self
            .episodes
            .get(&(show_external_id, season_number))
            .cloned()
            .unwrap_or_default())
    }

    async fn movie_details(&self, external_id: i64) -> Result<MovieMetadata, CatalogError> {
        self.count();
        self.movies
            .get(&external_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("movie/{external_id}")))
    }
}
