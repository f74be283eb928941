//! TMDB API response types.
//!
//! Only the fields the worker reads are modelled. TMDB returns empty strings
//! for unknown dates, so date fields stay as raw strings here and are parsed
//! during conversion.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Change feeds: /tv/{id}/changes, /tv/season/{id}/changes, /movie/{id}/changes
// ---------------------------------------------------------------------------

/// Wrapper for every changes endpoint: `{ "changes": [ { key, items }, ... ] }`.
#[derive(Debug, Deserialize)]
pub struct ChangesResponse {
    #[serde(default)]
    pub changes: Vec<ChangeGroup>,
}

/// All changes for one category key. Items stay untyped so one malformed
/// entry can be skipped without losing the rest of the group.
#[derive(Debug, Deserialize)]
pub struct ChangeGroup {
    pub key: String,
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawChangeItem {
    pub id: String,
    pub action: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub iso_639_1: Option<String>,
    #[serde(default)]
    pub iso_3166_1: Option<String>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub original_value: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// GET /tv/{id}
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ShowResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub last_air_date: Option<String>,
    #[serde(default)]
    pub number_of_seasons: Option<i32>,
    #[serde(default)]
    pub number_of_episodes: Option<i32>,
    #[serde(default)]
    pub seasons: Vec<SeasonEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SeasonEntry {
    pub id: i64,
    pub season_number: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub episode_count: Option<i32>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /tv/{id}/season/{season_number}
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SeasonResponse {
    pub id: i64,
    pub season_number: i32,
    #[serde(default)]
    pub episodes: Vec<EpisodeEntry>,
}

#[derive(Debug, Deserialize)]
pub struct EpisodeEntry {
    pub id: i64,
    pub episode_number: i32,
    pub season_number: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<i32>,
    #[serde(default)]
    pub still_path: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /movie/{id}
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<i32>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Error body TMDB sends with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    #[serde(default)]
    pub status_code: Option<i32>,
    #[serde(default)]
    pub status_message: Option<String>,
}
