//! Conversion of TMDB response types into `watchwire-core` domain types.

use chrono::NaiveDate;
use serde_json::Value;
use watchwire_core::{
    ChangeAction, ChangeKey, ChangeRecord, ChangeValue, EpisodeSummary, MovieMetadata,
    SeasonSummary, ShowDetails, ShowMetadata,
};

use crate::types::{
    ChangeGroup, EpisodeEntry, MovieResponse, RawChangeItem, SeasonEntry, ShowResponse,
};

/// Parses a `"YYYY-MM-DD"` date. Empty or malformed strings yield `None`.
#[must_use]
pub fn parse_date(s: Option<&str>) -> Option<NaiveDate> {
    s.filter(|v| !v.is_empty())
        .and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
}

/// Flattens grouped change items into typed [`ChangeRecord`]s.
///
/// Items that do not deserialize, or carry an action other than
/// added/updated/deleted, are skipped.
#[must_use]
pub fn normalize_changes(groups: Vec<ChangeGroup>) -> Vec<ChangeRecord> {
    let mut records = Vec::new();
    for group in groups {
        let key = ChangeKey::parse(&group.key);
        for raw in group.items {
            let item = match serde_json::from_value::<RawChangeItem>(raw) {
                Ok(item) => item,
                Err(e) => {
                    tracing::warn!(
                        key = %group.key,
                        error = %e,
                        "tmdb: skipping malformed change item"
                    );
                    continue;
                }
            };
            let Some(action) = ChangeAction::parse(&item.action) else {
                tracing::debug!(
                    key = %group.key,
                    action = %item.action,
                    "tmdb: ignoring change action"
                );
                continue;
            };
            records.push(ChangeRecord {
                value: resolve_value(&key, item.value.as_ref()),
                original_value: resolve_value(&key, item.original_value.as_ref()),
                id: item.id,
                key: key.clone(),
                action,
                time: item.time,
                iso_639_1: item.iso_639_1,
                iso_3166_1: item.iso_3166_1,
            });
        }
    }
    records
}

/// Resolves an untyped change payload for `key`.
///
/// Season and episode payloads must carry their identifier; anything else
/// under those keys resolves to `None`. Other keys resolve to
/// [`ChangeValue::Metadata`] whenever a non-null payload is present.
fn resolve_value(key: &ChangeKey, raw: Option<&Value>) -> Option<ChangeValue> {
    let raw = raw.filter(|v| !v.is_null())?;
    match key {
        ChangeKey::Season => Some(ChangeValue::Season {
            season_id: raw.get("season_id").and_then(Value::as_i64)?,
            season_number: int_field(raw, "season_number"),
        }),
        ChangeKey::Episode => Some(ChangeValue::Episode {
            episode_id: raw.get("episode_id").and_then(Value::as_i64)?,
            episode_number: int_field(raw, "episode_number"),
        }),
        _ => Some(ChangeValue::Metadata),
    }
}

fn int_field(raw: &Value, field: &str) -> Option<i32> {
    raw.get(field)
        .and_then(Value::as_i64)
        .and_then(|n| i32::try_from(n).ok())
}

#[must_use]
pub fn show_details(show: ShowResponse) -> ShowDetails {
    let seasons: Vec<SeasonSummary> = show.seasons.into_iter().map(season_summary).collect();
    let episode_count = show
        .number_of_episodes
        .unwrap_or_else(|| seasons.iter().map(|s| s.episode_count).sum());
    let season_count = show
        .number_of_seasons
        .unwrap_or_else(|| i32::try_from(seasons.len()).unwrap_or(i32::MAX));

    ShowDetails {
        metadata: ShowMetadata {
            title: show.name,
            overview: show.overview.filter(|o| !o.is_empty()),
            status: show.status,
            poster_path: show.poster_path,
            first_air_date: parse_date(show.first_air_date.as_deref()),
            last_air_date: parse_date(show.last_air_date.as_deref()),
            season_count,
            episode_count,
        },
        seasons,
    }
}

fn season_summary(season: SeasonEntry) -> SeasonSummary {
    SeasonSummary {
        external_id: season.id,
        season_number: season.season_number,
        name: season
            .name
            .unwrap_or_else(|| format!("Season {}", season.season_number)),
        overview: season.overview.filter(|o| !o.is_empty()),
        air_date: parse_date(season.air_date.as_deref()),
        episode_count: season.episode_count.unwrap_or(0),
        poster_path: season.poster_path,
    }
}

#[must_use]
pub fn episode_summary(episode: EpisodeEntry) -> EpisodeSummary {
    EpisodeSummary {
        external_id: episode.id,
        episode_number: episode.episode_number,
        season_number: episode.season_number,
        name: episode
            .name
            .unwrap_or_else(|| format!("Episode {}", episode.episode_number)),
        overview: episode.overview.filter(|o| !o.is_empty()),
        air_date: parse_date(episode.air_date.as_deref()),
        runtime: episode.runtime,
        still_path: episode.still_path,
    }
}

#[must_use]
pub fn movie_metadata(movie: MovieResponse) -> MovieMetadata {
    MovieMetadata {
        title: movie.title,
        overview: movie.overview.filter(|o| !o.is_empty()),
        release_date: parse_date(movie.release_date.as_deref()),
        runtime: movie.runtime,
        poster_path: movie.poster_path,
        status: movie.status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChangesResponse;

    fn groups(body: serde_json::Value) -> Vec<ChangeGroup> {
        serde_json::from_value::<ChangesResponse>(body)
            .expect("fixture should parse")
            .changes
    }

    #[test]
    fn season_payload_becomes_typed_value() {
        let records = normalize_changes(groups(serde_json::json!({
            "changes": [{
                "key": "season",
                "items": [{
                    "id": "64a1",
                    "action": "added",
                    "time": "2023-01-01 10:00:00 UTC",
                    "value": { "season_id": 3001, "season_number": 4 }
                }]
            }]
        })));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, ChangeKey::Season);
        assert_eq!(records[0].action, ChangeAction::Added);
        assert_eq!(
            records[0].value,
            Some(ChangeValue::Season {
                season_id: 3001,
                season_number: Some(4)
            })
        );
        assert_eq!(records[0].original_value, None);
    }

    #[test]
    fn null_or_keyless_payloads_resolve_to_none() {
        let records = normalize_changes(groups(serde_json::json!({
            "changes": [{
                "key": "season",
                "items": [
                    { "id": "a", "action": "updated", "value": null },
                    { "id": "b", "action": "updated" },
                    { "id": "c", "action": "updated", "value": { "season_number": 2 } }
                ]
            }]
        })));
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.value.is_none()));
    }

    #[test]
    fn metadata_keys_resolve_to_metadata_marker() {
        let records = normalize_changes(groups(serde_json::json!({
            "changes": [{
                "key": "overview",
                "items": [{
                    "id": "o1",
                    "action": "updated",
                    "iso_639_1": "en",
                    "value": "A new synopsis",
                    "original_value": "The old synopsis"
                }]
            }]
        })));
        assert_eq!(records[0].key, ChangeKey::Overview);
        assert_eq!(records[0].value, Some(ChangeValue::Metadata));
        assert_eq!(records[0].original_value, Some(ChangeValue::Metadata));
        assert_eq!(records[0].iso_639_1.as_deref(), Some("en"));
    }

    #[test]
    fn malformed_items_and_unknown_actions_are_skipped() {
        let records = normalize_changes(groups(serde_json::json!({
            "changes": [{
                "key": "episode",
                "items": [
                    { "action": "added", "value": { "episode_id": 1 } },
                    { "id": "x", "action": "created", "value": { "episode_id": 2 } },
                    { "id": "y", "action": "added", "value": { "episode_id": 3, "episode_number": 9 } }
                ]
            }]
        })));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].episode_id(), Some(3));
    }

    #[test]
    fn parse_date_tolerates_empty_strings() {
        assert_eq!(parse_date(Some("")), None);
        assert_eq!(parse_date(Some("not-a-date")), None);
        assert_eq!(
            parse_date(Some("2024-02-29")),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn show_details_fills_season_defaults() {
        let show: ShowResponse = serde_json::from_value(serde_json::json!({
            "id": 1399,
            "name": "Example Show",
            "overview": "",
            "first_air_date": "2011-04-17",
            "last_air_date": "",
            "seasons": [
                { "id": 3624, "season_number": 1, "episode_count": 10 },
                { "id": 3625, "season_number": 2, "name": "Second", "episode_count": 8 }
            ]
        }))
        .unwrap();
        let details = show_details(show);
        assert_eq!(details.metadata.title, "Example Show");
        assert_eq!(details.metadata.overview, None);
        assert_eq!(details.metadata.last_air_date, None);
        assert_eq!(details.metadata.season_count, 2);
        assert_eq!(details.metadata.episode_count, 18);
        assert_eq!(details.seasons[0].name, "Season 1");
        assert_eq!(details.seasons[1].name, "Second");
    }
}
