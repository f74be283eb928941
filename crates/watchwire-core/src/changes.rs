//! Typed change records reported by the external catalog.
//!
//! The catalog groups changes by category key and carries an untyped
//! payload per record. Adapters resolve the payload into a [`ChangeValue`]
//! once, so everything downstream can match exhaustively instead of probing
//! for keys.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Added,
    Updated,
    Deleted,
}

impl ChangeAction {
    /// Parses the catalog's action string. Unknown actions yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "added" => Some(ChangeAction::Added),
            "updated" => Some(ChangeAction::Updated),
            "deleted" => Some(ChangeAction::Deleted),
            _ => None,
        }
    }
}

/// Category a change record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKey {
    Season,
    Episode,
    Name,
    Overview,
    Status,
    Images,
    Genres,
    ReleaseDates,
    Runtime,
    Other(String),
}

impl ChangeKey {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "season" => ChangeKey::Season,
            "episode" => ChangeKey::Episode,
            "name" | "title" => ChangeKey::Name,
            "overview" => ChangeKey::Overview,
            "status" => ChangeKey::Status,
            "images" | "poster_path" => ChangeKey::Images,
            "genres" => ChangeKey::Genres,
            "release_dates" | "release_date" | "first_air_date" => ChangeKey::ReleaseDates,
            "runtime" | "episode_run_time" => ChangeKey::Runtime,
            other => ChangeKey::Other(other.to_string()),
        }
    }

    /// Structural keys add or remove child content (seasons, episodes).
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, ChangeKey::Season | ChangeKey::Episode)
    }

    /// Whether local state tracks this category at all.
    #[must_use]
    pub fn is_tracked(&self) -> bool {
        !matches!(self, ChangeKey::Other(_))
    }
}

/// Resolved payload of a change record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeValue {
    Season {
        season_id: i64,
        season_number: Option<i32>,
    },
    Episode {
        episode_id: i64,
        episode_number: Option<i32>,
    },
    /// A payload for a metadata category; its contents are never read.
    Metadata,
}

/// One unit of reported change for a catalog entry within a date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub id: String,
    pub key: ChangeKey,
    pub action: ChangeAction,
    pub time: Option<String>,
    pub iso_639_1: Option<String>,
    pub iso_3166_1: Option<String>,
    pub value: Option<ChangeValue>,
    pub original_value: Option<ChangeValue>,
}

impl ChangeRecord {
    #[must_use]
    pub fn season_id(&self) -> Option<i64> {
        match self.value {
            Some(ChangeValue::Season { season_id, .. }) => Some(season_id),
            _ => None,
        }
    }

    #[must_use]
    pub fn episode_id(&self) -> Option<i64> {
        match self.value {
            Some(ChangeValue::Episode { episode_id, .. }) => Some(episode_id),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_addition(&self) -> bool {
        self.action == ChangeAction::Added
    }
}
