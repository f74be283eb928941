use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A profile's progress through a show or season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WatchStatus {
    NotWatched,
    Watching,
    Watched,
}

impl WatchStatus {
    /// Storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WatchStatus::NotWatched => "NOT_WATCHED",
            WatchStatus::Watching => "WATCHING",
            WatchStatus::Watched => "WATCHED",
        }
    }

    /// Status a profile should move to when new content appears under an
    /// item it has this status for. Only a finished item reopens.
    #[must_use]
    pub fn after_new_content(self) -> Option<WatchStatus> {
        match self {
            WatchStatus::Watched => Some(WatchStatus::Watching),
            WatchStatus::Watching | WatchStatus::NotWatched => None,
        }
    }
}

impl std::fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_WATCHED" => Ok(WatchStatus::NotWatched),
            "WATCHING" => Ok(WatchStatus::Watching),
            "WATCHED" => Ok(WatchStatus::Watched),
            other => Err(format!("unknown watch status '{other}'")),
        }
    }
}
