//! Pure helpers over catalog change records.

use std::collections::HashSet;

use watchwire_core::{ChangeKey, ChangeRecord};

/// Distinct season ids carried by the records' current payloads, in the order
/// they first appear. `original_value` is never consulted.
#[must_use]
pub fn filter_unique_season_ids(changes: &[ChangeRecord]) -> Vec<i64> {
    unique_in_order(changes.iter().filter_map(ChangeRecord::season_id))
}

/// Episode counterpart of [`filter_unique_season_ids`].
#[must_use]
pub fn filter_unique_episode_ids(changes: &[ChangeRecord]) -> Vec<i64> {
    unique_in_order(changes.iter().filter_map(ChangeRecord::episode_id))
}

/// Whether any record adds a season or an episode.
#[must_use]
pub fn has_structural_additions(changes: &[ChangeRecord]) -> bool {
    changes
        .iter()
        .any(|change| change.key.is_structural() && change.is_addition())
}

/// Whether the record touches a category local storage keeps.
#[must_use]
pub fn is_relevant(change: &ChangeRecord) -> bool {
    change.key.is_tracked()
}

/// Season ids whose payload arrived with an `added` season record.
pub(crate) fn added_season_ids(changes: &[ChangeRecord]) -> HashSet<i64> {
    changes
        .iter()
        .filter(|change| change.key == ChangeKey::Season && change.is_addition())
        .filter_map(ChangeRecord::season_id)
        .collect()
}

fn unique_in_order(ids: impl Iterator<Item = i64>) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
