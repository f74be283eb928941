use super::*;
use watchwire_core::{ChangeAction, ChangeValue};

fn record(key: ChangeKey, action: ChangeAction, value: Option<ChangeValue>) -> ChangeRecord {
    ChangeRecord {
        id: "rec".to_string(),
        key,
        action,
        time: Some("2024-03-01 10:00:00 UTC".to_string()),
        iso_639_1: None,
        iso_3166_1: None,
        value,
        original_value: None,
    }
}

fn season(season_id: i64) -> Option<ChangeValue> {
    Some(ChangeValue::Season {
        season_id,
        season_number: None,
    })
}

fn episode(episode_id: i64) -> Option<ChangeValue> {
    Some(ChangeValue::Episode {
        episode_id,
        episode_number: None,
    })
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(filter_unique_season_ids(&[]).is_empty());
    assert!(filter_unique_episode_ids(&[]).is_empty());
}

#[test]
fn records_without_a_season_payload_are_skipped() {
    let changes = vec![
        record(ChangeKey::Season, ChangeAction::Added, None),
        record(ChangeKey::Overview, ChangeAction::Updated, Some(ChangeValue::Metadata)),
        record(ChangeKey::Episode, ChangeAction::Added, episode(5)),
        record(ChangeKey::Season, ChangeAction::Added, season(11)),
    ];

    assert_eq!(filter_unique_season_ids(&changes), vec![11]);
}

#[test]
fn duplicates_collapse_in_first_seen_order() {
    let changes = vec![
        record(ChangeKey::Season, ChangeAction::Added, season(30)),
        record(ChangeKey::Season, ChangeAction::Updated, season(10)),
        record(ChangeKey::Season, ChangeAction::Updated, season(30)),
        record(ChangeKey::Season, ChangeAction::Deleted, season(20)),
        record(ChangeKey::Season, ChangeAction::Added, season(10)),
    ];

    assert_eq!(filter_unique_season_ids(&changes), vec![30, 10, 20]);
}

#[test]
fn original_value_is_ignored() {
    let mut change = record(ChangeKey::Season, ChangeAction::Updated, None);
    change.original_value = season(99);

    assert!(filter_unique_season_ids(&[change]).is_empty());
}

#[test]
fn episode_ids_follow_the_same_rules() {
    let changes = vec![
        record(ChangeKey::Episode, ChangeAction::Added, episode(7)),
        record(ChangeKey::Episode, ChangeAction::Added, None),
        record(ChangeKey::Episode, ChangeAction::Added, episode(7)),
        record(ChangeKey::Episode, ChangeAction::Added, episode(3)),
    ];

    assert_eq!(filter_unique_episode_ids(&changes), vec![7, 3]);
}

#[test]
fn structural_additions_require_added_action() {
    let updated_only = vec![record(ChangeKey::Season, ChangeAction::Updated, season(1))];
    let metadata_added = vec![record(
        ChangeKey::Genres,
        ChangeAction::Added,
        Some(ChangeValue::Metadata),
    )];
    let season_added = vec![record(ChangeKey::Season, ChangeAction::Added, season(1))];

    assert!(!has_structural_additions(&updated_only));
    assert!(!has_structural_additions(&metadata_added));
    assert!(has_structural_additions(&season_added));
}

#[test]
fn untracked_categories_are_not_relevant() {
    let other = record(
        ChangeKey::Other("production_companies".to_string()),
        ChangeAction::Updated,
        None,
    );
    let name = record(ChangeKey::Name, ChangeAction::Updated, None);

    assert!(!is_relevant(&other));
    assert!(is_relevant(&name));
}

#[test]
fn added_season_ids_only_picks_season_additions() {
    let changes = vec![
        record(ChangeKey::Season, ChangeAction::Updated, season(1)),
        record(ChangeKey::Season, ChangeAction::Added, season(2)),
        record(ChangeKey::Episode, ChangeAction::Deleted, episode(8)),
        record(ChangeKey::Episode, ChangeAction::Added, episode(9)),
    ];

    assert_eq!(added_season_ids(&changes), HashSet::from([2]));
}
