//! Live integration tests for watchwire-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database from the sqlx
//! test harness, which needs `DATABASE_URL` pointing at a server it can
//! create databases on. Run with `cargo test -p watchwire-db -- --ignored`.

use chrono::NaiveDate;
use watchwire_core::{
    ContentKind, ContentStore, EpisodeSummary, SeasonSummary, ShowMetadata, WatchStatus,
    WatchStatusStore,
};
use watchwire_db::{
    get_season_watch_status, get_tracked_item, list_movies_for_updates, list_shows_for_updates,
    upsert_episodes, upsert_season, PgStore,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn insert_profile(pool: &sqlx::PgPool, name: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO profiles (account_id, name) VALUES (1, $1) RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap_or_else(|e| panic!("insert_profile failed for '{name}': {e}"))
}

async fn insert_show(pool: &sqlx::PgPool, tmdb_id: i64, status: Option<&str>) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO shows (tmdb_id, title, status) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(tmdb_id)
    .bind(format!("Show {tmdb_id}"))
    .bind(status)
    .fetch_one(pool)
    .await
    .unwrap_or_else(|e| panic!("insert_show failed for tmdb_id {tmdb_id}: {e}"))
}

fn season(external_id: i64, season_number: i32) -> SeasonSummary {
    SeasonSummary {
        external_id,
        season_number,
        name: format!("Season {season_number}"),
        overview: None,
        air_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        episode_count: 2,
        poster_path: None,
    }
}

fn episode(external_id: i64, episode_number: i32) -> EpisodeSummary {
    EpisodeSummary {
        external_id,
        episode_number,
        season_number: 1,
        name: format!("Episode {episode_number}"),
        overview: None,
        air_date: None,
        runtime: Some(42),
        still_path: None,
    }
}

// ---------------------------------------------------------------------------
// Candidate selection
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn ended_shows_are_not_candidates(pool: sqlx::PgPool) {
    let running = insert_show(&pool, 100, Some("Returning Series")).await;
    let unknown = insert_show(&pool, 101, None).await;
    insert_show(&pool, 102, Some("Ended")).await;
    insert_show(&pool, 103, Some("Canceled")).await;

    let rows = list_shows_for_updates(&pool)
        .await
        .expect("list_shows_for_updates failed");

    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![running, unknown]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn old_movies_are_not_candidates(pool: sqlx::PgPool) {
    sqlx::query(
        "INSERT INTO movies (tmdb_id, title, release_date) VALUES \
         (1, 'Unreleased', NULL), \
         (2, 'Recent', CURRENT_DATE - 10), \
         (3, 'Classic', DATE '1999-03-31')",
    )
    .execute(&pool)
    .await
    .expect("seed movies failed");

    let rows = list_movies_for_updates(&pool)
        .await
        .expect("list_movies_for_updates failed");

    let tmdb_ids: Vec<i64> = rows.iter().map(|row| row.tmdb_id).collect();
    assert_eq!(tmdb_ids, vec![1, 2]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn get_tracked_item_distinguishes_kinds(pool: sqlx::PgPool) {
    let show_id = insert_show(&pool, 150, None).await;

    let row = get_tracked_item(&pool, ContentKind::Show, show_id)
        .await
        .expect("show should exist");
    assert_eq!(row.tmdb_id, 150);

    let missing = get_tracked_item(&pool, ContentKind::Movie, show_id).await;
    assert!(matches!(missing, Err(watchwire_db::DbError::NotFound)));
}

// ---------------------------------------------------------------------------
// Seasons and episodes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn upsert_season_reports_insert_then_update(pool: sqlx::PgPool) {
    let show_id = insert_show(&pool, 200, None).await;

    let first = upsert_season(&pool, show_id, &season(9001, 1))
        .await
        .expect("first upsert failed");
    let second = upsert_season(&pool, show_id, &season(9001, 1))
        .await
        .expect("second upsert failed");

    assert!(first.inserted);
    assert!(!second.inserted);
    assert_eq!(first.season_id, second.season_id);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn upsert_episodes_counts_only_new_rows(pool: sqlx::PgPool) {
    let show_id = insert_show(&pool, 300, None).await;
    let upsert = upsert_season(&pool, show_id, &season(9100, 1))
        .await
        .expect("upsert_season failed");

    let first = upsert_episodes(&pool, show_id, upsert.season_id, &[episode(1, 1)])
        .await
        .expect("first upsert_episodes failed");
    let second = upsert_episodes(
        &pool,
        show_id,
        upsert.season_id,
        &[episode(1, 1), episode(2, 2)],
    )
    .await
    .expect("second upsert_episodes failed");

    assert_eq!(first, 1);
    assert_eq!(second, 1);
}

// ---------------------------------------------------------------------------
// Store adapter
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn store_updates_show_metadata(pool: sqlx::PgPool) {
    let show_id = insert_show(&pool, 400, None).await;
    let store = PgStore::new(pool.clone());

    let metadata = ShowMetadata {
        title: "Renamed".to_string(),
        overview: Some("New overview".to_string()),
        status: Some("Ended".to_string()),
        poster_path: None,
        first_air_date: NaiveDate::from_ymd_opt(2020, 1, 1),
        last_air_date: None,
        season_count: 3,
        episode_count: 30,
    };
    store
        .update_show_metadata(show_id, &metadata)
        .await
        .expect("update_show_metadata failed");

    let candidates = store
        .items_for_updates(ContentKind::Show)
        .await
        .expect("items_for_updates failed");
    assert!(candidates.is_empty(), "ended show must drop out of candidates");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn store_round_trips_watch_status(pool: sqlx::PgPool) {
    let profile_id = insert_profile(&pool, "alice").await;
    let show_id = insert_show(&pool, 500, None).await;
    let upsert = upsert_season(&pool, show_id, &season(9500, 1))
        .await
        .expect("upsert_season failed");
    sqlx::query(
        "INSERT INTO season_watch_status (profile_id, season_id, status) VALUES ($1, $2, 'WATCHED')",
    )
    .bind(profile_id)
    .bind(upsert.season_id)
    .execute(&pool)
    .await
    .expect("seed season status failed");

    let store = PgStore::new(pool.clone());
    let updated = store
        .update_season_watch_status(profile_id, upsert.season_id, WatchStatus::Watching)
        .await
        .expect("update_season_watch_status failed");
    assert!(updated);

    let status = get_season_watch_status(&pool, profile_id, upsert.season_id)
        .await
        .expect("get_season_watch_status failed");
    assert_eq!(status, Some(WatchStatus::Watching));

    let missing = store
        .update_show_watch_status(profile_id, show_id, WatchStatus::Watching)
        .await
        .expect("update_show_watch_status failed");
    assert!(!missing, "no show status row exists yet");
}
