//! Database operations for the `seasons` and `episodes` tables.

use sqlx::PgPool;
use watchwire_core::{EpisodeSummary, SeasonSummary, SeasonUpsert};

use crate::DbError;

/// Inserts or refreshes a season keyed by its TMDB id.
///
/// `inserted` is derived from `xmax = 0`, which holds only for rows created
/// by this statement rather than updated by the conflict branch.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_season(
    pool: &PgPool,
    show_id: i64,
    season: &SeasonSummary,
) -> Result<SeasonUpsert, DbError> {
    let (season_id, inserted) = sqlx::query_as::<_, (i64, bool)>(
        "INSERT INTO seasons \
             (show_id, tmdb_id, season_number, name, overview, air_date, episode_count, poster_path) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         ON CONFLICT (tmdb_id) DO UPDATE SET \
             season_number = EXCLUDED.season_number, \
             name          = EXCLUDED.name, \
             overview      = EXCLUDED.overview, \
             air_date      = EXCLUDED.air_date, \
             episode_count = EXCLUDED.episode_count, \
             poster_path   = EXCLUDED.poster_path, \
             updated_at    = NOW() \
         RETURNING id, (xmax = 0) AS inserted",
    )
    .bind(show_id)
    .bind(season.external_id)
    .bind(season.season_number)
    .bind(&season.name)
    .bind(&season.overview)
    .bind(season.air_date)
    .bind(season.episode_count)
    .bind(&season.poster_path)
    .fetch_one(pool)
    .await?;

    Ok(SeasonUpsert {
        season_id,
        inserted,
    })
}

/// Inserts or refreshes a season's episodes in one transaction and returns
/// how many rows were newly inserted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails; the transaction is
/// rolled back on drop.
pub async fn upsert_episodes(
    pool: &PgPool,
    show_id: i64,
    season_id: i64,
    episodes: &[EpisodeSummary],
) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    let mut inserted_count = 0usize;

    for episode in episodes {
        let inserted = sqlx::query_scalar::<_, bool>(
            "INSERT INTO episodes \
                 (show_id, season_id, tmdb_id, episode_number, season_number, name, \
                  overview, air_date, runtime, still_path) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (tmdb_id) DO UPDATE SET \
                 episode_number = EXCLUDED.episode_number, \
                 season_number  = EXCLUDED.season_number, \
                 name           = EXCLUDED.name, \
                 overview       = EXCLUDED.overview, \
                 air_date       = EXCLUDED.air_date, \
                 runtime        = EXCLUDED.runtime, \
                 still_path     = EXCLUDED.still_path, \
                 updated_at     = NOW() \
             RETURNING (xmax = 0) AS inserted",
        )
        .bind(show_id)
        .bind(season_id)
        .bind(episode.external_id)
        .bind(episode.episode_number)
        .bind(episode.season_number)
        .bind(&episode.name)
        .bind(&episode.overview)
        .bind(episode.air_date)
        .bind(episode.runtime)
        .bind(&episode.still_path)
        .fetch_one(&mut *tx)
        .await?;

        if inserted {
            inserted_count += 1;
        }
    }

    tx.commit().await?;
    Ok(inserted_count)
}
