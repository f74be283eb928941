//! Database operations for the `shows` and `movies` tables.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use watchwire_core::{ContentKind, MovieMetadata, ShowMetadata, TrackedItem};

use crate::DbError;

/// Movies released longer ago than this are no longer checked for changes.
const MOVIE_RECHECK_WINDOW_DAYS: i32 = 90;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// The columns of `shows`/`movies` the change sweep reads.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrackedItemRow {
    pub id: i64,
    pub tmdb_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrackedItemRow {
    #[must_use]
    pub fn into_item(self, kind: ContentKind) -> TrackedItem {
        TrackedItem {
            id: self.id,
            kind,
            title: self.title,
            external_id: self.tmdb_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns shows that can still gain seasons or episodes: anything not
/// marked `Ended` or `Canceled`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_shows_for_updates(pool: &PgPool) -> Result<Vec<TrackedItemRow>, DbError> {
    let rows = sqlx::query_as::<_, TrackedItemRow>(
        "SELECT id, tmdb_id, title, created_at, updated_at \
         FROM shows \
         WHERE status IS NULL OR status NOT IN ('Ended', 'Canceled') \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns movies that are unreleased or were released recently.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_movies_for_updates(pool: &PgPool) -> Result<Vec<TrackedItemRow>, DbError> {
    let rows = sqlx::query_as::<_, TrackedItemRow>(
        "SELECT id, tmdb_id, title, created_at, updated_at \
         FROM movies \
         WHERE release_date IS NULL OR release_date >= CURRENT_DATE - $1 \
         ORDER BY id",
    )
    .bind(MOVIE_RECHECK_WINDOW_DAYS)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetches one show or movie by local id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row matches, or [`DbError::Sqlx`] if
/// the query fails.
pub async fn get_tracked_item(
    pool: &PgPool,
    kind: ContentKind,
    id: i64,
) -> Result<TrackedItemRow, DbError> {
    let sql = match kind {
        ContentKind::Show => {
            "SELECT id, tmdb_id, title, created_at, updated_at FROM shows WHERE id = $1"
        }
        ContentKind::Movie => {
            "SELECT id, tmdb_id, title, created_at, updated_at FROM movies WHERE id = $1"
        }
    };

    sqlx::query_as::<_, TrackedItemRow>(sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)
}

/// Overwrites a show's catalog metadata and bumps `updated_at`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no show has `show_id`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn update_show_metadata(
    pool: &PgPool,
    show_id: i64,
    metadata: &ShowMetadata,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE shows \
         SET title = $1, overview = $2, status = $3, poster_path = $4, \
             first_air_date = $5, last_air_date = $6, season_count = $7, \
             episode_count = $8, updated_at = NOW() \
         WHERE id = $9",
    )
    .bind(&metadata.title)
    .bind(&metadata.overview)
    .bind(&metadata.status)
    .bind(&metadata.poster_path)
    .bind(metadata.first_air_date)
    .bind(metadata.last_air_date)
    .bind(metadata.season_count)
    .bind(metadata.episode_count)
    .bind(show_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Overwrites a movie's catalog metadata and bumps `updated_at`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no movie has `movie_id`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn update_movie_metadata(
    pool: &PgPool,
    movie_id: i64,
    metadata: &MovieMetadata,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE movies \
         SET title = $1, overview = $2, release_date = $3, runtime = $4, \
             poster_path = $5, status = $6, updated_at = NOW() \
         WHERE id = $7",
    )
    .bind(&metadata.title)
    .bind(&metadata.overview)
    .bind(metadata.release_date)
    .bind(metadata.runtime)
    .bind(&metadata.poster_path)
    .bind(&metadata.status)
    .bind(movie_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
