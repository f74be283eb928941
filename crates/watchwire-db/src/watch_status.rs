//! Per-profile watch status for shows and seasons.
//!
//! Statuses are stored as their `SCREAMING_SNAKE_CASE` names and guarded by a
//! CHECK constraint, so a value that fails to parse here means the schema and
//! [`WatchStatus`] have drifted apart.

use sqlx::PgPool;
use watchwire_core::WatchStatus;

use crate::DbError;

fn parse_status(raw: Option<String>) -> Result<Option<WatchStatus>, DbError> {
    raw.map(|value| {
        value
            .parse::<WatchStatus>()
            .map_err(|_| DbError::InvalidWatchStatus(value))
    })
    .transpose()
}

/// Returns the profile's status for a show, or `None` when no row exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure or
/// [`DbError::InvalidWatchStatus`] for an unrecognised stored value.
pub async fn get_show_watch_status(
    pool: &PgPool,
    profile_id: i64,
    show_id: i64,
) -> Result<Option<WatchStatus>, DbError> {
    let raw = sqlx::query_scalar::<_, String>(
        "SELECT status FROM show_watch_status WHERE profile_id = $1 AND show_id = $2",
    )
    .bind(profile_id)
    .bind(show_id)
    .fetch_optional(pool)
    .await?;

    parse_status(raw)
}

/// Overwrites an existing show status row. Returns `false` when the profile
/// has no row for the show.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the update fails.
pub async fn set_show_watch_status(
    pool: &PgPool,
    profile_id: i64,
    show_id: i64,
    status: WatchStatus,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        "UPDATE show_watch_status SET status = $1, updated_at = NOW() \
         WHERE profile_id = $2 AND show_id = $3",
    )
    .bind(status.as_str())
    .bind(profile_id)
    .bind(show_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Returns the profile's status for a season, or `None` when no row exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure or
/// [`DbError::InvalidWatchStatus`] for an unrecognised stored value.
pub async fn get_season_watch_status(
    pool: &PgPool,
    profile_id: i64,
    season_id: i64,
) -> Result<Option<WatchStatus>, DbError> {
    let raw = sqlx::query_scalar::<_, String>(
        "SELECT status FROM season_watch_status WHERE profile_id = $1 AND season_id = $2",
    )
    .bind(profile_id)
    .bind(season_id)
    .fetch_optional(pool)
    .await?;

    parse_status(raw)
}

/// Overwrites an existing season status row. Returns `false` when the
/// profile has no row for the season.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the update fails.
pub async fn set_season_watch_status(
    pool: &PgPool,
    profile_id: i64,
    season_id: i64,
    status: WatchStatus,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        "UPDATE season_watch_status SET status = $1, updated_at = NOW() \
         WHERE profile_id = $2 AND season_id = $3",
    )
    .bind(status.as_str())
    .bind(profile_id)
    .bind(season_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
