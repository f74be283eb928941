//! Lookups against the `show_favorites` and `movie_favorites` join tables.

use sqlx::PgPool;

use crate::DbError;

/// Profile ids that have favorited the show, ascending.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_show_favoriting_profiles(
    pool: &PgPool,
    show_id: i64,
) -> Result<Vec<i64>, DbError> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT profile_id FROM show_favorites WHERE show_id = $1 ORDER BY profile_id",
    )
    .bind(show_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

/// Profile ids that have favorited the movie, ascending.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_movie_favoriting_profiles(
    pool: &PgPool,
    movie_id: i64,
) -> Result<Vec<i64>, DbError> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT profile_id FROM movie_favorites WHERE movie_id = $1 ORDER BY profile_id",
    )
    .bind(movie_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}
