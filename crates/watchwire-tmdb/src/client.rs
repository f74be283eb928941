//! HTTP client for the TMDB v3 REST API.
//!
//! Wraps `reqwest` with API key handling, typed error mapping for 404/429 and
//! other non-2xx statuses, and retry with back-off on transient failures.
//! Request errors are stripped of their URL before surfacing because the URL
//! carries the API key.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use watchwire_core::{
    AppConfig, ChangeRecord, DateWindow, EpisodeSummary, MovieMetadata, ShowDetails,
};

use crate::error::TmdbError;
use crate::normalize;
use crate::retry::retry_with_backoff;
use crate::types::{ChangesResponse, MovieResponse, SeasonResponse, ShowResponse, StatusBody};

/// Connection and retry settings for [`TmdbClient`].
#[derive(Debug, Clone)]
pub struct TmdbClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl TmdbClientConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.tmdb_api_key.clone(),
            base_url: config.tmdb_base_url.clone(),
            timeout_secs: config.tmdb_request_timeout_secs,
            max_retries: config.tmdb_max_retries,
            backoff_base_ms: config.tmdb_retry_backoff_base_ms,
        }
    }
}

/// Client for the TMDB REST API.
///
/// Point `base_url` at a wiremock server in tests.
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl TmdbClient {
    /// # Errors
    ///
    /// Returns [`TmdbError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`TmdbError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(config: &TmdbClientConfig) -> Result<Self, TmdbError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("watchwire/0.1 (change-sync)")
            .build()?;

        // Exactly one trailing slash, so `Url::join` appends to the API root
        // instead of replacing its last segment.
        let normalised = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| TmdbError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url,
            max_retries: config.max_retries,
            backoff_base_ms: config.backoff_base_ms,
        })
    }

    /// Changes to a show between the window's dates.
    ///
    /// # Errors
    ///
    /// Any [`TmdbError`] after retries are exhausted.
    pub async fn tv_changes(
        &self,
        show_id: i64,
        window: &DateWindow,
    ) -> Result<Vec<ChangeRecord>, TmdbError> {
        self.fetch_changes(&format!("tv/{show_id}/changes"), window).await
    }

    /// Changes to a single season, keyed by the season's TMDB id.
    ///
    /// # Errors
    ///
    /// Any [`TmdbError`] after retries are exhausted.
    pub async fn season_changes(
        &self,
        season_id: i64,
        window: &DateWindow,
    ) -> Result<Vec<ChangeRecord>, TmdbError> {
        self.fetch_changes(&format!("tv/season/{season_id}/changes"), window)
            .await
    }

    /// # Errors
    ///
    /// Any [`TmdbError`] after retries are exhausted.
    pub async fn movie_changes(
        &self,
        movie_id: i64,
        window: &DateWindow,
    ) -> Result<Vec<ChangeRecord>, TmdbError> {
        self.fetch_changes(&format!("movie/{movie_id}/changes"), window)
            .await
    }

    /// # Errors
    ///
    /// Any [`TmdbError`] after retries are exhausted.
    pub async fn get_show(&self, show_id: i64) -> Result<ShowDetails, TmdbError> {
        let show: ShowResponse = self.get_json(&format!("tv/{show_id}"), &[]).await?;
        Ok(normalize::show_details(show))
    }

    /// # Errors
    ///
    /// Any [`TmdbError`] after retries are exhausted.
    pub async fn get_season_episodes(
        &self,
        show_id: i64,
        season_number: i32,
    ) -> Result<Vec<EpisodeSummary>, TmdbError> {
        let season: SeasonResponse = self
            .get_json(&format!("tv/{show_id}/season/{season_number}"), &[])
            .await?;
        Ok(season
            .episodes
            .into_iter()
            .map(normalize::episode_summary)
            .collect())
    }

    /// # Errors
    ///
    /// Any [`TmdbError`] after retries are exhausted.
    pub async fn get_movie(&self, movie_id: i64) -> Result<MovieMetadata, TmdbError> {
        let movie: MovieResponse = self.get_json(&format!("movie/{movie_id}"), &[]).await?;
        Ok(normalize::movie_metadata(movie))
    }

    async fn fetch_changes(
        &self,
        path: &str,
        window: &DateWindow,
    ) -> Result<Vec<ChangeRecord>, TmdbError> {
        let body: ChangesResponse = self
            .get_json(
                path,
                &[
                    ("start_date", window.past_date.as_str()),
                    ("end_date", window.current_date.as_str()),
                ],
            )
            .await?;
        Ok(normalize::normalize_changes(body.changes))
    }

    /// Builds the request URL for `path` with the API key and `extra`
    /// parameters percent-encoded.
    pub(crate) fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Result<Url, TmdbError> {
        let mut url =
            self.base_url
                .join(path.trim_start_matches('/'))
                .map_err(|e| TmdbError::InvalidBaseUrl {
                    url: format!("{}{path}", self.base_url),
                    reason: e.to_string(),
                })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// GETs `path` with retry and deserializes the body into `T`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        extra: &[(&str, &str)],
    ) -> Result<T, TmdbError> {
        let url = self.build_url(path, extra)?;
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.request_text(url.clone(), path)
        })
        .await?;
        serde_json::from_str(&body).map_err(|e| TmdbError::Deserialize {
            context: path.to_owned(),
            source: e,
        })
    }

    /// Sends one GET and maps non-2xx statuses to typed errors.
    async fn request_text(&self, url: Url, path: &str) -> Result<String, TmdbError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TmdbError::Http(e.without_url()))?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(TmdbError::RateLimited { retry_after_secs });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(TmdbError::NotFound {
                resource: path.to_owned(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| TmdbError::Http(e.without_url()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<StatusBody>(&body)
                .ok()
                .and_then(|b| b.status_message)
                .unwrap_or_else(|| status.to_string());
            return Err(TmdbError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
