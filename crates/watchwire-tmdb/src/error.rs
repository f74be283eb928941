use thiserror::Error;
use watchwire_core::CatalogError;

/// Errors returned by the TMDB API client.
#[derive(Debug, Error)]
pub enum TmdbError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429. TMDB sends `Retry-After` in seconds.
    #[error("rate limited by TMDB (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// HTTP 404 for the requested resource.
    #[error("TMDB resource not found: {resource}")]
    NotFound { resource: String },

    /// Any other non-2xx response, with TMDB's `status_message` when present.
    #[error("TMDB API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl From<TmdbError> for CatalogError {
    fn from(err: TmdbError) -> Self {
        match err {
            TmdbError::NotFound { resource } => CatalogError::NotFound(resource),
            TmdbError::RateLimited { retry_after_secs } => {
                CatalogError::RateLimited { retry_after_secs }
            }
            TmdbError::Deserialize { context, source } => CatalogError::Malformed {
                context,
                reason: source.to_string(),
            },
            other => CatalogError::Transport(Box::new(other)),
        }
    }
}
