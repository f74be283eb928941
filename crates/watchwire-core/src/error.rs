use thiserror::Error;

/// Boxed error carried by the port error types so adapters can attach their
/// own typed source without the core depending on them.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors surfaced by [`crate::ContentStore`] and [`crate::WatchStatusStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("invalid stored value: {0}")]
    InvalidData(String),

    #[error("storage backend error: {0}")]
    Backend(#[source] BoxError),
}

/// Errors surfaced by a [`crate::ChangeCatalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog entry not found: {0}")]
    NotFound(String),

    #[error("catalog rate limit hit (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("malformed catalog response for {context}: {reason}")]
    Malformed { context: String, reason: String },

    #[error("catalog request failed: {0}")]
    Transport(#[source] BoxError),
}
