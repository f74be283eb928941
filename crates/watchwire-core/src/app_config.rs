#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub log_level: String,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_request_timeout_secs: u64,
    pub tmdb_max_retries: u32,
    pub tmdb_retry_backoff_base_ms: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// How many days back each change query looks. Always at least 1.
    pub change_lookback_days: u32,
    /// Minimum spacing between two catalog requests.
    pub request_interval_ms: u64,
    pub show_update_cron: String,
    pub movie_update_cron: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("tmdb_api_key", &"[redacted]")
            .field("tmdb_base_url", &self.tmdb_base_url)
            .field("tmdb_request_timeout_secs", &self.tmdb_request_timeout_secs)
            .field("tmdb_max_retries", &self.tmdb_max_retries)
            .field(
                "tmdb_retry_backoff_base_ms",
                &self.tmdb_retry_backoff_base_ms,
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("change_lookback_days", &self.change_lookback_days)
            .field("request_interval_ms", &self.request_interval_ms)
            .field("show_update_cron", &self.show_update_cron)
            .field("movie_update_cron", &self.movie_update_cron)
            .finish()
    }
}
