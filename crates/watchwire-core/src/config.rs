use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_SHOW_UPDATE_CRON: &str = "0 2 * * *";
pub const DEFAULT_MOVIE_UPDATE_CRON: &str = "0 1 7,14,21,28 * *";
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3/";
/// Longest date range the TMDB changes endpoints accept.
pub const MAX_CHANGE_LOOKBACK_DAYS: u32 = 14;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the real environment so they can
/// be tested with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;
    let tmdb_api_key = require("TMDB_API_KEY")?;

    let env = parse_environment(&or_default("WATCHWIRE_ENV", "development"))?;
    let log_level = or_default("WATCHWIRE_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("WATCHWIRE_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("WATCHWIRE_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("WATCHWIRE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let tmdb_base_url = or_default("WATCHWIRE_TMDB_BASE_URL", DEFAULT_TMDB_BASE_URL);
    let tmdb_request_timeout_secs = parse_u64("WATCHWIRE_TMDB_REQUEST_TIMEOUT_SECS", "30")?;
    let tmdb_max_retries = parse_u32("WATCHWIRE_TMDB_MAX_RETRIES", "3")?;
    let tmdb_retry_backoff_base_ms = parse_u64("WATCHWIRE_TMDB_RETRY_BACKOFF_BASE_MS", "1000")?;

    let change_lookback_days = parse_u32("WATCHWIRE_CHANGE_LOOKBACK_DAYS", "10")?;
    if !(1..=MAX_CHANGE_LOOKBACK_DAYS).contains(&change_lookback_days) {
        return Err(ConfigError::InvalidEnvVar {
            var: "WATCHWIRE_CHANGE_LOOKBACK_DAYS".to_string(),
            reason: format!("must be between 1 and {MAX_CHANGE_LOOKBACK_DAYS}"),
        });
    }
    let request_interval_ms = parse_u64("WATCHWIRE_REQUEST_INTERVAL_MS", "500")?;

    let show_update_cron = or_default("WATCHWIRE_SHOW_UPDATE_CRON", DEFAULT_SHOW_UPDATE_CRON);
    let movie_update_cron = or_default("WATCHWIRE_MOVIE_UPDATE_CRON", DEFAULT_MOVIE_UPDATE_CRON);

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        tmdb_api_key,
        tmdb_base_url,
        tmdb_request_timeout_secs,
        tmdb_max_retries,
        tmdb_retry_backoff_base_ms,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        change_lookback_days,
        request_interval_ms,
        show_update_cron,
        movie_update_cron,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WATCHWIRE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
