//! Retry with exponential back-off and jitter for the TMDB client.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors (network failures, 429, 5xx). Everything else is
//! returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::TmdbError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - [`TmdbError::RateLimited`]: TMDB asked us to slow down.
/// - [`TmdbError::ApiError`] with a 5xx status.
///
/// **Not retriable:** not-found, 4xx API errors, deserialization failures,
/// and configuration errors.
pub(crate) fn is_retriable(err: &TmdbError) -> bool {
    match err {
        TmdbError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        TmdbError::RateLimited { .. } => true,
        TmdbError::ApiError { status, .. } => *status >= 500,
        TmdbError::NotFound { .. }
        | TmdbError::Deserialize { .. }
        | TmdbError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The wait before retry `n` is `backoff_base_ms × 2^(n-1)` ± 25 % jitter,
/// capped at 60 s. A rate-limit response waits at least its `Retry-After`.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, TmdbError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TmdbError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let jittered = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                let delay_ms = match &err {
                    TmdbError::RateLimited { retry_after_secs } => {
                        jittered.max(retry_after_secs.saturating_mul(1_000))
                    }
                    _ => jittered,
                };
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "tmdb: transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
