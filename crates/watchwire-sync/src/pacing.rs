//! Request pacing for the external catalog.
//!
//! A [`Pacer`] hands out request slots. Everything that talks to the catalog
//! acquires a slot first, so the request rate is set in one place no matter
//! how many batches are running.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[async_trait]
pub trait Pacer: Send + Sync {
    /// Waits until the next request may be issued.
    async fn acquire(&self);
}

/// Guarantees at least `interval` between the starts of two consecutive
/// slots. The first slot is granted immediately.
#[derive(Debug)]
pub struct FixedIntervalPacer {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl FixedIntervalPacer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn from_millis(interval_ms: u64) -> Self {
        Self::new(Duration::from_millis(interval_ms))
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[async_trait]
impl Pacer for FixedIntervalPacer {
    async fn acquire(&self) {
        // Held across the sleep so concurrent callers queue behind each other.
        let mut last = self.last.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                tokio::time::sleep(self.interval.saturating_sub(elapsed)).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// Grants every slot immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn acquire(&self) {}
}
