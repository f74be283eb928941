//! Date windows bounding "what changed" queries.

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of "today". Swap in [`FixedClock`] to pin the date in tests.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock UTC date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Inclusive `[past_date, current_date]` range, both `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub current_date: String,
    pub past_date: String,
}

impl DateWindow {
    /// Window ending on `today` and starting `lookback_days` calendar days earlier.
    ///
    /// Saturates at the earliest representable date rather than failing.
    #[must_use]
    pub fn ending_on(today: NaiveDate, lookback_days: u32) -> Self {
        let past = today
            .checked_sub_days(Days::new(u64::from(lookback_days)))
            .unwrap_or(NaiveDate::MIN);
        Self {
            current_date: today.format(DATE_FORMAT).to_string(),
            past_date: past.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Builds the change-query window for `lookback_days` ending on the clock's today.
#[must_use]
pub fn generate_date_range(clock: &dyn Clock, lookback_days: u32) -> DateWindow {
    DateWindow::ending_on(clock.today(), lookback_days)
}
