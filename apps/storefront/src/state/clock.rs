//! # Clock
//!
//! Card expiry checks and order ids depend on the current time, so services
//! read it through [`Clock`] rather than calling `Utc::now()` directly.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;

    /// The shopper's calendar date, used for card expiry.
    fn today(&self) -> NaiveDate {
        self.now_utc().date_naive()
    }
}

/// Wall clock. `today()` is the local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}
