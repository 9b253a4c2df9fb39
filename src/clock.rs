//! Source of "today" for reference period validation

use chrono::{NaiveDate, Utc};

use crate::schema::ReferencePeriod;

/// Supplies the current date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// The reference period containing today
    fn current_period(&self) -> ReferencePeriod {
        ReferencePeriod::from_date(self.today())
    }
}

/// Wall clock in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock frozen at a given date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
