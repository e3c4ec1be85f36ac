//! Wall-clock access.
//!
//! Anything that needs "the current year" takes a [`Clock`] instead of reading
//! the system time directly, so tests can pin the date.

use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    fn current_year(&self) -> i32 {
        self.today().year()
    }
}

/// Reads the local wall clock on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same day.
#[derive(Clone, Copy)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// January 1st of `year`. Years chrono cannot represent saturate to its
    /// first or last date.
    pub fn year(year: i32) -> Self {
        let date = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(if year < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        });
        Self(date)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Debug for FixedClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedClock({})", self.0)
    }
}
