//! Injectable "now" for the normalizer, the phrase parser, and the formatter.
//!
//! Nothing in this crate reads the system clock directly. Every call that
//! needs the current instant samples a [`Clock`] exactly once, so a
//! [`FixedClock`] makes results reproducible.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of the current wall-clock instant.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the local wall clock via `chrono::Local`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self(now)
    }

    /// Midnight at the start of the given day, or `None` for an impossible date.
    pub fn at_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
