//! The [`DateRange`] value, its recurrence flags, and [`DateRangeList`].

use std::fmt;
use std::ops::Deref;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::{DateRangeError, Result};
use crate::format::Formatter;
use crate::overlap;

// ── Recurrence ──────────────────────────────────────────────────────────────

/// Recurrence cues found in the source text.
///
/// `weekly` / `daily` are set by a plural cue ("thursdays", "evenings") or an
/// axis word ("weekly", "daily"). `weekdayable` / `dailyable` record that a
/// bare singular cue ("thursday", "evening") is present, which lets the two
/// axes combine: "thursday evenings" repeats weekly, not daily.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecurrenceFlags {
    pub weekly: bool,
    pub daily: bool,
    pub weekdayable: bool,
    pub dailyable: bool,
}

impl RecurrenceFlags {
    /// No recurrence at all. Occurrences produced by expansion carry this.
    pub const NONE: Self = Self {
        weekly: false,
        daily: false,
        weekdayable: false,
        dailyable: false,
    };

    pub fn kind(&self) -> RecurrenceKind {
        if self.weekly || (self.weekdayable && self.daily) {
            RecurrenceKind::Weekly
        } else if self.daily {
            RecurrenceKind::Daily
        } else {
            RecurrenceKind::None
        }
    }
}

/// How a [`DateRange`] repeats, derived from its [`RecurrenceFlags`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    #[default]
    None,
    Daily,
    Weekly,
}

impl RecurrenceKind {
    /// Distance between consecutive occurrences, or `None` for a one-off range.
    pub fn step(self) -> Option<Duration> {
        match self {
            RecurrenceKind::None => None,
            RecurrenceKind::Daily => Some(Duration::days(1)),
            RecurrenceKind::Weekly => Some(Duration::days(7)),
        }
    }
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecurrenceKind::None => "none",
            RecurrenceKind::Daily => "daily",
            RecurrenceKind::Weekly => "weekly",
        };
        f.write_str(name)
    }
}

// ── DateRange ───────────────────────────────────────────────────────────────

/// Two instants plus the recurrence cues they were parsed with.
///
/// Always `start <= end`. Two ranges compare equal when their endpoints and
/// their derived [`RecurrenceKind`] match; the raw flags are not compared.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
    flags: RecurrenceFlags,
}

impl DateRange {
    /// # Errors
    ///
    /// Returns [`DateRangeError::Inverted`] if `start` is after `end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, flags: RecurrenceFlags) -> Result<Self> {
        if start > end {
            return Err(DateRangeError::Inverted { start, end });
        }
        Ok(Self { start, end, flags })
    }

    /// A non-repeating range.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::Inverted`] if `start` is after `end`.
    pub fn once(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        Self::new(start, end, RecurrenceFlags::NONE)
    }

    /// Concrete occurrence of a repeating range. Callers guarantee ordering.
    pub(crate) fn occurrence(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        debug_assert!(start <= end);
        Self {
            start,
            end,
            flags: RecurrenceFlags::NONE,
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn flags(&self) -> RecurrenceFlags {
        self.flags
    }

    pub fn kind(&self) -> RecurrenceKind {
        self.flags.kind()
    }

    pub fn is_recurring(&self) -> bool {
        self.kind() != RecurrenceKind::None
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether `at` lies within `[start, end]`. Recurrence is ignored.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    /// Whether the two closed intervals share at least one instant.
    /// Recurrence is ignored on both sides; see [`DateRange::overlapping`].
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.end >= other.start && self.start <= other.end
    }

    /// Expand this range into the concrete occurrences that intersect
    /// `bounds`. A one-off range yields itself or nothing.
    pub fn overlapping(&self, bounds: &DateRange) -> DateRangeList {
        overlap::overlapping(self, bounds)
    }

    /// Render as compact text, reading "now" from `clock`.
    pub fn format(&self, clock: impl Clock) -> String {
        Formatter::new(clock).format(self)
    }
}

impl PartialEq for DateRange {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end && self.kind() == other.kind()
    }
}

impl Eq for DateRange {}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(SystemClock))
    }
}

// ── DateRangeList ───────────────────────────────────────────────────────────

/// Occurrences in ascending start order, as produced by [`DateRange::overlapping`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DateRangeList(Vec<DateRange>);

impl DateRangeList {
    pub(crate) fn from_sorted(ranges: Vec<DateRange>) -> Self {
        debug_assert!(ranges.windows(2).all(|w| w[0].start < w[1].start));
        Self(ranges)
    }

    pub fn into_vec(self) -> Vec<DateRange> {
        self.0
    }

    /// Comma-joined [`DateRange::format`] of every element, in order.
    pub fn format(&self, clock: impl Clock) -> String {
        let formatter = Formatter::new(clock);
        self.0
            .iter()
            .map(|range| formatter.format(range))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Deref for DateRangeList {
    type Target = [DateRange];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for DateRangeList {
    type Item = DateRange;
    type IntoIter = std::vec::IntoIter<DateRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DateRangeList {
    type Item = &'a DateRange;
    type IntoIter = std::slice::Iter<'a, DateRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DateRangeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(SystemClock))
    }
}
