//! Single-phrase resolution.
//!
//! [`FuzzyDateParser`] is the seam between interval handling and the
//! interpretation of one date/time phrase. [`PhraseParser`] is the default
//! implementation: a small, deterministic vocabulary of English date and time
//! expressions resolved against an explicit reference instant.
//!
//! # Vocabulary
//!
//! | Kind     | Examples                                                   |
//! |----------|------------------------------------------------------------|
//! | Dates    | `jan 1`, `Sept 17th, 2009`, `1 jan 2009`, `9/17/2009`, `7/1/09`, `2009-01-01` |
//! | Months   | `january`, `dec 2009`                                      |
//! | Relative | `today`, `tomorrow`, `yesterday`, `thursday`, `thu`        |
//! | Times    | `8am`, `8:30 pm`, `20:15`, `noon`, `midnight`              |
//! | Dayparts | `morning`, `afternoon`, `evening`, `night`                 |
//!
//! Anything else (apart from `at`, `on`, `in`, `the`, `of` and punctuation)
//! makes the phrase unrecognized.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::trace;

use crate::normalize::MONTH_PATTERN;

// ── Span ────────────────────────────────────────────────────────────────────

/// The `(first, last)` instants one phrase resolves to.
///
/// A calendar day spans `[00:00, next day 00:00]`; an exact time of day is a
/// zero-width span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub first: NaiveDateTime,
    pub last: NaiveDateTime,
}

impl Span {
    pub fn new(first: NaiveDateTime, last: NaiveDateTime) -> Self {
        Self { first, last }
    }

    pub fn point(at: NaiveDateTime) -> Self {
        Self { first: at, last: at }
    }

    /// The whole calendar day, or `None` at the end of chrono's range.
    pub fn day(date: NaiveDate) -> Option<Self> {
        let next = date.checked_add_days(Days::new(1))?;
        Some(Self::new(
            date.and_time(NaiveTime::MIN),
            next.and_time(NaiveTime::MIN),
        ))
    }
}

// ── Seam ────────────────────────────────────────────────────────────────────

/// Resolves a single natural-language phrase into a [`Span`].
///
/// Implementations never panic on malformed text; they return `None`.
pub trait FuzzyDateParser {
    /// Resolve `text`, interpreting relative and incomplete phrases against
    /// `now` (e.g. a bare `"5pm"` lands on `now`'s date).
    fn parse(&self, text: &str, now: NaiveDateTime) -> Option<Span>;
}

impl<P: FuzzyDateParser + ?Sized> FuzzyDateParser for &P {
    fn parse(&self, text: &str, now: NaiveDateTime) -> Option<Span> {
        (**self).parse(text, now)
    }
}

// ── Patterns ────────────────────────────────────────────────────────────────

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap());

static SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?\b").unwrap());

static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b({MONTH_PATTERN})\b\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?\b(?:\s+(\d{{4}})\b)?"
    ))
    .unwrap()
});

static DAY_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(\d{{1,2}})(?:st|nd|rd|th)?\s+({MONTH_PATTERN})\b\.?(?:\s+(\d{{4}})\b)?"
    ))
    .unwrap()
});

static MONTH_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b({MONTH_PATTERN})\b\.?(?:\s+(\d{{4}})\b)?")).unwrap()
});

static RELATIVE_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(today|tomorrow|yesterday)\b").unwrap());

static WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(sunday|sun|monday|mon|tuesday|tues|tue|wednesday|wed|thursday|thurs|thur|thu|friday|fri|saturday|sat)\b",
    )
    .unwrap()
});

static MERIDIEM_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})(?::(\d{2}))?\s*(am|pm|a|p)\b").unwrap());

static CLOCK_TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{1,2}):(\d{2})\b").unwrap());

static NAMED_TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(noon|midnight)\b").unwrap());

static DAYPART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(morning|afternoon|evening|night)\b").unwrap());

static BARE_HOUR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{1,2})\b").unwrap());

const IGNORED_WORDS: &[&str] = &["at", "on", "in", "the", "of"];

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

// ── PhraseParser ────────────────────────────────────────────────────────────

/// Default [`FuzzyDateParser`].
///
/// Yearless dates and weekday names resolve to the first match on or after
/// the reference date. A time with no date lands on the reference date, or
/// the day after if it would fall before the reference instant (a daypart
/// moves on once it is over).
///
/// ```
/// use chrono::NaiveDate;
/// use date_range::{FuzzyDateParser, PhraseParser};
///
/// let now = NaiveDate::from_ymd_opt(2009, 9, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let span = PhraseParser.parse("Sept 17", now).unwrap();
/// assert_eq!(span.first.to_string(), "2009-09-17 00:00:00");
/// assert_eq!(span.last.to_string(), "2009-09-18 00:00:00");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PhraseParser;

impl FuzzyDateParser for PhraseParser {
    fn parse(&self, text: &str, now: NaiveDateTime) -> Option<Span> {
        let mut phrase = Phrase::new(text);
        let date = phrase.take_date(now.date()).ok()?;
        let time = phrase.take_time(date.is_some()).ok()?;
        if !phrase.is_exhausted() {
            trace!(phrase = text, leftover = phrase.rest.trim(), "unrecognized words");
            return None;
        }
        let span = resolve(date, time, now);
        trace!(phrase = text, ?span, "resolved phrase");
        span
    }
}

/// A component was recognized but names an impossible date or time.
struct Invalid;

#[derive(Debug, Clone, Copy)]
enum DateHint {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
}

#[derive(Debug, Clone, Copy)]
enum TimeHint {
    At(NaiveTime),
    Part(Daypart),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Daypart {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Daypart {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "morning" => Some(Daypart::Morning),
            "afternoon" => Some(Daypart::Afternoon),
            "evening" => Some(Daypart::Evening),
            "night" => Some(Daypart::Night),
            _ => None,
        }
    }

    /// Start and end hour; 24 means midnight at the end of the day.
    fn hours(self) -> (u32, u32) {
        match self {
            Daypart::Morning => (6, 12),
            Daypart::Afternoon => (13, 17),
            Daypart::Evening => (17, 20),
            Daypart::Night => (20, 24),
        }
    }

    fn span_on(self, date: NaiveDate) -> Option<Span> {
        let (from, to) = self.hours();
        let first = date.and_hms_opt(from, 0, 0)?;
        let last = if to == 24 {
            date.checked_add_days(Days::new(1))?.and_time(NaiveTime::MIN)
        } else {
            date.and_hms_opt(to, 0, 0)?
        };
        Some(Span::new(first, last))
    }
}

type Groups = Vec<Option<String>>;

/// Lowercased phrase text; recognized components are blanked out as they are taken.
struct Phrase {
    rest: String,
}

impl Phrase {
    fn new(text: &str) -> Self {
        Self {
            rest: text.to_lowercase().replace(',', " "),
        }
    }

    fn take(&mut self, pattern: &Regex) -> Option<Groups> {
        let caps = pattern.captures(&self.rest)?;
        let whole = caps.get(0)?.range();
        let groups = caps
            .iter()
            .map(|m| m.map(|m| m.as_str().to_string()))
            .collect();
        self.rest.replace_range(whole, " ");
        Some(groups)
    }

    fn take_date(&mut self, today: NaiveDate) -> Result<Option<DateHint>, Invalid> {
        let explicit = self.take_calendar_date(today)?;
        let weekday = self.take(&WEEKDAY);
        if explicit.is_some() {
            return Ok(explicit);
        }
        match weekday {
            Some(groups) => {
                let weekday = group(&groups, 1)
                    .and_then(|word| word.get(..3))
                    .and_then(|abbr| abbr.parse::<Weekday>().ok())
                    .ok_or(Invalid)?;
                Ok(Some(DateHint::Day(next_weekday(today, weekday))))
            }
            None => Ok(None),
        }
    }

    fn take_calendar_date(&mut self, today: NaiveDate) -> Result<Option<DateHint>, Invalid> {
        if let Some(groups) = self.take(&ISO_DATE) {
            let year = number(&groups, 1)? as i32;
            let date = NaiveDate::from_ymd_opt(year, number(&groups, 2)?, number(&groups, 3)?);
            return date.map(|d| Some(DateHint::Day(d))).ok_or(Invalid);
        }
        if let Some(groups) = self.take(&SLASH_DATE) {
            let year = group(&groups, 3).map(expand_year).transpose()?;
            let date = month_day(number(&groups, 1)?, number(&groups, 2)?, year, today)?;
            return Ok(Some(DateHint::Day(date)));
        }
        if let Some(groups) = self.take(&MONTH_DAY) {
            let month = month_number(group(&groups, 1))?;
            let year = group(&groups, 3).map(expand_year).transpose()?;
            let date = month_day(month, number(&groups, 2)?, year, today)?;
            return Ok(Some(DateHint::Day(date)));
        }
        if let Some(groups) = self.take(&DAY_MONTH) {
            let month = month_number(group(&groups, 2))?;
            let year = group(&groups, 3).map(expand_year).transpose()?;
            let date = month_day(month, number(&groups, 1)?, year, today)?;
            return Ok(Some(DateHint::Day(date)));
        }
        if let Some(groups) = self.take(&MONTH_ONLY) {
            let month = month_number(group(&groups, 1))?;
            let year = match group(&groups, 2) {
                Some(year) => expand_year(year)?,
                None if month >= today.month() => today.year(),
                None => today.year() + 1,
            };
            return Ok(Some(DateHint::Month { year, month }));
        }
        if let Some(groups) = self.take(&RELATIVE_DAY) {
            let date = match group(&groups, 1) {
                Some("today") => Some(today),
                Some("tomorrow") => today.checked_add_days(Days::new(1)),
                Some("yesterday") => today.checked_sub_days(Days::new(1)),
                _ => None,
            };
            return date.map(|d| Some(DateHint::Day(d))).ok_or(Invalid);
        }
        Ok(None)
    }

    fn take_time(&mut self, has_date: bool) -> Result<Option<TimeHint>, Invalid> {
        let part = self
            .take(&DAYPART)
            .and_then(|groups| group(&groups, 1).and_then(Daypart::from_word));

        if let Some(groups) = self.take(&MERIDIEM_TIME) {
            let minute = optional_number(&groups, 2)?.unwrap_or(0);
            let pm = group(&groups, 3).is_some_and(|m| m.starts_with('p'));
            return meridiem_time(number(&groups, 1)?, minute, pm)
                .map(|t| Some(TimeHint::At(t)))
                .ok_or(Invalid);
        }
        if let Some(groups) = self.take(&CLOCK_TIME) {
            return NaiveTime::from_hms_opt(number(&groups, 1)?, number(&groups, 2)?, 0)
                .map(|t| Some(TimeHint::At(t)))
                .ok_or(Invalid);
        }
        if let Some(groups) = self.take(&NAMED_TIME) {
            let hour = if group(&groups, 1) == Some("noon") { 12 } else { 0 };
            return Ok(NaiveTime::from_hms_opt(hour, 0, 0).map(TimeHint::At));
        }
        if has_date && part.is_none() {
            if let Some(groups) = self.take(&BARE_HOUR) {
                return NaiveTime::from_hms_opt(number(&groups, 1)?, 0, 0)
                    .map(|t| Some(TimeHint::At(t)))
                    .ok_or(Invalid);
            }
        }
        Ok(part.map(TimeHint::Part))
    }

    fn is_exhausted(&self) -> bool {
        self.rest
            .split(|c: char| c.is_whitespace() || c == '.' || c == '@')
            .filter(|word| !word.is_empty())
            .all(|word| IGNORED_WORDS.contains(&word))
    }
}

fn resolve(date: Option<DateHint>, time: Option<TimeHint>, now: NaiveDateTime) -> Option<Span> {
    match (date, time) {
        (None, None) => None,
        (Some(DateHint::Month { year, month }), None) => {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            let next = first.checked_add_months(Months::new(1))?;
            Some(Span::new(
                first.and_time(NaiveTime::MIN),
                next.and_time(NaiveTime::MIN),
            ))
        }
        (Some(DateHint::Month { .. }), Some(_)) => None,
        (Some(DateHint::Day(date)), None) => Span::day(date),
        (Some(DateHint::Day(date)), Some(TimeHint::At(time))) => {
            Some(Span::point(date.and_time(time)))
        }
        (Some(DateHint::Day(date)), Some(TimeHint::Part(part))) => part.span_on(date),
        (None, Some(TimeHint::At(time))) => {
            let at = now.date().and_time(time);
            if at < now {
                let tomorrow = now.date().checked_add_days(Days::new(1))?;
                Some(Span::point(tomorrow.and_time(time)))
            } else {
                Some(Span::point(at))
            }
        }
        (None, Some(TimeHint::Part(part))) => {
            let span = part.span_on(now.date())?;
            if span.last <= now {
                part.span_on(now.date().checked_add_days(Days::new(1))?)
            } else {
                Some(span)
            }
        }
    }
}

fn group(groups: &Groups, index: usize) -> Option<&str> {
    groups.get(index).and_then(|g| g.as_deref())
}

fn number(groups: &Groups, index: usize) -> Result<u32, Invalid> {
    group(groups, index)
        .and_then(|digits| digits.parse().ok())
        .ok_or(Invalid)
}

fn optional_number(groups: &Groups, index: usize) -> Result<Option<u32>, Invalid> {
    group(groups, index)
        .map(|digits| digits.parse().map_err(|_| Invalid))
        .transpose()
}

fn month_number(word: Option<&str>) -> Result<u32, Invalid> {
    let abbr = word.and_then(|w| w.get(..3)).ok_or(Invalid)?;
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| *m == abbr)
        .map(|index| index as u32 + 1)
        .ok_or(Invalid)
}

/// Two-digit years below 70 are 20xx, the rest 19xx.
fn expand_year(digits: &str) -> Result<i32, Invalid> {
    let year: i32 = digits.parse().map_err(|_| Invalid)?;
    Ok(match digits.len() {
        2 if year < 70 => 2000 + year,
        2 => 1900 + year,
        _ => year,
    })
}

/// A month/day, in `year` if given, otherwise the first one on or after `today`.
fn month_day(month: u32, day: u32, year: Option<i32>, today: NaiveDate) -> Result<NaiveDate, Invalid> {
    if let Some(year) = year {
        return NaiveDate::from_ymd_opt(year, month, day).ok_or(Invalid);
    }
    match NaiveDate::from_ymd_opt(today.year(), month, day) {
        Some(date) if date >= today => Ok(date),
        _ => NaiveDate::from_ymd_opt(today.year() + 1, month, day).ok_or(Invalid),
    }
}

fn next_weekday(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let ahead = (7 + weekday.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    today + Days::new(u64::from(ahead))
}

fn meridiem_time(hour: u32, minute: u32, pm: bool) -> Option<NaiveTime> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    let hour = hour % 12 + if pm { 12 } else { 0 };
    NaiveTime::from_hms_opt(hour, minute, 0)
}
