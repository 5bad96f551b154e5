//! Free text → [`DateRange`].
//!
//! The pipeline, in order:
//!
//! 1. strip filler words and recurrence cues ([`modifiers::extract`]);
//! 2. rewrite shorthand into `"<start> - <end>"` ([`normalize`]);
//! 3. split on the first delimiter (`-`, `until`, `to`, `til`);
//! 4. let a bare-number end borrow the start's context (`"9/17/2009 - 28"`);
//! 5. let a meridiem on the end carry over to the start (`"8-11pm"`);
//! 6. resolve the start phrase against the clock, the end phrase against the
//!    start, and build the range.
//!
//! [`normalize`]: crate::normalize

use chrono::{Datelike, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::{DateRangeError, Result};
use crate::modifiers;
use crate::normalize;
use crate::phrase::{FuzzyDateParser, PhraseParser, Span};
use crate::range::DateRange;

static DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)-|\buntil\b|\bto\b|\btil\b").unwrap());

static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

static ENDS_WITH_SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*\b\d{1,2}/)\d{1,2}(/\d{2,4})$").unwrap());

static ENDS_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*?)\d+$").unwrap());

static MERIDIEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\d\s*(am|pm)\b").unwrap());

static HOUR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}$").unwrap());

static MONTH_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)^(?:{})\.?$", normalize::MONTH_PATTERN)).unwrap());

/// Parses interval text with a pluggable phrase parser and clock.
///
/// ```
/// use date_range::{FixedClock, RangeParser, RecurrenceKind};
///
/// let parser = RangeParser::new().with_clock(FixedClock::at_ymd(2009, 9, 1).unwrap());
/// let range = parser.parse("jan 1 2009 8-11pm").unwrap();
/// assert_eq!(range.start().to_string(), "2009-01-01 20:00:00");
/// assert_eq!(range.end().to_string(), "2009-01-01 23:00:00");
///
/// assert_eq!(parser.parse("thursdays").unwrap().kind(), RecurrenceKind::Weekly);
/// assert!(parser.parse("dsafasdfas").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RangeParser<P = PhraseParser, C = SystemClock> {
    phrases: P,
    clock: C,
}

impl RangeParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P, C> RangeParser<P, C> {
    pub fn with_clock<C2: Clock>(self, clock: C2) -> RangeParser<P, C2> {
        RangeParser {
            phrases: self.phrases,
            clock,
        }
    }

    pub fn with_phrase_parser<P2: FuzzyDateParser>(self, phrases: P2) -> RangeParser<P2, C> {
        RangeParser {
            phrases,
            clock: self.clock,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<P: FuzzyDateParser, C: Clock> RangeParser<P, C> {
    /// Parse `text`, or `None` if it does not describe a date range.
    pub fn parse(&self, text: &str) -> Option<DateRange> {
        self.try_parse(text).ok()
    }

    /// Like [`parse`](Self::parse), but says why parsing failed.
    ///
    /// # Errors
    ///
    /// - [`DateRangeError::Empty`] when nothing but filler remains.
    /// - [`DateRangeError::Unrecognized`] when a phrase cannot be resolved.
    /// - [`DateRangeError::Inverted`] when the end resolves before the start.
    pub fn try_parse(&self, text: &str) -> Result<DateRange> {
        let now = self.clock.now();

        let stripped = normalize::strip_fillers(text);
        let (remainder, flags) = modifiers::extract(&stripped);
        let normalized = normalize::normalize_with_year(&remainder, now.year());
        debug!(input = text, normalized = %normalized, ?flags, "normalized range text");

        if normalized.is_empty() {
            return Err(DateRangeError::Empty);
        }

        let (start_phrase, end_phrase) = split(&normalized);
        let end_phrase = end_phrase.map(|end| inherit_numeric(start_phrase, end));
        let start_phrase = inherit_meridiem(start_phrase, end_phrase.as_deref());
        debug!(start = %start_phrase, end = ?end_phrase, "split range phrases");

        let start = self.resolve(&start_phrase, now)?;
        let end = match end_phrase {
            Some(phrase) => self.resolve(&phrase, start.first)?.last,
            None => start.last,
        };

        DateRange::new(start.first, end, flags)
    }

    fn resolve(&self, phrase: &str, now: NaiveDateTime) -> Result<Span> {
        self.phrases
            .parse(phrase, now)
            .ok_or_else(|| DateRangeError::Unrecognized(phrase.to_string()))
    }
}

/// Parse with the default phrase parser and the system clock.
///
/// Returns `None` for text that does not describe a date range.
pub fn parse(text: &str) -> Option<DateRange> {
    RangeParser::new().parse(text)
}

/// [`parse`] with the reason for failure.
///
/// # Errors
///
/// See [`RangeParser::try_parse`].
pub fn try_parse(text: &str) -> Result<DateRange> {
    RangeParser::new().try_parse(text)
}

/// Split at the first delimiter. A blank right-hand side counts as no end.
fn split(text: &str) -> (&str, Option<&str>) {
    match DELIMITER.find(text) {
        Some(m) => {
            let end = text[m.end()..].trim();
            (text[..m.start()].trim(), (!end.is_empty()).then_some(end))
        }
        None => (text.trim(), None),
    }
}

/// A bare number as the end phrase replaces the start's trailing number,
/// or the day of a trailing `M/D/Y` date.
fn inherit_numeric(start: &str, end: &str) -> String {
    if !NUMERIC.is_match(end) {
        return end.to_string();
    }
    if let Some(caps) = ENDS_WITH_SLASH_DATE.captures(start) {
        return format!("{}{end}{}", &caps[1], &caps[2]);
    }
    match ENDS_NUMERIC.captures(start) {
        Some(caps) => format!("{}{end}", &caps[1]),
        None => start.to_string(),
    }
}

/// `"8"` + `"11pm"` → `"8pm"`: an end meridiem applies to a start without
/// one, when the start ends in a bare hour.
fn inherit_meridiem(start: &str, end: Option<&str>) -> String {
    let marker = end
        .and_then(|end| MERIDIEM.captures(end))
        .map(|caps| caps[1].to_ascii_lowercase());
    match marker {
        Some(marker) if !MERIDIEM.is_match(start) && ends_in_bare_hour(start) => {
            format!("{start}{marker}")
        }
        _ => start.to_string(),
    }
}

/// The last word is a 1-2 digit number that is not the day after a month
/// name. Years and slash dates never qualify.
fn ends_in_bare_hour(phrase: &str) -> bool {
    let mut words = phrase.split_whitespace();
    match words.next_back() {
        Some(last) if HOUR.is_match(last) => {
            !words.next_back().is_some_and(|prev| MONTH_WORD.is_match(prev))
        }
        _ => false,
    }
}
