//! Shorthand interval syntax → canonical `"<start> - <end>"` text.
//!
//! Each stage is a total `&str -> String` rewrite; [`normalize`] runs them in
//! the order below. The order matters: the month-pair-with-year rewrite must
//! see `"Sept 17-28 2009"` before the yearless rewrite turns it into
//! `"Sept 17 - Sept 28 2009"`, and the slash-date stages must run before the
//! time-pair reorder so a day pair is never mistaken for a time pair.
//!
//! 1. [`strip_fillers`] — `"from jan 1 - jan 5"` → `"jan 1 - jan 5"`
//! 2. [`expand_month_pair_with_year`] — `"Sept 17-28 2009"` → `"Sept 17 2009 - Sept 28 2009"`
//! 3. [`expand_month_pair`] — `"Sept 17-28"` → `"Sept 17 - Sept 28"`
//! 4. [`expand_slash_pair`] — `"9/17-28"` → `"9/17/2009 - 9/28/2009"`
//! 5. [`complete_slash_date`] — `"9/17"` → `"9/17/2009"`
//! 6. [`hoist_trailing_context`] — `"jan 1 8am-5pm 2009"` → `"jan 1 2009 8am - 5pm"`
//!
//! Running the pipeline on its own output changes nothing.

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::clock::Clock;

/// Month names and the abbreviations the phrase parser accepts.
pub(crate) const MONTH_PATTERN: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

static FILLER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:from|between)\b").unwrap());

static MONTH_PAIR_WITH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b({MONTH_PATTERN})\b\.?\s+(\d{{1,2}})\s*-\s*(\d{{1,2}})\s+(\d{{4}})\b"
    ))
    .unwrap()
});

static MONTH_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b({MONTH_PATTERN})\b\.?\s+(\d{{1,2}})\s*-\s*(\d{{1,2}})(\s|,|$)"
    ))
    .unwrap()
});

static SLASH_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})-(\d{1,2})$").unwrap());

static SLASH_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})$").unwrap());

const TIME_TOKEN: &str = r"\d{1,2}(?::\d{2})?(?:am|pm)?";

static TIME_PAIR_WITH_TRAILER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^(.*?\s)?({TIME_TOKEN})\s*-\s*({TIME_TOKEN})\s+(\S.*)$"
    ))
    .unwrap()
});

/// Run every stage in order, taking the implicit year from `clock`.
pub fn normalize(text: &str, clock: &impl Clock) -> String {
    normalize_with_year(text, clock.now().year())
}

/// [`normalize`] with the implicit year supplied directly.
pub fn normalize_with_year(text: &str, year: i32) -> String {
    let text = strip_fillers(text);
    let text = expand_month_pair_with_year(&text);
    let text = expand_month_pair(&text);
    let text = expand_slash_pair(&text, year);
    let text = complete_slash_date(&text, year);
    hoist_trailing_context(&text)
}

/// Delete "from" / "between" and collapse the whitespace they leave behind.
pub fn strip_fillers(text: &str) -> String {
    squeeze(&FILLER.replace_all(text, " "))
}

/// `"<Month> D1-D2 Y"` → `"<Month> D1 Y - <Month> D2 Y"`.
pub fn expand_month_pair_with_year(text: &str) -> String {
    MONTH_PAIR_WITH_YEAR
        .replace_all(text, "${1} ${2} ${4} - ${1} ${3} ${4}")
        .into_owned()
}

/// `"<Month> D1-D2"` → `"<Month> D1 - <Month> D2"`.
///
/// `D2` must end the word, so `"aug 25 - 8:30pm"` keeps its time.
pub fn expand_month_pair(text: &str) -> String {
    MONTH_PAIR
        .replace_all(text, "${1} ${2} - ${1} ${3}${4}")
        .into_owned()
}

/// `"M/D1-D2"` → `"M/D1/Y - M/D2/Y"`.
pub fn expand_slash_pair(text: &str, year: i32) -> String {
    map_tokens(text, |token| {
        SLASH_PAIR.captures(token).map(|caps| {
            format!(
                "{m}/{d1}/{year} - {m}/{d2}/{year}",
                m = &caps[1],
                d1 = &caps[2],
                d2 = &caps[3],
            )
        })
    })
}

/// `"M/D"` → `"M/D/Y"`. Tokens that already carry a year are left alone.
pub fn complete_slash_date(text: &str, year: i32) -> String {
    map_tokens(text, |token| {
        SLASH_DATE
            .captures(token)
            .map(|caps| format!("{}/{}/{year}", &caps[1], &caps[2]))
    })
}

/// Move whatever trails a dash-joined time pair in front of the pair, so the
/// split attaches it to the start phrase.
///
/// At least one side of the pair must look like a time of day (a meridiem or
/// a colon); `"jan 1 - 12 2009"` is not a time pair.
pub fn hoist_trailing_context(text: &str) -> String {
    let Some(caps) = TIME_PAIR_WITH_TRAILER.captures(text) else {
        return text.to_string();
    };
    if !is_time_of_day(&caps[2]) && !is_time_of_day(&caps[3]) {
        return text.to_string();
    }
    let lead = caps.get(1).map_or("", |m| m.as_str());
    format!("{lead}{} {} - {}", &caps[4], &caps[2], &caps[3])
}

fn is_time_of_day(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    lower.contains(':') || lower.ends_with("am") || lower.ends_with("pm")
}

/// Collapse runs of whitespace to one space and trim the ends.
pub(crate) fn squeeze(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn map_tokens(text: &str, rewrite: impl Fn(&str) -> Option<String>) -> String {
    text.split_whitespace()
        .map(|token| rewrite(token).unwrap_or_else(|| token.to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}
