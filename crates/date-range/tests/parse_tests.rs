//! End-to-end parsing: free text through normalization, cue extraction,
//! splitting, and phrase resolution.
//!
//! Each range endpoint is checked against what the phrase parser alone
//! returns for the equivalent single phrase, so these tests pin the interval
//! handling rather than the phrase vocabulary.

use chrono::{NaiveDate, NaiveDateTime};
use date_range::{
    DateRangeError, FixedClock, FuzzyDateParser, PhraseParser, RangeParser, RecurrenceKind, Span,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

/// A Tuesday, mid-day.
fn now() -> NaiveDateTime {
    at(2009, 9, 1, 12, 0)
}

fn parser() -> RangeParser<PhraseParser, FixedClock> {
    RangeParser::new().with_clock(FixedClock::new(now()))
}

fn phrase(text: &str) -> Span {
    PhraseParser.parse(text, now()).unwrap()
}

// ---------------------------------------------------------------------------
// Explicit endpoints
// ---------------------------------------------------------------------------

#[test]
fn explicit_start_and_end() {
    let range = parser().parse("jan 1 2009 - dec 12 2009").unwrap();
    assert_eq!(range.start(), phrase("jan 1 2009").first);
    assert_eq!(range.end(), phrase("dec 12 2009").last);
    assert_eq!(range.kind(), RecurrenceKind::None);
}

#[test]
fn single_day_is_the_whole_day() {
    let range = parser().parse("jan 1 2009").unwrap();
    let day = phrase("jan 1 2009");
    assert_eq!(range.start(), day.first);
    assert_eq!(range.end(), day.last);
    assert_eq!(range.end(), at(2009, 1, 2, 0, 0));
}

#[test]
fn other_delimiters() {
    let expected = parser().parse("jan 1 2009 - jan 5 2009").unwrap();
    for text in [
        "jan 1 2009 until jan 5 2009",
        "jan 1 2009 to jan 5 2009",
        "jan 1 2009 til jan 5 2009",
        "from jan 1 2009 to jan 5 2009",
    ] {
        assert_eq!(parser().parse(text), Some(expected), "text: {text}");
    }
}

// ---------------------------------------------------------------------------
// Shared context
// ---------------------------------------------------------------------------

#[test]
fn time_pair_shares_the_date() {
    let range = parser().parse("jan 1 2009 8am-5pm").unwrap();
    assert_eq!(range.start(), at(2009, 1, 1, 8, 0));
    assert_eq!(range.end(), at(2009, 1, 1, 17, 0));
}

#[test]
fn trailing_year_applies_to_both_sides() {
    let range = parser().parse("jan 1 8am-5pm 2009").unwrap();
    assert_eq!(range.start(), at(2009, 1, 1, 8, 0));
    assert_eq!(range.end(), at(2009, 1, 1, 17, 0));
}

#[test]
fn end_meridiem_carries_to_the_start() {
    let range = parser().parse("jan 1 2009 8-11pm").unwrap();
    assert_eq!(range.start(), at(2009, 1, 1, 20, 0));
    assert_eq!(range.end(), at(2009, 1, 1, 23, 0));
}

#[test]
fn end_meridiem_carries_across_a_dated_end() {
    let range = parser().parse("jan 1 2009 8 - jan 1 2009 11pm").unwrap();
    assert_eq!(range.start(), at(2009, 1, 1, 20, 0));
    assert_eq!(range.end(), at(2009, 1, 1, 23, 0));
}

#[test]
fn whole_date_start_with_time_only_end() {
    let cases = [
        ("jan 1 2009 - 5pm", at(2009, 1, 1, 0, 0), at(2009, 1, 1, 17, 0)),
        ("9/17/2009 - 7pm", at(2009, 9, 17, 0, 0), at(2009, 9, 17, 19, 0)),
        ("sept 17 - 7pm", at(2009, 9, 17, 0, 0), at(2009, 9, 17, 19, 0)),
        ("aug 25 2009 - 8pm", at(2009, 8, 25, 0, 0), at(2009, 8, 25, 20, 0)),
        ("aug 25 - 8:30pm", at(2010, 8, 25, 0, 0), at(2010, 8, 25, 20, 30)),
    ];
    for (text, start, end) in cases {
        let range = parser()
            .parse(text)
            .unwrap_or_else(|| panic!("failed to parse {text:?}"));
        assert_eq!(range.start(), start, "text: {text}");
        assert_eq!(range.end(), end, "text: {text}");
    }
}

#[test]
fn meridiem_inheritance_with_word_delimiters() {
    let cases = [
        ("jan 1 2009 8 to 11pm", at(2009, 1, 1, 20, 0), at(2009, 1, 1, 23, 0)),
        (
            "jan 1 2009 8 until jan 1 2009 11pm",
            at(2009, 1, 1, 20, 0),
            at(2009, 1, 1, 23, 0),
        ),
        ("jan 1 2009 to 5pm", at(2009, 1, 1, 0, 0), at(2009, 1, 1, 17, 0)),
        ("9/17/2009 until 7pm", at(2009, 9, 17, 0, 0), at(2009, 9, 17, 19, 0)),
    ];
    for (text, start, end) in cases {
        let range = parser()
            .parse(text)
            .unwrap_or_else(|| panic!("failed to parse {text:?}"));
        assert_eq!(range.start(), start, "text: {text}");
        assert_eq!(range.end(), end, "text: {text}");
    }
}

#[test]
fn slash_day_pair_uses_the_clock_year() {
    let range = parser().parse("9/17-28").unwrap();
    assert_eq!(range.start(), phrase("9/17/2009").first);
    assert_eq!(range.end(), phrase("9/28/2009").last);
}

#[test]
fn slash_date_with_time_pair() {
    let range = parser().parse("9/17 8am - 7pm").unwrap();
    assert_eq!(range.start(), at(2009, 9, 17, 8, 0));
    assert_eq!(range.end(), at(2009, 9, 17, 19, 0));
}

#[test]
fn bare_day_number_end() {
    let range = parser().parse("9/17/2009 - 28").unwrap();
    assert_eq!(range.start(), at(2009, 9, 17, 0, 0));
    assert_eq!(range.end(), at(2009, 9, 29, 0, 0));
}

#[test]
fn month_day_pair() {
    let range = parser().parse("Sept 17-28").unwrap();
    assert_eq!(range.start(), at(2009, 9, 17, 0, 0));
    assert_eq!(range.end(), at(2009, 9, 29, 0, 0));

    let with_year = parser().parse("Sept 17-28 2010").unwrap();
    assert_eq!(with_year.start(), at(2010, 9, 17, 0, 0));
    assert_eq!(with_year.end(), at(2010, 9, 29, 0, 0));
}

#[test]
fn end_resolves_relative_to_the_start() {
    // "jan 2" is looked up from Jan 1 2015, not from the clock.
    let range = parser().parse("jan 1 2015 8am - jan 2 10am").unwrap();
    assert_eq!(range.end(), at(2015, 1, 2, 10, 0));
}

#[test]
fn time_only_range_lands_after_now() {
    let range = parser().parse("8am-5pm").unwrap();
    assert_eq!(range.start(), at(2009, 9, 2, 8, 0));
    assert_eq!(range.end(), at(2009, 9, 2, 17, 0));
}

// ---------------------------------------------------------------------------
// Recurrence
// ---------------------------------------------------------------------------

#[test]
fn recurrence_kinds() {
    let p = parser();
    assert_eq!(p.parse("thursdays").unwrap().kind(), RecurrenceKind::Weekly);
    assert_eq!(p.parse("evenings").unwrap().kind(), RecurrenceKind::Daily);
    assert_eq!(p.parse("thursday evenings").unwrap().kind(), RecurrenceKind::Weekly);
    assert_eq!(p.parse("thursday").unwrap().kind(), RecurrenceKind::None);
    assert_eq!(p.parse("8am-5pm daily").unwrap().kind(), RecurrenceKind::Daily);
    assert_eq!(p.parse("friday 6pm weekly").unwrap().kind(), RecurrenceKind::Weekly);
}

#[test]
fn repeating_template_is_the_first_occurrence() {
    let thursdays = parser().parse("thursdays").unwrap();
    assert_eq!(thursdays.start(), at(2009, 9, 3, 0, 0));
    assert_eq!(thursdays.end(), at(2009, 9, 4, 0, 0));

    let evenings = parser().parse("thursday evenings").unwrap();
    assert_eq!(evenings.start(), at(2009, 9, 3, 17, 0));
    assert_eq!(evenings.end(), at(2009, 9, 3, 20, 0));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn gibberish_is_absent() {
    assert_eq!(parser().parse("dsafasdfas"), None);
    assert_eq!(
        parser().try_parse("dsafasdfas"),
        Err(DateRangeError::Unrecognized("dsafasdfas".into()))
    );
}

#[test]
fn empty_and_filler_only_text() {
    assert_eq!(parser().try_parse(""), Err(DateRangeError::Empty));
    assert_eq!(parser().try_parse("   "), Err(DateRangeError::Empty));
    assert_eq!(parser().try_parse("from"), Err(DateRangeError::Empty));
    assert_eq!(parser().try_parse("weekly"), Err(DateRangeError::Empty));
}

#[test]
fn unrecognized_end_names_the_end_phrase() {
    assert_eq!(
        parser().try_parse("jan 1 2009 - whenever"),
        Err(DateRangeError::Unrecognized("whenever".into()))
    );
}

#[test]
fn inverted_range_is_absent() {
    assert_eq!(parser().parse("dec 12 2009 - jan 1 2009"), None);
    assert!(matches!(
        parser().try_parse("dec 12 2009 - jan 1 2009"),
        Err(DateRangeError::Inverted { .. })
    ));
}

#[test]
fn impossible_dates_are_absent() {
    assert_eq!(parser().parse("feb 30 2009"), None);
    assert_eq!(parser().parse("jan 1 2009 13pm"), None);
}

// ---------------------------------------------------------------------------
// Custom phrase parser
// ---------------------------------------------------------------------------

/// Understands only "start" and "finish", one hour apart, and records nothing.
struct TwoWords;

impl FuzzyDateParser for TwoWords {
    fn parse(&self, text: &str, now: NaiveDateTime) -> Option<Span> {
        match text {
            "start" => Some(Span::point(now)),
            "finish" => Some(Span::point(now + chrono::Duration::hours(1))),
            _ => None,
        }
    }
}

#[test]
fn phrase_parser_is_pluggable() {
    let parser = RangeParser::new()
        .with_phrase_parser(TwoWords)
        .with_clock(FixedClock::new(now()));

    let range = parser.parse("from start until finish").unwrap();
    assert_eq!(range.start(), now());
    assert_eq!(range.end(), at(2009, 9, 1, 13, 0));
    assert_eq!(parser.parse("jan 1 2009"), None);
}

#[test]
fn clock_is_sampled_per_call() {
    let early = RangeParser::new().with_clock(FixedClock::at_ymd(2009, 1, 1).unwrap());
    let late = RangeParser::new().with_clock(FixedClock::at_ymd(2009, 12, 1).unwrap());
    assert_eq!(early.parse("sept 17").unwrap().start(), at(2009, 9, 17, 0, 0));
    assert_eq!(late.parse("sept 17").unwrap().start(), at(2010, 9, 17, 0, 0));
}
