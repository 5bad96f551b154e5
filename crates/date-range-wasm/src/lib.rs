//! WASM bindings for date-range.
//!
//! Exposes range parsing, occurrence expansion, and formatting to JavaScript
//! via `wasm-bindgen`. Structured results cross the boundary as JSON strings.
//! Every export takes an optional `now` (ISO 8601 local datetime or date) so
//! callers control the clock; when omitted the host's local time is used.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p date-range-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/date-range-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/date_range_wasm.wasm
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use date_range::{
    Clock, DateRange, FixedClock, PhraseParser, RangeParser, RecurrenceKind, SystemClock,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct RangeDto {
    start: String,
    end: String,
    recurrence: RecurrenceKind,
    text: String,
}

impl RangeDto {
    fn new(range: &DateRange, clock: FixedClock) -> Self {
        Self {
            start: iso(range.start()),
            end: iso(range.end()),
            recurrence: range.kind(),
            text: range.format(clock),
        }
    }
}

fn iso(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S").to_string()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the optional `now` argument into a fixed clock, sampled once per call.
///
/// Accepts `"2009-09-01T12:00:00"`, `"2009-09-01T12:00"`, or `"2009-09-01"`.
fn clock_from(now: Option<&str>) -> Result<FixedClock, String> {
    let Some(now) = now else {
        return Ok(FixedClock::new(SystemClock.now()));
    };
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(now, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(now, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(FixedClock::new)
        .ok_or_else(|| format!("Invalid datetime '{}'", now))
}

fn parse_with(
    parser: &RangeParser<PhraseParser, FixedClock>,
    text: &str,
) -> Result<DateRange, String> {
    parser.try_parse(text).map_err(|e| e.to_string())
}

fn parse_range_json(text: &str, now: Option<&str>) -> Result<String, String> {
    let clock = clock_from(now)?;
    let parser = RangeParser::new().with_clock(clock);
    let range = parse_with(&parser, text)?;
    serde_json::to_string(&RangeDto::new(&range, clock))
        .map_err(|e| format!("Serialization error: {}", e))
}

fn format_range_text(text: &str, now: Option<&str>) -> Result<String, String> {
    let clock = clock_from(now)?;
    let parser = RangeParser::new().with_clock(clock);
    Ok(parse_with(&parser, text)?.format(clock))
}

fn expand_range_json(text: &str, within: &str, now: Option<&str>) -> Result<String, String> {
    let clock = clock_from(now)?;
    let parser = RangeParser::new().with_clock(clock);
    let range = parse_with(&parser, text)?;
    let bounds = parse_with(&parser, within)?;
    let dtos: Vec<RangeDto> = range
        .overlapping(&bounds)
        .iter()
        .map(|occurrence| RangeDto::new(occurrence, clock))
        .collect();
    serde_json::to_string(&dtos).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Parse a natural-language date range.
///
/// Returns a JSON object `{start, end, recurrence, text}` where `start` and
/// `end` are ISO 8601 local datetimes, `recurrence` is `"none"`, `"daily"`,
/// or `"weekly"`, and `text` is the compact rendering.
#[wasm_bindgen(js_name = "parseRange")]
pub fn parse_range(text: &str, now: Option<String>) -> Result<String, JsValue> {
    parse_range_json(text, now.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Parse a date range and render it back as compact text.
#[wasm_bindgen(js_name = "formatRange")]
pub fn format_range(text: &str, now: Option<String>) -> Result<String, JsValue> {
    format_range_text(text, now.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Expand a (possibly repeating) range into the occurrences inside `within`.
///
/// Returns a JSON array of `{start, end, recurrence, text}` objects in
/// ascending order.
#[wasm_bindgen(js_name = "expandRange")]
pub fn expand_range(text: &str, within: &str, now: Option<String>) -> Result<String, JsValue> {
    expand_range_json(text, within, now.as_deref()).map_err(|e| JsValue::from_str(&e))
}
