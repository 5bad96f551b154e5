//! Compact text rendering of a [`DateRange`].
//!
//! Components shared by both endpoints are written once:
//!
//! | Endpoints                        | Output                     |
//! |----------------------------------|----------------------------|
//! | same day, same half of the day   | `Jan  1 8-10am`            |
//! | same day, am and pm              | `Jan  1 8am-5pm`           |
//! | different days                   | `Jan  1 8am - Jan  2 10am` |
//! | whole single day                 | `Jan  1`                   |
//! | whole days                       | `Aug 25 - Sep  3`          |
//!
//! Minutes are shown only when non-zero. The year is shown only for an
//! endpoint outside the "near now" window (by default from 2 months before
//! to 10 months after the clock's current instant).

use chrono::{Duration, Months, NaiveDateTime, Timelike};

use crate::clock::Clock;
use crate::range::DateRange;

/// How far around "now" an endpoint may lie and still omit its year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub months_before: u32,
    pub months_after: u32,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            months_before: 2,
            months_after: 10,
        }
    }
}

/// Renders ranges against a clock.
#[derive(Debug, Clone)]
pub struct Formatter<C> {
    clock: C,
    options: FormatOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Template {
    /// `Mon D[ Y] h[:MM]-h[:MM]P`
    SharedMeridiem,
    /// `Mon D[ Y] h[:MM]P-h[:MM]P`
    SplitMeridiem,
    /// `Mon D[ Y] h[:MM]P - Mon D[ Y] h[:MM]P`
    TwoSided,
}

impl Template {
    fn choose(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        if start.date() != end.date() {
            Template::TwoSided
        } else if start.hour() / 12 == end.hour() / 12 {
            Template::SharedMeridiem
        } else {
            Template::SplitMeridiem
        }
    }
}

/// The `(now - before, now + after)` interval in which years are omitted.
struct NearNow {
    after: Option<NaiveDateTime>,
    before: Option<NaiveDateTime>,
}

impl NearNow {
    fn around(now: NaiveDateTime, options: &FormatOptions) -> Self {
        Self {
            after: now.checked_sub_months(Months::new(options.months_before)),
            before: now.checked_add_months(Months::new(options.months_after)),
        }
    }

    fn contains(&self, at: NaiveDateTime) -> bool {
        self.after.is_none_or(|after| at > after) && self.before.is_none_or(|before| at < before)
    }
}

/// One side of the rendered range.
struct Endpoint {
    at: NaiveDateTime,
    show_year: bool,
}

impl Endpoint {
    fn new(at: NaiveDateTime, near: &NearNow) -> Self {
        Self {
            at,
            show_year: !near.contains(at),
        }
    }

    /// `Mon D[ Y]`
    fn date(&self) -> String {
        let mut out = self.at.format("%b %e").to_string();
        if self.show_year {
            out.push_str(&self.at.format(" %Y").to_string());
        }
        out
    }

    /// `h[:MM][P]`
    fn time(&self, with_meridiem: bool) -> String {
        let (pm, hour) = self.at.hour12();
        let mut out = hour.to_string();
        if self.at.minute() != 0 {
            out.push_str(&self.at.format(":%M").to_string());
        }
        if with_meridiem {
            out.push_str(if pm { "pm" } else { "am" });
        }
        out
    }
}

impl<C: Clock> Formatter<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            options: FormatOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn format(&self, range: &DateRange) -> String {
        let near = NearNow::around(self.clock.now(), &self.options);
        let (start, end) = (range.start(), range.end());
        let template = Template::choose(start, end);

        if is_midnight(start) && is_midnight(end) {
            // Whole days: the stored end is exclusive.
            let last = end.checked_sub_signed(Duration::minutes(1)).unwrap_or(end);
            let first = Endpoint::new(start, &near);
            if last.date() == start.date() {
                return first.date();
            }
            return render_dates(template, &first, &Endpoint::new(last, &near));
        }

        let (first, second) = (Endpoint::new(start, &near), Endpoint::new(end, &near));
        match template {
            Template::SharedMeridiem => {
                format!("{} {}-{}", first.date(), first.time(false), second.time(true))
            }
            Template::SplitMeridiem => {
                format!("{} {}-{}", first.date(), first.time(true), second.time(true))
            }
            Template::TwoSided => format!(
                "{} {} - {} {}",
                first.date(),
                first.time(true),
                second.date(),
                second.time(true)
            ),
        }
    }
}

/// A template with every time-of-day token removed.
fn render_dates(template: Template, first: &Endpoint, last: &Endpoint) -> String {
    match template {
        Template::TwoSided => format!("{} - {}", first.date(), last.date()),
        Template::SharedMeridiem | Template::SplitMeridiem => first.date(),
    }
}

fn is_midnight(at: NaiveDateTime) -> bool {
    at.hour() == 0 && at.minute() == 0
}
