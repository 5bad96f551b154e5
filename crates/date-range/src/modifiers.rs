//! Weekly / daily recurrence cues.
//!
//! Two axes are recognized. The weekly axis is keyed by weekday names, the
//! daily axis by daypart names. For each axis:
//!
//! - a plural cue ("thursdays", "evenings") sets the axis flag and loses its
//!   trailing `s`, so the phrase parser still sees a usable date token;
//! - the axis word itself ("weekly", "daily") sets the axis flag and is
//!   deleted, since it carries no date information;
//! - a bare singular cue left in the text sets the axis' "able" flag.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::squeeze;
use crate::range::RecurrenceFlags;

const WEEKDAYS: &str = "sunday|monday|tuesday|wednesday|thursday|friday|saturday";
const DAYPARTS: &str = "morning|afternoon|evening";

struct Axis {
    plural: Regex,
    marker: Regex,
    bare: Regex,
}

impl Axis {
    fn new(words: &str, marker: &str) -> Self {
        Self {
            plural: Regex::new(&format!(r"(?i)\b({words})s\b")).unwrap(),
            marker: Regex::new(&format!(r"(?i)\b{marker}\b")).unwrap(),
            bare: Regex::new(&format!(r"(?i)\b(?:{words})\b")).unwrap(),
        }
    }

    /// Returns the rewritten text, the axis flag, and the "able" flag.
    fn apply(&self, text: &str) -> (String, bool, bool) {
        let mut text = text.to_string();
        let mut flagged = false;

        if self.plural.is_match(&text) {
            flagged = true;
            text = self.plural.replace_all(&text, "${1}").into_owned();
        }
        if self.marker.is_match(&text) {
            flagged = true;
            text = self.marker.replace_all(&text, " ").into_owned();
        }

        let able = self.bare.is_match(&text);
        (text, flagged, able)
    }
}

static WEEKLY: Lazy<Axis> = Lazy::new(|| Axis::new(WEEKDAYS, "weekly"));
static DAILY: Lazy<Axis> = Lazy::new(|| Axis::new(DAYPARTS, "daily"));

/// Strip recurrence cues from `text`.
///
/// Never fails: text without cues comes back whitespace-normalized with
/// [`RecurrenceFlags::NONE`].
///
/// ```
/// use date_range::modifiers::extract;
/// use date_range::RecurrenceKind;
///
/// let (rest, flags) = extract("thursday evenings");
/// assert_eq!(rest, "thursday evening");
/// assert_eq!(flags.kind(), RecurrenceKind::Weekly);
/// ```
pub fn extract(text: &str) -> (String, RecurrenceFlags) {
    let (text, weekly, weekdayable) = WEEKLY.apply(text);
    let (text, daily, dailyable) = DAILY.apply(&text);
    let flags = RecurrenceFlags {
        weekly,
        daily,
        weekdayable,
        dailyable,
    };
    (squeeze(&text), flags)
}
