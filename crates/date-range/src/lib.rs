//! # date-range
//!
//! Natural-language date/time intervals, including weekly and daily repeats.
//!
//! Freeform text such as `"jan 1 8am-5pm 2009"`, `"Sept 17-28"` or
//! `"thursday evenings"` is rewritten into a canonical `"<start> - <end>"`
//! form, each side is resolved by a [`FuzzyDateParser`], and the result is a
//! [`DateRange`]. A repeating range expands into concrete occurrences inside
//! a window, and any range renders back into compact text.
//!
//! ## Quick start
//!
//! ```rust
//! use date_range::{FixedClock, RangeParser};
//!
//! let clock = FixedClock::at_ymd(2009, 7, 1).unwrap();
//! let parser = RangeParser::new().with_clock(clock);
//!
//! let thursdays = parser.parse("thursdays").unwrap();
//! let july = parser.parse("7/1/09 - 7/31/09").unwrap();
//!
//! let occurrences = thursdays.overlapping(&july);
//! assert_eq!(occurrences.len(), 5);
//! assert_eq!(
//!     occurrences.format(clock),
//!     "Jul  2, Jul  9, Jul 16, Jul 23, Jul 30"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`normalize`] — shorthand interval syntax → canonical text
//! - [`modifiers`] — weekly / daily recurrence cues → [`RecurrenceFlags`]
//! - [`phrase`] — the [`FuzzyDateParser`] seam and the default [`PhraseParser`]
//! - [`parser`] — text → [`DateRange`]
//! - [`overlap`] — repeating range → occurrences inside a window
//! - [`format`] — [`DateRange`] → compact text
//! - [`clock`] — injectable "now"
//! - [`error`] — Error types

pub mod clock;
pub mod error;
pub mod format;
pub mod modifiers;
pub mod normalize;
pub mod overlap;
pub mod parser;
pub mod phrase;
pub mod range;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::DateRangeError;
pub use format::{FormatOptions, Formatter};
pub use parser::{parse, try_parse, RangeParser};
pub use phrase::{FuzzyDateParser, PhraseParser, Span};
pub use range::{DateRange, DateRangeList, RecurrenceFlags, RecurrenceKind};
