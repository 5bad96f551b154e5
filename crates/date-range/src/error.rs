//! Error types for date-range operations.

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Empty date range text")]
    Empty,

    /// A start or end phrase that the phrase parser could not resolve.
    #[error("Unrecognized date phrase: '{0}'")]
    Unrecognized(String),

    #[error("Inverted range: start {start} is after end {end}")]
    Inverted {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

pub type Result<T> = std::result::Result<T, DateRangeError>;
