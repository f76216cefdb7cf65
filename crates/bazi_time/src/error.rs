//! Error types for civil date/time validation.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from civil date/time construction or parsing.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// Day/month/year combination does not exist in the proleptic Gregorian calendar.
    InvalidDate { year: i32, month: u32, day: u32 },
    /// Hour, minute, or UTC offset out of range.
    InvalidTime(String),
    /// Text could not be parsed as a date, time, or offset.
    Parse(String),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate { year, month, day } => {
                write!(f, "invalid date: {year:04}-{month:02}-{day:02}")
            }
            Self::InvalidTime(msg) => write!(f, "invalid time: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl Error for TimeError {}

impl From<std::num::ParseIntError> for TimeError {
    fn from(e: std::num::ParseIntError) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<std::num::ParseFloatError> for TimeError {
    fn from(e: std::num::ParseFloatError) -> Self {
        Self::Parse(e.to_string())
    }
}
