//! Error types for bazi calculations.

use std::error::Error;
use std::fmt::{Display, Formatter};

use bazi_time::TimeError;

use crate::branch::Branch;
use crate::stem::Stem;

/// Errors from bazi base calculations.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BaziError {
    /// Day/month/year combination is impossible in the civil calendar.
    InvalidDate(TimeError),
    /// Hour, minute, or UTC offset out of range.
    InvalidTime(TimeError),
    /// Stem and branch differ in parity; no such sexagenary pair exists.
    InvalidPairing { stem: Stem, branch: Branch },
    /// Analysis configuration rejected by validation.
    InvalidConfig(String),
}

impl Display for BaziError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(e) | Self::InvalidTime(e) => write!(f, "{e}"),
            Self::InvalidPairing { stem, branch } => write!(
                f,
                "invalid pairing: stem {stem} (index {}) cannot pair with branch {branch} (index {})",
                stem.index(),
                branch.index()
            ),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for BaziError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDate(e) | Self::InvalidTime(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TimeError> for BaziError {
    fn from(e: TimeError) -> Self {
        match e {
            TimeError::InvalidDate { .. } => Self::InvalidDate(e),
            _ => Self::InvalidTime(e),
        }
    }
}
