//! Civil calendar primitives for the bazi engine.
//!
//! This crate provides:
//! - Julian Day Number <-> proleptic Gregorian conversions
//! - Validated civil date, wall-clock time, and UTC offset types
//! - `CivilDateTime`, the localized birth moment consumed by `bazi_base`
//!
//! Timezone and DST normalization are the caller's responsibility.

pub mod civil;
pub mod error;
pub mod julian;

pub use civil::{CivilDate, CivilDateTime, ClockTime, UtcOffset, minutes_between};
pub use error::TimeError;
pub use julian::{
    J2000_JDN, MINUTES_PER_DAY, calendar_to_jdn, days_in_month, is_leap_year, jdn_to_calendar,
};
