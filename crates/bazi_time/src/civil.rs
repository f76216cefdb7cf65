//! Validated civil (wall-clock) date and time.
//!
//! `CivilDateTime` is the canonical birth-moment representation consumed by
//! the pillar calculator. Values are already localized by the caller; the UTC
//! offset is carried for the record and never applied here.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimeError;
use crate::julian::{MINUTES_PER_DAY, calendar_to_jdn, days_in_month, jdn_to_calendar};

/// Proleptic Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCivilDate")]
pub struct CivilDate {
    year: i32,
    month: u32,
    day: u32,
}

#[derive(Deserialize)]
struct RawCivilDate {
    year: i32,
    month: u32,
    day: u32,
}

impl TryFrom<RawCivilDate> for CivilDate {
    type Error = TimeError;

    fn try_from(raw: RawCivilDate) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month, raw.day)
    }
}

impl CivilDate {
    /// Validated constructor.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(TimeError::InvalidDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month, 1-12.
    pub const fn month(self) -> u32 {
        self.month
    }

    pub const fn day(self) -> u32 {
        self.day
    }

    /// Julian Day Number of this date.
    pub fn jdn(self) -> i64 {
        calendar_to_jdn(self.year, self.month, self.day)
    }

    /// Date for a Julian Day Number.
    pub fn from_jdn(jdn: i64) -> Self {
        let (year, month, day) = jdn_to_calendar(jdn);
        Self { year, month, day }
    }

    /// The following civil day.
    pub fn next_day(self) -> Self {
        Self::from_jdn(self.jdn() + 1)
    }

    /// Same day `months` calendar months later (earlier when negative),
    /// clamped to the length of the target month.
    pub fn add_months(self, months: i64) -> Self {
        let total = i64::from(self.year) * 12 + i64::from(self.month - 1) + months;
        let year = total.div_euclid(12) as i32;
        let month = total.rem_euclid(12) as u32 + 1;
        let day = self.day.min(days_in_month(year, month));
        Self { year, month, day }
    }

    /// First day of this date's month.
    pub fn first_of_month(self) -> Self {
        Self { day: 1, ..self }
    }

    /// First day of the following month.
    pub fn first_of_next_month(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1, day: 1 }
        } else {
            Self { month: self.month + 1, day: 1, ..self }
        }
    }
}

impl Display for CivilDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CivilDate {
    type Err = TimeError;

    /// Parse `YYYY-MM-DD`. A leading `-` marks a year before 1 CE.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sign, rest) = match s.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, s),
        };
        let parts: Vec<&str> = rest.split('-').collect();
        if parts.len() != 3 {
            return Err(TimeError::Parse(format!("expected YYYY-MM-DD, got {s}")));
        }
        let year: i32 = parts[0].parse()?;
        let month: u32 = parts[1].parse()?;
        let day: u32 = parts[2].parse()?;
        Self::new(sign * year, month, day)
    }
}

/// Wall-clock time of day at minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawClockTime")]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

#[derive(Deserialize)]
struct RawClockTime {
    hour: u32,
    minute: u32,
}

impl TryFrom<RawClockTime> for ClockTime {
    type Error = TimeError;

    fn try_from(raw: RawClockTime) -> Result<Self, Self::Error> {
        Self::new(raw.hour, raw.minute)
    }
}

impl ClockTime {
    /// Validated constructor: hour 0-23, minute 0-59.
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::InvalidTime(format!("hour {hour} outside 0-23")));
        }
        if minute > 59 {
            return Err(TimeError::InvalidTime(format!("minute {minute} outside 0-59")));
        }
        Ok(Self { hour, minute })
    }

    /// Midnight.
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    pub const fn hour(self) -> u32 {
        self.hour
    }

    pub const fn minute(self) -> u32 {
        self.minute
    }

    /// Hours since midnight, with the minutes as a fraction.
    pub fn fractional_hour(self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0
    }

    /// Minutes since midnight.
    pub const fn minute_of_day(self) -> u32 {
        self.hour * 60 + self.minute
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    /// Parse `hh:mm`. A trailing `:ss` (two digits, 00-59) is accepted and
    /// dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(TimeError::Parse(format!("expected hh:mm, got {s}")));
        }
        if let Some(seconds) = parts.get(2) {
            let valid = seconds.len() == 2
                && seconds.bytes().all(|b| b.is_ascii_digit())
                && seconds.parse::<u32>().is_ok_and(|ss| ss < 60);
            if !valid {
                return Err(TimeError::Parse(format!("invalid seconds in {s}")));
            }
        }
        let hour: u32 = parts[0].parse()?;
        let minute: u32 = parts[1].parse()?;
        Self::new(hour, minute)
    }
}

/// UTC offset stored in quarter hours (covers +05:45, +08:45 and the like).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawUtcOffset")]
pub struct UtcOffset {
    quarter_hours: i16,
}

#[derive(Deserialize)]
struct RawUtcOffset {
    quarter_hours: i16,
}

impl TryFrom<RawUtcOffset> for UtcOffset {
    type Error = TimeError;

    fn try_from(raw: RawUtcOffset) -> Result<Self, Self::Error> {
        Self::from_hours(f64::from(raw.quarter_hours) / 4.0)
    }
}

impl UtcOffset {
    /// Most negative offset in use (UTC-12).
    pub const MIN_HOURS: f64 = -12.0;
    /// Most positive offset in use (UTC+14).
    pub const MAX_HOURS: f64 = 14.0;

    pub const UTC: Self = Self { quarter_hours: 0 };

    /// Offset from fractional hours. Must be finite, within UTC-12..=UTC+14,
    /// and a whole number of quarter hours.
    pub fn from_hours(hours: f64) -> Result<Self, TimeError> {
        if !hours.is_finite() || !(Self::MIN_HOURS..=Self::MAX_HOURS).contains(&hours) {
            return Err(TimeError::InvalidTime(format!(
                "UTC offset {hours} outside -12..=+14 hours"
            )));
        }
        let quarters = hours * 4.0;
        if (quarters - quarters.round()).abs() > 1e-9 {
            return Err(TimeError::InvalidTime(format!(
                "UTC offset {hours} is not a multiple of 15 minutes"
            )));
        }
        Ok(Self {
            quarter_hours: quarters.round() as i16,
        })
    }

    pub fn hours(self) -> f64 {
        f64::from(self.quarter_hours) / 4.0
    }

    pub fn minutes(self) -> i32 {
        i32::from(self.quarter_hours) * 15
    }
}

impl Default for UtcOffset {
    fn default() -> Self {
        Self::UTC
    }
}

impl Display for UtcOffset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let total = self.minutes();
        let sign = if total < 0 { '-' } else { '+' };
        let abs = total.abs();
        write!(f, "UTC{sign}{:02}:{:02}", abs / 60, abs % 60)
    }
}

impl FromStr for UtcOffset {
    type Err = TimeError;

    /// Parse decimal hours (`8`, `-3.5`, `5.75`) or `±hh:mm`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((h, m)) = s.split_once(':') {
            let negative = h.starts_with('-');
            let digits = h.strip_prefix(['+', '-']).unwrap_or(h);
            let unsigned =
                |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
            if !unsigned(digits) || !unsigned(m) {
                return Err(TimeError::Parse(format!("expected ±hh:mm, got {s}")));
            }
            let hours: f64 = digits.parse()?;
            let minutes: f64 = m.parse()?;
            if minutes >= 60.0 {
                return Err(TimeError::Parse(format!("minutes out of range in {s}")));
            }
            let total = hours + minutes / 60.0;
            return Self::from_hours(if negative { -total } else { total });
        }
        Self::from_hours(s.trim_start_matches('+').parse()?)
    }
}

/// Localized birth moment: civil date, wall-clock time, and the offset it was recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CivilDateTime {
    date: CivilDate,
    time: ClockTime,
    offset: UtcOffset,
}

impl CivilDateTime {
    pub fn new(date: CivilDate, time: ClockTime, offset: UtcOffset) -> Self {
        Self { date, time, offset }
    }

    pub const fn date(self) -> CivilDate {
        self.date
    }

    pub const fn time(self) -> ClockTime {
        self.time
    }

    pub const fn offset(self) -> UtcOffset {
        self.offset
    }

    /// Validate raw components in one step.
    pub fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        offset_hours: f64,
    ) -> Result<Self, TimeError> {
        Ok(Self {
            date: CivilDate::new(year, month, day)?,
            time: ClockTime::new(hour, minute)?,
            offset: UtcOffset::from_hours(offset_hours)?,
        })
    }

    /// Minutes since JDN 0 midnight on the local wall clock.
    pub fn local_minutes(self) -> i64 {
        self.date.jdn() * MINUTES_PER_DAY + i64::from(self.time.minute_of_day())
    }
}

impl Display for CivilDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}T{} {}", self.date, self.time, self.offset)
    }
}

/// Signed whole minutes from `from` to `to` on the local wall clock.
pub fn minutes_between(from: CivilDateTime, to: CivilDateTime) -> i64 {
    to.local_minutes() - from.local_minutes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_impossible_dates() {
        assert!(CivilDate::new(2024, 2, 30).is_err());
        assert!(CivilDate::new(2023, 2, 29).is_err());
        assert!(CivilDate::new(2024, 13, 1).is_err());
        assert!(CivilDate::new(2024, 0, 1).is_err());
        assert!(CivilDate::new(2024, 4, 31).is_err());
        assert!(CivilDate::new(2024, 2, 29).is_ok());
    }

    #[test]
    fn invalid_date_reports_components() {
        let err = CivilDate::new(2024, 2, 30).unwrap_err();
        assert_eq!(
            err,
            TimeError::InvalidDate {
                year: 2024,
                month: 2,
                day: 30
            }
        );
        assert_eq!(err.to_string(), "invalid date: 2024-02-30");
    }

    #[test]
    fn rejects_out_of_range_time() {
        assert!(ClockTime::new(24, 0).is_err());
        assert!(ClockTime::new(23, 60).is_err());
        assert!(ClockTime::new(23, 59).is_ok());
    }

    #[test]
    fn next_day_rolls_month_and_year() {
        let d = CivilDate::new(2023, 12, 31).unwrap();
        assert_eq!(d.next_day(), CivilDate::new(2024, 1, 1).unwrap());
        let d = CivilDate::new(2024, 2, 28).unwrap();
        assert_eq!(d.next_day(), CivilDate::new(2024, 2, 29).unwrap());
    }

    #[test]
    fn month_boundaries() {
        let d = CivilDate::new(2024, 12, 17).unwrap();
        assert_eq!(d.first_of_month(), CivilDate::new(2024, 12, 1).unwrap());
        assert_eq!(d.first_of_next_month(), CivilDate::new(2025, 1, 1).unwrap());
    }

    #[test]
    fn add_months_clamps_day() {
        let d = CivilDate::new(2008, 8, 8).unwrap();
        assert_eq!(d.add_months(92), CivilDate::new(2016, 4, 8).unwrap());
        assert_eq!(d.add_months(-8), CivilDate::new(2007, 12, 8).unwrap());
        let end = CivilDate::new(2023, 1, 31).unwrap();
        assert_eq!(end.add_months(1), CivilDate::new(2023, 2, 28).unwrap());
        assert_eq!(end.add_months(13), CivilDate::new(2024, 2, 29).unwrap());
        assert_eq!(end.add_months(0), end);
    }

    #[test]
    fn offset_validation() {
        assert_eq!(UtcOffset::from_hours(8.0).unwrap().minutes(), 480);
        assert_eq!(UtcOffset::from_hours(-3.5).unwrap().minutes(), -210);
        assert_eq!(UtcOffset::from_hours(5.75).unwrap().minutes(), 345);
        assert!(UtcOffset::from_hours(8.1).is_err());
        assert!(UtcOffset::from_hours(15.0).is_err());
        assert!(UtcOffset::from_hours(f64::NAN).is_err());
    }

    #[test]
    fn parse_round_trip_text() {
        let date: CivilDate = "1989-03-15".parse().unwrap();
        assert_eq!(date.to_string(), "1989-03-15");
        let time: ClockTime = "08:30".parse().unwrap();
        assert_eq!(time.to_string(), "08:30");
        let offset: UtcOffset = "+05:45".parse().unwrap();
        assert_eq!(offset.to_string(), "UTC+05:45");
        let offset: UtcOffset = "-3.5".parse().unwrap();
        assert_eq!(offset.to_string(), "UTC-03:30");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("1989/03/15".parse::<CivilDate>().is_err());
        assert!("8".parse::<ClockTime>().is_err());
        assert!("eight".parse::<UtcOffset>().is_err());
    }

    #[test]
    fn parse_validates_seconds() {
        assert_eq!("08:30:59".parse::<ClockTime>().unwrap().to_string(), "08:30");
        assert!("08:30:99".parse::<ClockTime>().is_err());
        assert!("08:30:".parse::<ClockTime>().is_err());
        assert!("08:30:5".parse::<ClockTime>().is_err());
        assert!("08:30:+5".parse::<ClockTime>().is_err());
    }

    #[test]
    fn parse_rejects_signed_offset_minutes() {
        assert!("+05:-30".parse::<UtcOffset>().is_err());
        assert!("+05:+30".parse::<UtcOffset>().is_err());
        assert!("+05:".parse::<UtcOffset>().is_err());
        assert!("+05:75".parse::<UtcOffset>().is_err());
        assert_eq!("-03:30".parse::<UtcOffset>().unwrap().minutes(), -210);
        assert_eq!("05:30".parse::<UtcOffset>().unwrap().minutes(), 330);
    }

    #[test]
    fn deserialize_checks_components() {
        let ok: CivilDate = serde_json::from_str(r#"{"year":2024,"month":2,"day":29}"#).unwrap();
        assert_eq!(ok, CivilDate::new(2024, 2, 29).unwrap());
        assert!(serde_json::from_str::<CivilDate>(r#"{"year":2024,"month":2,"day":30}"#).is_err());
        assert!(serde_json::from_str::<CivilDate>(r#"{"year":2024,"month":0,"day":1}"#).is_err());
        assert!(serde_json::from_str::<ClockTime>(r#"{"hour":99,"minute":0}"#).is_err());
        assert!(serde_json::from_str::<UtcOffset>(r#"{"quarter_hours":32000}"#).is_err());
    }

    #[test]
    fn serialized_moment_reads_back() {
        let moment = CivilDateTime::from_parts(2008, 8, 8, 20, 0, 5.75).unwrap();
        let json = serde_json::to_string(&moment).unwrap();
        assert_eq!(serde_json::from_str::<CivilDateTime>(&json).unwrap(), moment);
        let bad = json.replace("\"day\":8", "\"day\":32");
        assert!(serde_json::from_str::<CivilDateTime>(&bad).is_err());
    }

    #[test]
    fn minutes_between_spans_midnight() {
        let a = CivilDateTime::from_parts(2024, 1, 1, 23, 30, 8.0).unwrap();
        let b = CivilDateTime::from_parts(2024, 1, 2, 0, 15, 8.0).unwrap();
        assert_eq!(minutes_between(a, b), 45);
        assert_eq!(minutes_between(b, a), -45);
    }
}
