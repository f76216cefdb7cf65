//! Julian Day Number <-> proleptic Gregorian calendar conversions.
//!
//! Integer day numbers only: a JDN labels the civil day whose noon falls on
//! that Julian Date. Divisions use `div_euclid` so years before the era work.

/// JDN of 2000-01-01.
pub const J2000_JDN: i64 = 2_451_545;

/// Minutes in a civil day.
pub const MINUTES_PER_DAY: i64 = 1_440;

/// Gregorian leap-year rule.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`. Returns 0 for an invalid month.
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Julian Day Number of a proleptic Gregorian date.
///
/// The caller is responsible for passing a valid date.
pub fn calendar_to_jdn(year: i32, month: u32, day: u32) -> i64 {
    let month = i64::from(month);
    let a = (14 - month) / 12;
    let y = i64::from(year) + 4800 - a;
    let m = month + 12 * a - 3;
    i64::from(day) + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        - 32_045
}

/// Proleptic Gregorian `(year, month, day)` for a Julian Day Number.
pub fn jdn_to_calendar(jdn: i64) -> (i32, u32, u32) {
    let a = jdn + 32_044;
    let b = (4 * a + 3).div_euclid(146_097);
    let c = a - (146_097 * b).div_euclid(4);
    let d = (4 * c + 3).div_euclid(1_461);
    let e = c - (1_461 * d).div_euclid(4);
    let m = (5 * e + 2).div_euclid(153);
    let day = e - (153 * m + 2).div_euclid(5) + 1;
    let month = m + 3 - 12 * m.div_euclid(10);
    let year = 100 * b + d - 4800 + m.div_euclid(10);
    (year as i32, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_day_number() {
        assert_eq!(calendar_to_jdn(2000, 1, 1), J2000_JDN);
    }

    #[test]
    fn known_day_numbers() {
        assert_eq!(calendar_to_jdn(1949, 10, 1), 2_433_191);
        assert_eq!(calendar_to_jdn(1970, 1, 1), 2_440_588);
        assert_eq!(calendar_to_jdn(2008, 8, 8), 2_454_687);
    }

    #[test]
    fn inverse_recovers_dates() {
        for &(y, m, d) in &[
            (2000, 1, 1),
            (1900, 2, 28),
            (2000, 2, 29),
            (1582, 10, 15),
            (-500, 3, 1),
            (2399, 12, 31),
        ] {
            assert_eq!(jdn_to_calendar(calendar_to_jdn(y, m, d)), (y, m, d));
        }
    }

    #[test]
    fn consecutive_days_are_consecutive_numbers() {
        assert_eq!(calendar_to_jdn(2024, 3, 1) - calendar_to_jdn(2024, 2, 29), 1);
        assert_eq!(calendar_to_jdn(2023, 3, 1) - calendar_to_jdn(2023, 2, 28), 1);
        assert_eq!(calendar_to_jdn(2025, 1, 1) - calendar_to_jdn(2024, 12, 31), 1);
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 13), 0);
    }
}
