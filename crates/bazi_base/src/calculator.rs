//! Pillar calculator: civil birth moment → FourPillars.
//!
//! Year and month boundaries use the fixed civil-calendar approximation:
//! the year pillar changes on 1 January and each month pillar covers one
//! civil month (January → 丑, February → 寅, ..., December → 子). True
//! solar-term (节气) boundaries fall 3-8 days into each civil month, so dates
//! in that window, and January/early February for the year pillar, can
//! differ from an almanac.

use bazi_time::{CivilDate, CivilDateTime, ClockTime, TimeError};
use tracing::debug;

use crate::branch::branch_at;
use crate::config::LateRat;
use crate::error::BaziError;
use crate::pillar::{FourPillars, Pillar};
use crate::stem::{Stem, stem_at};

/// Year whose pillar is 甲子 under the (year − 4) rule.
pub const YEAR_EPOCH: i32 = 4;

/// JDN of 1949-10-01, a 甲子 day.
pub const JIAZI_REFERENCE_JDN: i64 = 2_433_191;

/// Year pillar of a civil year.
pub fn year_pillar(year: i32) -> Pillar {
    Pillar::from_cycle_index(i64::from(year) - i64::from(YEAR_EPOCH))
}

/// Stem of the 寅 month for a year stem (五虎遁).
///
/// 甲/己 → 丙, 乙/庚 → 戊, 丙/辛 → 庚, 丁/壬 → 壬, 戊/癸 → 甲.
pub fn tiger_month_stem(year_stem: Stem) -> Stem {
    stem_at(i64::from(year_stem.index() % 5) * 2 + 2)
}

/// Stem of the 子 double-hour for a day stem (五鼠遁).
///
/// 甲/己 → 甲, 乙/庚 → 丙, 丙/辛 → 戊, 丁/壬 → 庚, 戊/癸 → 壬.
pub fn rat_hour_stem(day_stem: Stem) -> Stem {
    stem_at(i64::from(day_stem.index() % 5) * 2)
}

/// Month pillar for civil `month` (1-12) of `year`.
///
/// January carries the stem one before the year's 寅 month, i.e. the 丑
/// month that closes the previous cycle, so stem and branch parity agree
/// for every month.
pub fn month_pillar(year: i32, month: u32) -> Result<Pillar, BaziError> {
    if !(1..=12).contains(&month) {
        return Err(TimeError::InvalidDate { year, month, day: 1 }.into());
    }
    let branch = branch_at(i64::from(month) % 12);
    let start = tiger_month_stem(year_pillar(year).stem()).offset(-1);
    let stem = start.offset(i64::from(month) - 1);
    Pillar::new(stem, branch)
}

/// Day pillar of a civil date.
pub fn day_pillar(date: CivilDate) -> Pillar {
    Pillar::from_cycle_index(date.jdn() - JIAZI_REFERENCE_JDN)
}

/// Double-hour branch index: floor((hour + minute/60 + 1) / 2) mod 12.
///
/// Block 0 (子) spans 23:00-00:59.
pub fn hour_branch_index(time: ClockTime) -> u8 {
    (((time.minute_of_day() + 60) / 120) % 12) as u8
}

/// Hour pillar for a day stem and wall-clock time.
pub fn hour_pillar(day_stem: Stem, time: ClockTime) -> Result<Pillar, BaziError> {
    let b = i64::from(hour_branch_index(time));
    let stem = rat_hour_stem(day_stem).offset(b);
    Pillar::new(stem, branch_at(b))
}

/// Four pillars of a localized birth moment.
pub fn compute_four_pillars(
    moment: &CivilDateTime,
    late_rat: LateRat,
) -> Result<FourPillars, BaziError> {
    let date = moment.date();
    let time = moment.time();
    let day_date = match late_rat {
        LateRat::NextDay if time.hour() == 23 => date.next_day(),
        _ => date,
    };
    let year = year_pillar(date.year());
    let month = month_pillar(date.year(), date.month())?;
    let day = day_pillar(day_date);
    let hour = hour_pillar(day.stem(), time)?;
    let pillars = FourPillars::new(year, month, day, hour);
    debug!(moment = %moment, pillars = %pillars, "computed four pillars");
    Ok(pillars)
}

/// Validate raw components and compute the four pillars with default conventions.
///
/// Fails with `InvalidDate` or `InvalidTime`.
pub fn four_pillars(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    utc_offset_hours: f64,
) -> Result<FourPillars, BaziError> {
    let moment = CivilDateTime::from_parts(year, month, day, hour, minute, utc_offset_hours)?;
    compute_four_pillars(&moment, LateRat::SameDay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::Branch;

    fn hm(h: u32, m: u32) -> ClockTime {
        ClockTime::new(h, m).unwrap()
    }

    #[test]
    fn year_pillars() {
        assert_eq!(year_pillar(4).to_string(), "甲子");
        assert_eq!(year_pillar(1984).to_string(), "甲子");
        assert_eq!(year_pillar(2024).to_string(), "甲辰");
        assert_eq!(year_pillar(1989).to_string(), "己巳");
        assert_eq!(year_pillar(3).to_string(), "癸亥");
    }

    #[test]
    fn tiger_rule() {
        assert_eq!(tiger_month_stem(Stem::Jia), Stem::Bing);
        assert_eq!(tiger_month_stem(Stem::Ji), Stem::Bing);
        assert_eq!(tiger_month_stem(Stem::Yi), Stem::Wu);
        assert_eq!(tiger_month_stem(Stem::Ding), Stem::Ren);
        assert_eq!(tiger_month_stem(Stem::Gui), Stem::Jia);
    }

    #[test]
    fn rat_rule() {
        assert_eq!(rat_hour_stem(Stem::Jia), Stem::Jia);
        assert_eq!(rat_hour_stem(Stem::Geng), Stem::Bing);
        assert_eq!(rat_hour_stem(Stem::Xin), Stem::Wu);
        assert_eq!(rat_hour_stem(Stem::Ren), Stem::Geng);
        assert_eq!(rat_hour_stem(Stem::Gui), Stem::Ren);
    }

    #[test]
    fn month_pillars_of_2024() {
        // 甲辰 year: 寅 month is 丙寅, 子 month is 丙子, January carries 乙丑.
        let names: Vec<String> = (1..=12)
            .map(|m| month_pillar(2024, m).unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "乙丑", "丙寅", "丁卯", "戊辰", "己巳", "庚午", "辛未", "壬申", "癸酉", "甲戌",
                "乙亥", "丙子"
            ]
        );
    }

    #[test]
    fn month_pillars_always_pair() {
        for year in 1900..2100 {
            for month in 1..=12 {
                assert!(month_pillar(year, month).is_ok(), "{year}-{month}");
            }
        }
    }

    #[test]
    fn month_pillar_rejects_out_of_range_month() {
        for month in [0, 13, 99] {
            assert!(matches!(month_pillar(2024, month), Err(BaziError::InvalidDate(_))));
        }
    }

    #[test]
    fn double_hour_blocks() {
        assert_eq!(hour_branch_index(hm(23, 0)), 0);
        assert_eq!(hour_branch_index(hm(0, 59)), 0);
        assert_eq!(hour_branch_index(hm(1, 0)), 1);
        assert_eq!(hour_branch_index(hm(8, 30)), 4);
        assert_eq!(hour_branch_index(hm(11, 59)), 5);
        assert_eq!(hour_branch_index(hm(12, 0)), 6);
        assert_eq!(hour_branch_index(hm(22, 59)), 11);
    }

    #[test]
    fn late_rat_same_day_vs_next_day() {
        let m = CivilDateTime::from_parts(2024, 2, 10, 23, 30, 8.0).unwrap();
        let same = compute_four_pillars(&m, LateRat::SameDay).unwrap();
        let next = compute_four_pillars(&m, LateRat::NextDay).unwrap();
        assert_eq!(same.hour.branch(), Branch::Zi);
        assert_eq!(next.hour.branch(), Branch::Zi);
        assert_eq!(same.day.to_string(), "甲辰");
        assert_eq!(next.day.to_string(), "乙巳");
        assert_eq!(same.hour.to_string(), "甲子");
        assert_eq!(next.hour.to_string(), "丙子");
        assert_eq!(same.year, next.year);
        assert_eq!(same.month, next.month);
    }

    #[test]
    fn next_day_convention_ignores_other_hours() {
        let m = CivilDateTime::from_parts(2024, 2, 10, 22, 59, 8.0).unwrap();
        assert_eq!(
            compute_four_pillars(&m, LateRat::SameDay).unwrap(),
            compute_four_pillars(&m, LateRat::NextDay).unwrap()
        );
    }

    #[test]
    fn invalid_inputs() {
        assert!(matches!(
            four_pillars(2024, 2, 30, 12, 0, 8.0),
            Err(BaziError::InvalidDate(_))
        ));
        assert!(matches!(
            four_pillars(2024, 2, 10, 24, 0, 8.0),
            Err(BaziError::InvalidTime(_))
        ));
        assert!(matches!(
            four_pillars(2024, 2, 10, 12, 60, 8.0),
            Err(BaziError::InvalidTime(_))
        ));
        assert!(matches!(
            four_pillars(2024, 2, 10, 12, 0, 8.2),
            Err(BaziError::InvalidTime(_))
        ));
    }
}
