//! Decade cycle (大运): ten-year luck pillars stepping from the month pillar.
//!
//! Direction follows the year stem's polarity and gender. The start age is
//! the distance from birth to the adjacent month boundary (the civil-month
//! approximation used by the calculator) at three days per year, i.e. six
//! hours per month.

use bazi_time::{CivilDate, CivilDateTime, ClockTime, minutes_between};
use serde::Serialize;
use tracing::debug;

use crate::element::Polarity;
use crate::pillar::{FourPillars, Pillar};
use crate::ten_gods::Gender;

/// Minutes of birth-to-boundary distance per month of start age.
pub const MINUTES_PER_MONTH_OF_AGE: i64 = 360;

/// Years covered by one decade pillar.
pub const DECADE_YEARS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecadeDirection {
    Forward,
    Backward,
}

impl DecadeDirection {
    /// Forward for a yang year and male, or a yin year and female.
    pub fn of(year_polarity: Polarity, gender: Gender) -> Self {
        match (year_polarity, gender) {
            (Polarity::Yang, Gender::Male) | (Polarity::Yin, Gender::Female) => Self::Forward,
            _ => Self::Backward,
        }
    }

    pub const fn step(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

/// One decade of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecadePillar {
    /// 1-based position in the cycle.
    pub ordinal: u8,
    pub pillar: Pillar,
    /// Age in whole years when this decade begins.
    pub start_age: u32,
    /// First civil day of the decade: birth date plus the start-age offset,
    /// day clamped to the month length.
    pub start: CivilDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecadeCycle {
    pub birth: CivilDate,
    pub direction: DecadeDirection,
    pub start_age_years: u32,
    pub start_age_months: u32,
    pub pillars: Vec<DecadePillar>,
    /// Day after the last decade ends.
    pub end: CivilDate,
}

impl DecadeCycle {
    /// Decade in effect on `today`: the last one starting on or before it.
    /// `None` before the first decade begins and from `end` on.
    pub fn current(&self, today: CivilDate) -> Option<&DecadePillar> {
        if today >= self.end {
            return None;
        }
        self.pillars.iter().rev().find(|d| d.start <= today)
    }
}

/// Compute `count` decade pillars for a birth moment.
pub fn compute_decade_cycle(
    birth: &CivilDateTime,
    pillars: &FourPillars,
    gender: Gender,
    count: u8,
) -> DecadeCycle {
    let direction = DecadeDirection::of(pillars.year.stem().polarity(), gender);
    let birth_date = birth.date();
    let boundary_date = match direction {
        DecadeDirection::Forward => birth_date.first_of_next_month(),
        DecadeDirection::Backward => birth_date.first_of_month(),
    };
    let boundary = CivilDateTime::new(boundary_date, ClockTime::MIDNIGHT, birth.offset());
    let distance = minutes_between(*birth, boundary).abs();
    let offset_months = u32::try_from(distance / MINUTES_PER_MONTH_OF_AGE).unwrap_or(u32::MAX);
    let start_age_years = offset_months / 12;
    let start_age_months = offset_months % 12;
    let start_of = |decade: u32| {
        birth_date.add_months(i64::from(offset_months) + i64::from(decade * DECADE_YEARS * 12))
    };

    let decades: Vec<DecadePillar> = (1..=count)
        .map(|ordinal| {
            let decade = u32::from(ordinal - 1);
            DecadePillar {
                ordinal,
                pillar: pillars.month.offset(direction.step() * i64::from(ordinal)),
                start_age: start_age_years + decade * DECADE_YEARS,
                start: start_of(decade),
            }
        })
        .collect();

    debug!(
        direction = direction.name(),
        start_age_years,
        start_age_months,
        count = decades.len(),
        "computed decade cycle"
    );
    DecadeCycle {
        birth: birth_date,
        direction,
        start_age_years,
        start_age_months,
        pillars: decades,
        end: start_of(u32::from(count)),
    }
}
