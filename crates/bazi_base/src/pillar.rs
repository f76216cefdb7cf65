//! Pillar (柱) and FourPillars (四柱) value types.

use serde::Serialize;

use crate::branch::Branch;
use crate::config::ElementWeights;
use crate::element::ALL_ELEMENTS;
use crate::error::BaziError;
use crate::sexagenary::{CYCLE_LEN, NAYIN_TABLE, Nayin, pair_at, sexagenary_index};
use crate::stem::Stem;

/// One stem-branch pair with its Nayin.
///
/// Only the two constructors build a pillar, so the pair always has matching
/// parity and `index` is its position in the 60-cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pillar {
    #[serde(skip)]
    index: u8,
    stem: Stem,
    branch: Branch,
    nayin: &'static Nayin,
}

impl Pillar {
    /// Validated constructor; fails with `InvalidPairing` on a parity mismatch.
    pub fn new(stem: Stem, branch: Branch) -> Result<Self, BaziError> {
        let index = sexagenary_index(stem, branch)?;
        Ok(Self {
            index,
            stem,
            branch,
            nayin: &NAYIN_TABLE[usize::from(index / 2)],
        })
    }

    /// Pillar at a 60-cycle position, wrapping.
    pub fn from_cycle_index(index: i64) -> Self {
        let (stem, branch) = pair_at(index);
        let n = index.rem_euclid(i64::from(CYCLE_LEN)) as u8;
        Self {
            index: n,
            stem,
            branch,
            nayin: &NAYIN_TABLE[usize::from(n / 2)],
        }
    }

    pub const fn stem(&self) -> Stem {
        self.stem
    }

    pub const fn branch(&self) -> Branch {
        self.branch
    }

    pub const fn nayin(&self) -> &'static Nayin {
        self.nayin
    }

    /// Position in the 60-cycle (0 = 甲子).
    pub const fn cycle_index(&self) -> u8 {
        self.index
    }

    /// Pillar `steps` positions further along the 60-cycle.
    pub fn offset(&self, steps: i64) -> Self {
        Self::from_cycle_index(i64::from(self.cycle_index()) + steps)
    }

    pub fn hidden_stems(&self) -> &'static [Stem] {
        self.branch.hidden_stems()
    }

    /// Weighted element contribution, indexed by `Element::index()`.
    pub fn element_weight(&self, weights: &ElementWeights) -> [f64; 5] {
        let mut tally = [0.0; 5];
        tally[self.stem.element().index() as usize] += weights.stem;
        tally[self.branch.element().index() as usize] += weights.branch;
        for hidden in self.hidden_stems() {
            tally[hidden.element().index() as usize] += weights.hidden;
        }
        tally
    }

    /// Two-character name, e.g. 甲子.
    pub fn hanzi(&self) -> String {
        format!("{}{}", self.stem.hanzi(), self.branch.hanzi())
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem.hanzi(), self.branch.hanzi())
    }
}

/// Pillar at a 60-cycle position (0 = 甲子), wrapping in both directions.
pub fn pillar_at(index: i64) -> Pillar {
    Pillar::from_cycle_index(index)
}

/// Position of a pillar in the chart. The role is a narrative label only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarPosition {
    Year,
    Month,
    Day,
    Hour,
}

/// All 4 positions in chart order.
pub const ALL_POSITIONS: [PillarPosition; 4] = [
    PillarPosition::Year,
    PillarPosition::Month,
    PillarPosition::Day,
    PillarPosition::Hour,
];

impl PillarPosition {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }

    /// Life-domain role (宫位) used for narrative labeling.
    pub const fn role(self) -> &'static str {
        match self {
            Self::Year => "ancestry",
            Self::Month => "parents",
            Self::Day => "spouse",
            Self::Hour => "children",
        }
    }
}

/// The four pillars of a birth moment, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl FourPillars {
    pub fn new(year: Pillar, month: Pillar, day: Pillar, hour: Pillar) -> Self {
        Self {
            year,
            month,
            day,
            hour,
        }
    }

    /// Day stem (日主), the reference point for relational classification.
    pub fn day_master(&self) -> Stem {
        self.day.stem
    }

    pub fn get(&self, position: PillarPosition) -> &Pillar {
        match position {
            PillarPosition::Year => &self.year,
            PillarPosition::Month => &self.month,
            PillarPosition::Day => &self.day,
            PillarPosition::Hour => &self.hour,
        }
    }

    /// Pillars with their positions, in chart order.
    pub fn iter(&self) -> impl Iterator<Item = (PillarPosition, &Pillar)> + '_ {
        ALL_POSITIONS.into_iter().map(move |p| (p, self.get(p)))
    }

    /// Summed weighted element contribution of all four pillars.
    pub fn element_weight(&self, weights: &ElementWeights) -> [f64; 5] {
        let mut total = [0.0; 5];
        for (_, pillar) in self.iter() {
            let tally = pillar.element_weight(weights);
            for e in ALL_ELEMENTS {
                let i = e.index() as usize;
                total[i] += tally[i];
            }
        }
        total
    }
}

impl std::fmt::Display for FourPillars {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.year, self.month, self.day, self.hour)
    }
}
