//! Ten Gods (十神): the relation of each stem to the day master.
//!
//! The element relation picks one of five categories; polarity picks the
//! variant within the category, per the configured `TieBreak`.

use serde::Serialize;

use crate::config::TieBreak;
use crate::element::{ALL_RELATIONS, ElementRelation};
use crate::pillar::{ALL_POSITIONS, FourPillars, PillarPosition};
use crate::stem::Stem;

/// Subject gender. Drives decade-cycle direction and narrative selection;
/// Ten-Gods classification ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" | "男" => Ok(Self::Male),
            "female" | "f" | "女" => Ok(Self::Female),
            _ => Err(format!("invalid gender: {s} (male or female)")),
        }
    }
}

/// One of the ten relational labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TenGod {
    /// 正印
    DirectResource,
    /// 偏印
    IndirectResource,
    /// 正财
    DirectWealth,
    /// 偏财
    IndirectWealth,
    /// 正官
    DirectOfficer,
    /// 七杀
    SevenKillings,
    /// 食神
    EatingGod,
    /// 伤官
    HurtingOfficer,
    /// 比肩
    Friend,
    /// 劫财
    RobWealth,
}

impl TenGod {
    /// Label for a relation category and variant.
    pub const fn of(relation: ElementRelation, proper: bool) -> Self {
        match (relation, proper) {
            (ElementRelation::Resource, true) => Self::DirectResource,
            (ElementRelation::Resource, false) => Self::IndirectResource,
            (ElementRelation::Wealth, true) => Self::DirectWealth,
            (ElementRelation::Wealth, false) => Self::IndirectWealth,
            (ElementRelation::Authority, true) => Self::DirectOfficer,
            (ElementRelation::Authority, false) => Self::SevenKillings,
            (ElementRelation::Output, true) => Self::EatingGod,
            (ElementRelation::Output, false) => Self::HurtingOfficer,
            (ElementRelation::Companion, true) => Self::Friend,
            (ElementRelation::Companion, false) => Self::RobWealth,
        }
    }

    pub const fn hanzi(self) -> &'static str {
        match self {
            Self::DirectResource => "正印",
            Self::IndirectResource => "偏印",
            Self::DirectWealth => "正财",
            Self::IndirectWealth => "偏财",
            Self::DirectOfficer => "正官",
            Self::SevenKillings => "七杀",
            Self::EatingGod => "食神",
            Self::HurtingOfficer => "伤官",
            Self::Friend => "比肩",
            Self::RobWealth => "劫财",
        }
    }

    pub const fn category(self) -> ElementRelation {
        match self {
            Self::DirectResource | Self::IndirectResource => ElementRelation::Resource,
            Self::DirectWealth | Self::IndirectWealth => ElementRelation::Wealth,
            Self::DirectOfficer | Self::SevenKillings => ElementRelation::Authority,
            Self::EatingGod | Self::HurtingOfficer => ElementRelation::Output,
            Self::Friend | Self::RobWealth => ElementRelation::Companion,
        }
    }
}

impl std::fmt::Display for TenGod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanzi())
    }
}

/// Ten-God label of `stem` relative to `day_master`.
pub fn classify_stem(day_master: Stem, stem: Stem, tie_break: TieBreak) -> TenGod {
    let relation = day_master.element().relation_to(stem.element());
    let same = day_master.polarity() == stem.polarity();
    let proper = match tie_break {
        TieBreak::SamePolarityProper => same,
        TieBreak::Classical => match relation {
            ElementRelation::Output | ElementRelation::Companion => same,
            _ => !same,
        },
    };
    TenGod::of(relation, proper)
}

/// Ten-God label of one hidden stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HiddenStemGod {
    pub position: PillarPosition,
    pub stem: Stem,
    pub god: TenGod,
}

/// Display label of one pillar's stem; the day pillar reads "self".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositionLabel {
    pub position: PillarPosition,
    pub label: &'static str,
}

/// Deduplicated stem labels of one category, in chart order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGods {
    pub category: ElementRelation,
    pub gods: Vec<TenGod>,
}

/// Ten-God labels of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenGodAssignment {
    pub day_master: Stem,
    pub gender: Gender,
    pub year: TenGod,
    pub month: TenGod,
    pub hour: TenGod,
    /// One label per pillar, in chart order.
    pub labels: Vec<PositionLabel>,
    /// One entry per category, in `ALL_RELATIONS` order; empty when no stem
    /// falls in it.
    pub categories: Vec<CategoryGods>,
    /// Labels of every branch's hidden stems, in chart order.
    pub hidden: Vec<HiddenStemGod>,
}

impl TenGodAssignment {
    /// Label of the stem at `position`; `None` for the day pillar.
    pub fn get(&self, position: PillarPosition) -> Option<TenGod> {
        match position {
            PillarPosition::Year => Some(self.year),
            PillarPosition::Month => Some(self.month),
            PillarPosition::Day => None,
            PillarPosition::Hour => Some(self.hour),
        }
    }

    /// Display label at `position`; the day pillar is always "self".
    pub fn label(&self, position: PillarPosition) -> &'static str {
        self.get(position).map_or("self", TenGod::hanzi)
    }

    /// Deduplicated stem labels in `category`, in chart order.
    pub fn display(&self, category: ElementRelation) -> &[TenGod] {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.gods.as_slice())
            .unwrap_or_default()
    }
}

fn group_by_category(stems: [TenGod; 3]) -> Vec<CategoryGods> {
    ALL_RELATIONS
        .into_iter()
        .map(|category| {
            let mut gods = Vec::new();
            for god in stems {
                if god.category() == category && !gods.contains(&god) {
                    gods.push(god);
                }
            }
            CategoryGods { category, gods }
        })
        .collect()
}

/// Classify the year, month, and hour stems (and all hidden stems)
/// against `day_master`.
pub fn compute_ten_gods(
    pillars: &FourPillars,
    day_master: Stem,
    gender: Gender,
    tie_break: TieBreak,
) -> TenGodAssignment {
    let classify = |stem| classify_stem(day_master, stem, tie_break);
    let hidden = pillars
        .iter()
        .flat_map(|(position, pillar)| {
            pillar.hidden_stems().iter().map(move |&stem| HiddenStemGod {
                position,
                stem,
                god: classify(stem),
            })
        })
        .collect();
    let year = classify(pillars.year.stem());
    let month = classify(pillars.month.stem());
    let hour = classify(pillars.hour.stem());
    let mut assignment = TenGodAssignment {
        day_master,
        gender,
        year,
        month,
        hour,
        labels: Vec::new(),
        categories: group_by_category([year, month, hour]),
        hidden,
    };
    assignment.labels = ALL_POSITIONS
        .into_iter()
        .map(|position| PositionLabel {
            position,
            label: assignment.label(position),
        })
        .collect();
    assignment
}
