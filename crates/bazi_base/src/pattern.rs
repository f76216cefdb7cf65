//! Structural pattern (格局) classification over the month pillar.

use serde::Serialize;

use crate::element::ElementRelation;
use crate::pillar::FourPillars;
use crate::stem::Stem;

/// The four recognized patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// 正格
    Standard,
    /// 从杀格
    FollowKilling,
    /// 从财格
    FollowWealth,
    /// 从伤格
    FollowOutput,
}

impl PatternKind {
    pub const fn hanzi(self) -> &'static str {
        match self {
            Self::Standard => "正格",
            Self::FollowKilling => "从杀格",
            Self::FollowWealth => "从财格",
            Self::FollowOutput => "从伤格",
        }
    }

    pub const fn strength(self) -> PatternStrength {
        match self {
            Self::Standard => PatternStrength::Medium,
            _ => PatternStrength::Strong,
        }
    }

    pub const fn quality(self) -> PatternQuality {
        match self {
            Self::FollowKilling | Self::FollowWealth => PatternQuality::Excellent,
            Self::FollowOutput | Self::Standard => PatternQuality::Good,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Standard => {
                "A balanced chart: the day master stands on its own and draws on every element in turn."
            }
            Self::FollowKilling => {
                "The month sits on a cardinal branch; the chart yields to authority and thrives under pressure."
            }
            Self::FollowWealth => {
                "The month stem is wealth to the day master; the chart follows resources and opportunity."
            }
            Self::FollowOutput => {
                "The month stem is output of the day master; the chart follows expression and craft."
            }
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanzi())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternStrength {
    Strong,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternQuality {
    Excellent,
    Good,
}

/// A classified pattern with its fixed attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub strength: PatternStrength,
    pub quality: PatternQuality,
    pub description: &'static str,
}

impl From<PatternKind> for Pattern {
    fn from(kind: PatternKind) -> Self {
        Self {
            kind,
            strength: kind.strength(),
            quality: kind.quality(),
            description: kind.description(),
        }
    }
}

/// Classify the chart. First match wins:
///
/// 1. month branch is 子, 午, 卯 or 酉 → 从杀格
/// 2. month stem is wealth to the day master → 从财格
/// 3. month stem is output of the day master → 从伤格
/// 4. otherwise → 正格
pub fn compute_pattern(pillars: &FourPillars, day_master: Stem) -> Pattern {
    let month = &pillars.month;
    let kind = if month.branch().is_cardinal() {
        PatternKind::FollowKilling
    } else {
        match day_master.element().relation_to(month.stem().element()) {
            ElementRelation::Wealth => PatternKind::FollowWealth,
            ElementRelation::Output => PatternKind::FollowOutput,
            _ => PatternKind::Standard,
        }
    };
    Pattern::from(kind)
}
