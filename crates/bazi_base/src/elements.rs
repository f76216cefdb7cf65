//! Five-elements aggregation: weighted element tally → percentages → tiers.

use serde::Serialize;

use crate::config::{AnalysisConfig, TierThresholds};
use crate::element::{ALL_ELEMENTS, Element};
use crate::pillar::FourPillars;

/// Qualitative strength tier of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Strong,
    Medium,
    Weak,
}

impl Tier {
    pub fn classify(strength: f64, thresholds: &TierThresholds) -> Self {
        if strength >= thresholds.strong {
            Self::Strong
        } else if strength >= thresholds.medium {
            Self::Medium
        } else {
            Self::Weak
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Medium => "medium",
            Self::Weak => "weak",
        }
    }
}

/// Strength of one element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementStrength {
    pub element: Element,
    /// Percentage of the total tally (0-100).
    pub strength: f64,
    pub tier: Tier,
}

/// Strength of all five elements; strengths sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementProfile {
    entries: [ElementStrength; 5],
}

impl ElementProfile {
    pub fn get(&self, element: Element) -> &ElementStrength {
        &self.entries[element.index() as usize]
    }

    /// Entries in productive-cycle order.
    pub fn entries(&self) -> &[ElementStrength; 5] {
        &self.entries
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.strength).sum()
    }

    /// Element with the highest strength (first in cycle order on ties).
    pub fn strongest(&self) -> Element {
        let mut best = &self.entries[0];
        for e in &self.entries[1..] {
            if e.strength > best.strength {
                best = e;
            }
        }
        best.element
    }

    /// Element with the lowest strength (first in cycle order on ties).
    pub fn weakest(&self) -> Element {
        let mut worst = &self.entries[0];
        for e in &self.entries[1..] {
            if e.strength < worst.strength {
                worst = e;
            }
        }
        worst.element
    }

    /// Elements with no contribution at all.
    pub fn missing(&self) -> Vec<Element> {
        self.entries
            .iter()
            .filter(|e| e.strength == 0.0)
            .map(|e| e.element)
            .collect()
    }
}

/// Aggregate the weighted element tally of all four pillars into a profile.
///
/// A validated config has a positive stem or branch weight, which keeps the
/// total non-zero.
pub fn compute_element_profile(pillars: &FourPillars, config: &AnalysisConfig) -> ElementProfile {
    let thresholds = &config.tiers;
    let tally = pillars.element_weight(&config.element_weights);
    let total: f64 = tally.iter().sum();
    let entries = ALL_ELEMENTS.map(|element| {
        let raw = tally[element.index() as usize];
        let strength = if total > 0.0 { raw / total * 100.0 } else { 0.0 };
        ElementStrength {
            element,
            strength,
            tier: Tier::classify(strength, thresholds),
        }
    });
    ElementProfile { entries }
}
