//! Analysis configuration.
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! yields the standard analysis.

use serde::{Deserialize, Serialize};

use crate::error::BaziError;

/// Contribution of each pillar component to the element tally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementWeights {
    /// Weight of the pillar's stem element.
    pub stem: f64,
    /// Weight of the branch's primary element (off by default).
    pub branch: f64,
    /// Weight of each hidden stem's element.
    pub hidden: f64,
}

impl Default for ElementWeights {
    fn default() -> Self {
        Self {
            stem: 1.0,
            branch: 0.0,
            hidden: 0.3,
        }
    }
}

/// Percentage thresholds for element strength tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    /// At or above: strong.
    pub strong: f64,
    /// At or above (and below `strong`): medium.
    pub medium: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            strong: 30.0,
            medium: 15.0,
        }
    }
}

/// Polarity tie-break for Ten-Gods labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Same polarity as the day master gives the proper variant
    /// (正印, 正财, 正官, 食神, 比肩).
    #[default]
    SamePolarityProper,
    /// Classical Ziping: opposite polarity gives 正印, 正财, 正官;
    /// same polarity gives 食神 and 比肩.
    Classical,
}

/// Which civil day the 23:00-23:59 double-hour belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateRat {
    /// Day pillar stays on the civil date.
    #[default]
    SameDay,
    /// Day pillar (and hour stem) advance to the following day.
    NextDay,
}

/// Top-level analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub element_weights: ElementWeights,
    pub tiers: TierThresholds,
    pub tie_break: TieBreak,
    pub late_rat: LateRat,
    /// Number of decade-cycle pillars to emit.
    pub decade_count: u8,
}

impl AnalysisConfig {
    /// Maximum decade pillars (120 years).
    pub const MAX_DECADES: u8 = 12;

    pub fn validate(&self) -> Result<(), BaziError> {
        let w = &self.element_weights;
        for (name, v) in [("stem", w.stem), ("branch", w.branch), ("hidden", w.hidden)] {
            if !v.is_finite() || v < 0.0 {
                return Err(BaziError::InvalidConfig(format!(
                    "element_weights.{name} must be a finite non-negative number, got {v}"
                )));
            }
        }
        if w.stem + w.branch <= 0.0 {
            return Err(BaziError::InvalidConfig(
                "element_weights.stem and element_weights.branch cannot both be zero".into(),
            ));
        }
        let t = &self.tiers;
        if !(0.0..=100.0).contains(&t.medium) || !(0.0..=100.0).contains(&t.strong) {
            return Err(BaziError::InvalidConfig(
                "tier thresholds must lie within 0..=100".into(),
            ));
        }
        if t.medium > t.strong {
            return Err(BaziError::InvalidConfig(format!(
                "tiers.medium ({}) exceeds tiers.strong ({})",
                t.medium, t.strong
            )));
        }
        if self.decade_count == 0 || self.decade_count > Self::MAX_DECADES {
            return Err(BaziError::InvalidConfig(format!(
                "decade_count must be within 1..={}, got {}",
                Self::MAX_DECADES,
                self.decade_count
            )));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            element_weights: ElementWeights::default(),
            tiers: TierThresholds::default(),
            tie_break: TieBreak::default(),
            late_rat: LateRat::default(),
            decade_count: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_all_zero_manifest_weights() {
        let mut cfg = AnalysisConfig::default();
        cfg.element_weights.stem = 0.0;
        assert!(matches!(cfg.validate(), Err(BaziError::InvalidConfig(_))));
        cfg.element_weights.branch = 1.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_negative_and_nan_weights() {
        let mut cfg = AnalysisConfig::default();
        cfg.element_weights.hidden = -0.1;
        assert!(cfg.validate().is_err());
        cfg.element_weights.hidden = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_inverted_tiers() {
        let mut cfg = AnalysisConfig::default();
        cfg.tiers.medium = 40.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_decade_count_out_of_range() {
        let mut cfg = AnalysisConfig::default();
        cfg.decade_count = 0;
        assert!(cfg.validate().is_err());
        cfg.decade_count = 13;
        assert!(cfg.validate().is_err());
    }
}
