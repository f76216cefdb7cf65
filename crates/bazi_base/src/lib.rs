//! Four Pillars (八字) computation built on civil calendar primitives.
//!
//! This crate provides:
//! - Stem, branch, element, hidden-stem and Nayin tables
//! - The pillar calculator (civil birth moment → four pillars)
//! - Five-elements aggregation, Ten-Gods classification, pattern selection
//! - The decade cycle (大运)
//! - `AnalysisConfig`, the serde-loadable analysis settings
//!
//! Month and year boundaries follow the civil-month approximation documented
//! in [`calculator`]; everything here is pure and deterministic.

pub mod branch;
pub mod calculator;
pub mod config;
pub mod decade;
pub mod element;
pub mod elements;
pub mod error;
pub mod pattern;
pub mod pillar;
pub mod sexagenary;
pub mod stem;
pub mod ten_gods;

pub use branch::{ALL_BRANCHES, Branch, branch_at, hidden_stems_of};
pub use calculator::{
    compute_four_pillars, day_pillar, four_pillars, hour_pillar, month_pillar, year_pillar,
};
pub use config::{AnalysisConfig, ElementWeights, LateRat, TieBreak, TierThresholds};
pub use decade::{DecadeCycle, DecadeDirection, DecadePillar, compute_decade_cycle};
pub use element::{ALL_ELEMENTS, ALL_RELATIONS, Element, ElementRelation, Polarity};
pub use elements::{ElementProfile, ElementStrength, Tier, compute_element_profile};
pub use error::BaziError;
pub use pattern::{Pattern, PatternKind, PatternQuality, PatternStrength, compute_pattern};
pub use pillar::{ALL_POSITIONS, FourPillars, Pillar, PillarPosition, pillar_at};
pub use sexagenary::{CYCLE_LEN, NAYIN_TABLE, Nayin, nayin_of, pair_at, sexagenary_index};
pub use stem::{ALL_STEMS, Stem, stem_at};
pub use ten_gods::{
    CategoryGods, Gender, HiddenStemGod, PositionLabel, TenGod, TenGodAssignment, classify_stem,
    compute_ten_gods,
};
