//! Integration tests for chart analysis: elements, Ten Gods, pattern, config.

use bazi_base::{
    AnalysisConfig, Element, ElementRelation, Gender, LateRat, PatternKind, PillarPosition,
    TenGod, TieBreak, Tier, compute_element_profile, compute_pattern, compute_ten_gods,
    four_pillars,
};

#[test]
fn olympic_chart_analysis() {
    let p = four_pillars(2008, 8, 8, 20, 0, 8.0).unwrap();
    let config = AnalysisConfig::default();

    let profile = compute_element_profile(&p, &config);
    assert_eq!(profile.get(Element::Metal).tier, Tier::Strong);
    assert_eq!(profile.get(Element::Fire).tier, Tier::Medium);
    assert_eq!(profile.get(Element::Earth).tier, Tier::Medium);
    assert_eq!(profile.get(Element::Wood).tier, Tier::Weak);
    assert_eq!(profile.get(Element::Water).tier, Tier::Weak);

    let gods = compute_ten_gods(&p, p.day_master(), Gender::Male, config.tie_break);
    assert_eq!(gods.get(PillarPosition::Year), Some(TenGod::DirectResource));
    assert_eq!(gods.get(PillarPosition::Month), Some(TenGod::Friend));
    assert_eq!(gods.get(PillarPosition::Day), None);
    assert_eq!(gods.get(PillarPosition::Hour), Some(TenGod::DirectOfficer));

    assert_eq!(compute_pattern(&p, p.day_master()).kind, PatternKind::Standard);
}

#[test]
fn classical_tie_break_flips_opposite_categories() {
    let p = four_pillars(2008, 8, 8, 20, 0, 8.0).unwrap();
    let gods = compute_ten_gods(&p, p.day_master(), Gender::Male, TieBreak::Classical);
    assert_eq!(gods.year, TenGod::IndirectResource);
    assert_eq!(gods.month, TenGod::Friend);
    assert_eq!(gods.hour, TenGod::SevenKillings);
}

#[test]
fn day_master_is_never_labeled() {
    for (y, m, d) in [(1989, 3, 15), (2008, 8, 8), (2024, 2, 10), (1955, 11, 2)] {
        let p = four_pillars(y, m, d, 10, 0, 8.0).unwrap();
        let gods = compute_ten_gods(&p, p.day_master(), Gender::Female, TieBreak::default());
        assert_eq!(gods.label(PillarPosition::Day), "self");
        let listed: usize = [
            ElementRelation::Companion,
            ElementRelation::Output,
            ElementRelation::Wealth,
            ElementRelation::Authority,
            ElementRelation::Resource,
        ]
        .iter()
        .map(|c| gods.display(*c).len())
        .sum();
        assert!((1..=3).contains(&listed));
    }
}

#[test]
fn pattern_golden() {
    let p = four_pillars(1989, 3, 15, 8, 30, 8.0).unwrap();
    assert_eq!(compute_pattern(&p, p.day_master()).kind, PatternKind::FollowKilling);
    let p = four_pillars(2024, 2, 10, 12, 0, 8.0).unwrap();
    assert_eq!(compute_pattern(&p, p.day_master()).kind, PatternKind::FollowOutput);
}

#[test]
fn config_from_partial_toml() {
    let config: AnalysisConfig = toml::from_str(
        r#"
        tie_break = "classical"
        late_rat = "next_day"

        [element_weights]
        branch = 0.5
        "#,
    )
    .unwrap();
    assert_eq!(config.tie_break, TieBreak::Classical);
    assert_eq!(config.late_rat, LateRat::NextDay);
    assert_eq!(config.element_weights.stem, 1.0);
    assert_eq!(config.element_weights.branch, 0.5);
    assert_eq!(config.element_weights.hidden, 0.3);
    assert_eq!(config.tiers.strong, 30.0);
    assert_eq!(config.decade_count, 8);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_toml_is_default() {
    let config: AnalysisConfig = toml::from_str("").unwrap();
    assert_eq!(config, AnalysisConfig::default());
}

#[test]
fn unknown_tie_break_is_rejected() {
    assert!(toml::from_str::<AnalysisConfig>("tie_break = \"sideways\"").is_err());
}

#[test]
fn chart_serializes_to_json() {
    let p = four_pillars(2008, 8, 8, 20, 0, 8.0).unwrap();
    let json = serde_json::to_value(p).unwrap();
    assert_eq!(json["year"]["stem"], "Wu");
    assert_eq!(json["year"]["branch"], "Zi");
    assert_eq!(json["year"]["nayin"]["name"], "霹雳火");
    let pattern = serde_json::to_value(compute_pattern(&p, p.day_master())).unwrap();
    assert_eq!(pattern["kind"], "standard");
    assert_eq!(pattern["strength"], "medium");
}
