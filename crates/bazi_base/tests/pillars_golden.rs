//! Integration tests for the pillar calculator against almanac dates.

use bazi_base::{
    BaziError, Branch, CYCLE_LEN, LateRat, NAYIN_TABLE, Pillar, compute_four_pillars, day_pillar,
    four_pillars, nayin_of, pair_at,
};
use bazi_time::{CivilDate, CivilDateTime};

// ---------------------------------------------------------------------------
// Full charts
// ---------------------------------------------------------------------------

#[test]
fn beijing_olympics_opening() {
    let p = four_pillars(2008, 8, 8, 20, 0, 8.0).unwrap();
    assert_eq!(p.to_string(), "戊子 庚申 庚辰 丙戌");
    assert_eq!(p.year.nayin().name, "霹雳火");
    assert_eq!(p.day.nayin().name, "白蜡金");
}

#[test]
fn spring_festival_2024() {
    let p = four_pillars(2024, 2, 10, 12, 0, 8.0).unwrap();
    assert_eq!(p.to_string(), "甲辰 丙寅 甲辰 庚午");
}

#[test]
fn spring_1989_morning() {
    let p = four_pillars(1989, 3, 15, 8, 30, 8.0).unwrap();
    assert_eq!(p.to_string(), "己巳 丁卯 甲戌 戊辰");
}

// ---------------------------------------------------------------------------
// Day anchors
// ---------------------------------------------------------------------------

#[test]
fn day_anchors() {
    let cases = [
        ((1949, 10, 1), "甲子"),
        ((1949, 11, 29), "癸亥"),
        ((1949, 11, 30), "甲子"),
        ((2000, 1, 1), "戊午"),
    ];
    for ((y, m, d), expected) in cases {
        let date = CivilDate::new(y, m, d).unwrap();
        assert_eq!(day_pillar(date).to_string(), expected, "{date}");
    }
}

#[test]
fn consecutive_days_advance_one_step() {
    let mut date = CivilDate::new(1899, 12, 20).unwrap();
    for _ in 0..500 {
        let next = date.next_day();
        let a = day_pillar(date).cycle_index();
        let b = day_pillar(next).cycle_index();
        assert_eq!((a + 1) % CYCLE_LEN, b, "{date} → {next}");
        date = next;
    }
}

// ---------------------------------------------------------------------------
// Boundaries and errors
// ---------------------------------------------------------------------------

#[test]
fn rat_hour_straddles_midnight() {
    let late = four_pillars(2024, 2, 10, 23, 59, 8.0).unwrap();
    let early = four_pillars(2024, 2, 11, 0, 0, 8.0).unwrap();
    assert_eq!(late.hour.branch(), Branch::Zi);
    assert_eq!(early.hour.branch(), Branch::Zi);
    assert_ne!(late.day, early.day);
}

#[test]
fn next_day_convention_merges_the_rat_hour() {
    let late = CivilDateTime::from_parts(2024, 2, 10, 23, 59, 8.0).unwrap();
    let early = CivilDateTime::from_parts(2024, 2, 11, 0, 0, 8.0).unwrap();
    let late = compute_four_pillars(&late, LateRat::NextDay).unwrap();
    let early = compute_four_pillars(&early, LateRat::NextDay).unwrap();
    assert_eq!(late.day, early.day);
    assert_eq!(late.hour, early.hour);
}

#[test]
fn impossible_date_is_rejected() {
    let err = four_pillars(2024, 2, 30, 12, 0, 8.0).unwrap_err();
    assert!(matches!(err, BaziError::InvalidDate(_)));
    assert!(err.to_string().contains("2024-02-30"), "{err}");
}

#[test]
fn offset_out_of_range_is_invalid_time() {
    assert!(matches!(
        four_pillars(2024, 2, 10, 12, 0, 14.25),
        Err(BaziError::InvalidTime(_))
    ));
    assert!(four_pillars(2024, 2, 10, 12, 0, 5.75).is_ok());
    assert!(four_pillars(2024, 2, 10, 12, 0, -12.0).is_ok());
}

#[test]
fn stored_moment_with_impossible_components_never_reaches_the_calculator() {
    let good = CivilDateTime::from_parts(2008, 8, 8, 20, 0, 8.0).unwrap();
    let json = serde_json::to_string(&good).unwrap();
    let read: CivilDateTime = serde_json::from_str(&json).unwrap();
    let p = compute_four_pillars(&read, LateRat::SameDay).unwrap();
    assert_eq!(p.to_string(), "戊子 庚申 庚辰 丙戌");

    let cases: [&[(&str, &str)]; 4] = [
        &[("\"month\":8", "\"month\":2"), ("\"day\":8", "\"day\":30")],
        &[("\"month\":8", "\"month\":0")],
        &[("\"hour\":20", "\"hour\":99")],
        &[("\"quarter_hours\":32", "\"quarter_hours\":32000")],
    ];
    for edits in cases {
        let bad = edits.iter().fold(json.clone(), |acc, (from, to)| acc.replace(*from, *to));
        assert_ne!(bad, json);
        assert!(serde_json::from_str::<CivilDateTime>(&bad).is_err(), "{bad}");
    }
}

#[test]
fn offset_is_recorded_not_applied() {
    let a = four_pillars(2024, 2, 10, 12, 0, 8.0).unwrap();
    let b = four_pillars(2024, 2, 10, 12, 0, -5.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn deterministic() {
    for _ in 0..3 {
        assert_eq!(
            four_pillars(1975, 6, 21, 14, 45, 1.0).unwrap(),
            four_pillars(1975, 6, 21, 14, 45, 1.0).unwrap()
        );
    }
}

// ---------------------------------------------------------------------------
// Cycle closure
// ---------------------------------------------------------------------------

#[test]
fn every_cycle_position_has_a_nayin() {
    for n in 0..i64::from(CYCLE_LEN) {
        let (stem, branch) = pair_at(n);
        let nayin = nayin_of(stem, branch).unwrap();
        assert_eq!(nayin, &NAYIN_TABLE[(n / 2) as usize]);
        assert_eq!(Pillar::new(stem, branch).unwrap().cycle_index() as i64, n);
    }
}

#[test]
fn chart_pillars_always_pair() {
    for year in [1800, 1900, 1949, 2000, 2024, 2100] {
        for month in 1..=12 {
            for hour in 0..24 {
                let p = four_pillars(year, month, 28, hour, 0, 0.0).unwrap();
                for (_, pillar) in p.iter() {
                    assert_eq!(pillar.stem().index() % 2, pillar.branch().index() % 2);
                }
            }
        }
    }
}
