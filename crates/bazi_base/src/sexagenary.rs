//! The 60-term stem-branch cycle (六十甲子) and its Nayin (纳音) sound elements.
//!
//! Stems and branches advance in lock-step, so only same-parity pairs occur
//! and the combined cycle has period 60. Consecutive pairs (甲子/乙丑,
//! 丙寅/丁卯, ...) share one Nayin, giving 30 Nayin entries.

use serde::Serialize;
use tracing::error;

use crate::branch::{Branch, branch_at};
use crate::element::Element;
use crate::error::BaziError;
use crate::stem::{Stem, stem_at};

/// Period of the stem-branch cycle.
pub const CYCLE_LEN: u8 = 60;

/// A Nayin sound element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Nayin {
    /// Chinese name, e.g. 海中金.
    pub name: &'static str,
    /// English gloss.
    pub gloss: &'static str,
    pub element: Element,
}

const fn ny(name: &'static str, gloss: &'static str, element: Element) -> Nayin {
    Nayin {
        name,
        gloss,
        element,
    }
}

/// Nayin table, one entry per consecutive pair of the 60-cycle.
pub static NAYIN_TABLE: [Nayin; 30] = [
    ny("海中金", "Gold in the Sea", Element::Metal),
    ny("炉中火", "Fire in the Furnace", Element::Fire),
    ny("大林木", "Wood of the Great Forest", Element::Wood),
    ny("路旁土", "Earth by the Roadside", Element::Earth),
    ny("剑锋金", "Metal of the Sword Edge", Element::Metal),
    ny("山头火", "Fire on the Mountain Top", Element::Fire),
    ny("涧下水", "Water in the Ravine", Element::Water),
    ny("城头土", "Earth on the City Wall", Element::Earth),
    ny("白蜡金", "White Wax Metal", Element::Metal),
    ny("杨柳木", "Willow Wood", Element::Wood),
    ny("泉中水", "Water in the Spring", Element::Water),
    ny("屋上土", "Earth on the Roof", Element::Earth),
    ny("霹雳火", "Thunderbolt Fire", Element::Fire),
    ny("松柏木", "Pine and Cypress Wood", Element::Wood),
    ny("长流水", "Long-flowing Water", Element::Water),
    ny("沙中金", "Gold in the Sand", Element::Metal),
    ny("山下火", "Fire at the Foot of the Mountain", Element::Fire),
    ny("平地木", "Wood of the Plain", Element::Wood),
    ny("壁上土", "Earth on the Wall", Element::Earth),
    ny("金箔金", "Gold Leaf", Element::Metal),
    ny("覆灯火", "Lamp Fire", Element::Fire),
    ny("天河水", "Water of the Heavenly River", Element::Water),
    ny("大驿土", "Earth of the Post Road", Element::Earth),
    ny("钗钏金", "Hairpin Metal", Element::Metal),
    ny("桑柘木", "Mulberry Wood", Element::Wood),
    ny("大溪水", "Water of the Great Stream", Element::Water),
    ny("沙中土", "Earth in the Sand", Element::Earth),
    ny("天上火", "Fire in the Sky", Element::Fire),
    ny("石榴木", "Pomegranate Wood", Element::Wood),
    ny("大海水", "Water of the Great Sea", Element::Water),
];

/// Position (0 = 甲子 .. 59 = 癸亥) of a stem-branch pair in the 60-cycle.
///
/// Fails with `InvalidPairing` when the parities differ.
pub fn sexagenary_index(stem: Stem, branch: Branch) -> Result<u8, BaziError> {
    let s = i64::from(stem.index());
    let b = i64::from(branch.index());
    if s % 2 != b % 2 {
        error!(
            stem = stem.hanzi(),
            branch = branch.hanzi(),
            "stem/branch parity mismatch; no such sexagenary pair"
        );
        return Err(BaziError::InvalidPairing { stem, branch });
    }
    // n ≡ s (mod 10) and n ≡ b (mod 12)
    Ok((6 * s - 5 * b).rem_euclid(i64::from(CYCLE_LEN)) as u8)
}

/// Stem and branch at a cycle position, wrapping modulo 60.
pub fn pair_at(index: i64) -> (Stem, Branch) {
    let n = index.rem_euclid(i64::from(CYCLE_LEN));
    (stem_at(n), branch_at(n))
}

/// Nayin of a stem-branch pair.
///
/// Fails with `InvalidPairing` when the parities differ.
pub fn nayin_of(stem: Stem, branch: Branch) -> Result<&'static Nayin, BaziError> {
    let n = sexagenary_index(stem, branch)?;
    Ok(&NAYIN_TABLE[usize::from(n / 2)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::ALL_BRANCHES;
    use crate::stem::ALL_STEMS;

    #[test]
    fn pairing_succeeds_iff_parity_matches() {
        for s in ALL_STEMS {
            for b in ALL_BRANCHES {
                let same = s.index() % 2 == b.index() % 2;
                let r = nayin_of(s, b);
                assert_eq!(r.is_ok(), same, "{}{}", s.hanzi(), b.hanzi());
                if !same {
                    assert_eq!(r.unwrap_err(), BaziError::InvalidPairing { stem: s, branch: b });
                }
            }
        }
    }

    #[test]
    fn index_round_trips_through_pair_at() {
        for n in 0..60 {
            let (s, b) = pair_at(n);
            assert_eq!(i64::from(sexagenary_index(s, b).unwrap()), n);
        }
    }

    #[test]
    fn known_positions() {
        assert_eq!(sexagenary_index(Stem::Jia, Branch::Zi).unwrap(), 0);
        assert_eq!(sexagenary_index(Stem::Jia, Branch::Xu).unwrap(), 10);
        assert_eq!(sexagenary_index(Stem::Wu, Branch::Wu).unwrap(), 54);
        assert_eq!(sexagenary_index(Stem::Gui, Branch::Hai).unwrap(), 59);
    }

    #[test]
    fn known_nayin() {
        assert_eq!(nayin_of(Stem::Jia, Branch::Zi).unwrap().name, "海中金");
        assert_eq!(nayin_of(Stem::Yi, Branch::Chou).unwrap().name, "海中金");
        assert_eq!(nayin_of(Stem::Wu, Branch::Zi).unwrap().name, "霹雳火");
        assert_eq!(nayin_of(Stem::Ji, Branch::Si).unwrap().name, "大林木");
        assert_eq!(nayin_of(Stem::Geng, Branch::Chen).unwrap().name, "白蜡金");
        assert_eq!(nayin_of(Stem::Gui, Branch::Hai).unwrap().name, "大海水");
    }

    #[test]
    fn nayin_elements_evenly_distributed() {
        let mut counts = [0u8; 5];
        for n in &NAYIN_TABLE {
            counts[n.element.index() as usize] += 1;
        }
        assert_eq!(counts, [6, 6, 6, 6, 6]);
    }
}
