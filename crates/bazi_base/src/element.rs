//! Five elements (五行), yin/yang polarity, and the elemental cycles.
//!
//! Productive cycle: wood → fire → earth → metal → water → wood.
//! Controlling cycle: each element controls the one two steps ahead
//! in the productive cycle (wood → earth → water → fire → metal → wood).

use serde::Serialize;

/// The five elements in productive-cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All 5 elements in productive-cycle order (index 0 = Wood).
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    /// 0-based index in the productive cycle (Wood=0 .. Water=4).
    pub const fn index(self) -> u8 {
        match self {
            Self::Wood => 0,
            Self::Fire => 1,
            Self::Earth => 2,
            Self::Metal => 3,
            Self::Water => 4,
        }
    }

    /// Element at a productive-cycle index, wrapping modulo 5.
    pub fn from_index(i: i64) -> Self {
        ALL_ELEMENTS[i.rem_euclid(5) as usize]
    }

    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Fire => "fire",
            Self::Earth => "earth",
            Self::Metal => "metal",
            Self::Water => "water",
        }
    }

    /// Chinese name.
    pub const fn hanzi(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }

    /// The element this one produces.
    pub fn generates(self) -> Self {
        Self::from_index(i64::from(self.index()) + 1)
    }

    /// The element this one controls.
    pub fn controls(self) -> Self {
        Self::from_index(i64::from(self.index()) + 2)
    }

    /// Relation of `other` as seen from `self`.
    pub fn relation_to(self, other: Element) -> ElementRelation {
        let diff = (i64::from(other.index()) - i64::from(self.index())).rem_euclid(5);
        match diff {
            0 => ElementRelation::Companion,
            1 => ElementRelation::Output,
            2 => ElementRelation::Wealth,
            3 => ElementRelation::Authority,
            _ => ElementRelation::Resource,
        }
    }
}

/// How another element relates to a reference element (usually the day master's).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementRelation {
    /// Same element.
    Companion,
    /// Generated by the reference element.
    Output,
    /// Controlled by the reference element.
    Wealth,
    /// Controls the reference element.
    Authority,
    /// Generates the reference element.
    Resource,
}

/// All 5 relations, from the reference element outward.
pub const ALL_RELATIONS: [ElementRelation; 5] = [
    ElementRelation::Companion,
    ElementRelation::Output,
    ElementRelation::Wealth,
    ElementRelation::Authority,
    ElementRelation::Resource,
];

/// Yin/yang polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    /// Even cycle index = yang, odd = yin.
    pub const fn from_index(i: u8) -> Self {
        if i % 2 == 0 { Self::Yang } else { Self::Yin }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Yang => "yang",
            Self::Yin => "yin",
        }
    }
}
