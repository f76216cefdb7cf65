//! The twelve earthly branches (地支) and their hidden stems.
//!
//! Hidden stems (藏干) follow the standard table, main qi first.

use serde::Serialize;

use crate::element::{Element, Polarity};
use crate::stem::Stem;

/// The 12 branches starting from Zi (子).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All 12 branches in order (0 = Zi, 11 = Hai).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

impl Branch {
    /// Chinese character.
    pub const fn hanzi(self) -> &'static str {
        match self {
            Self::Zi => "子",
            Self::Chou => "丑",
            Self::Yin => "寅",
            Self::Mao => "卯",
            Self::Chen => "辰",
            Self::Si => "巳",
            Self::Wu => "午",
            Self::Wei => "未",
            Self::Shen => "申",
            Self::You => "酉",
            Self::Xu => "戌",
            Self::Hai => "亥",
        }
    }

    /// Pinyin name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zi => "Zi",
            Self::Chou => "Chou",
            Self::Yin => "Yin",
            Self::Mao => "Mao",
            Self::Chen => "Chen",
            Self::Si => "Si",
            Self::Wu => "Wu",
            Self::Wei => "Wei",
            Self::Shen => "Shen",
            Self::You => "You",
            Self::Xu => "Xu",
            Self::Hai => "Hai",
        }
    }

    /// Zodiac animal (生肖).
    pub const fn animal(self) -> &'static str {
        match self {
            Self::Zi => "Rat",
            Self::Chou => "Ox",
            Self::Yin => "Tiger",
            Self::Mao => "Rabbit",
            Self::Chen => "Dragon",
            Self::Si => "Snake",
            Self::Wu => "Horse",
            Self::Wei => "Goat",
            Self::Shen => "Monkey",
            Self::You => "Rooster",
            Self::Xu => "Dog",
            Self::Hai => "Pig",
        }
    }

    /// 0-based index (Zi=0 .. Hai=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Zi => 0,
            Self::Chou => 1,
            Self::Yin => 2,
            Self::Mao => 3,
            Self::Chen => 4,
            Self::Si => 5,
            Self::Wu => 6,
            Self::Wei => 7,
            Self::Shen => 8,
            Self::You => 9,
            Self::Xu => 10,
            Self::Hai => 11,
        }
    }

    /// Primary element.
    pub const fn element(self) -> Element {
        match self {
            Self::Yin | Self::Mao => Element::Wood,
            Self::Si | Self::Wu => Element::Fire,
            Self::Chou | Self::Chen | Self::Wei | Self::Xu => Element::Earth,
            Self::Shen | Self::You => Element::Metal,
            Self::Hai | Self::Zi => Element::Water,
        }
    }

    pub const fn polarity(self) -> Polarity {
        Polarity::from_index(self.index())
    }

    /// Hidden stems, main qi first. Length 1-3.
    pub const fn hidden_stems(self) -> &'static [Stem] {
        match self {
            Self::Zi => &[Stem::Gui],
            Self::Chou => &[Stem::Ji, Stem::Gui, Stem::Xin],
            Self::Yin => &[Stem::Jia, Stem::Bing, Stem::Wu],
            Self::Mao => &[Stem::Yi],
            Self::Chen => &[Stem::Wu, Stem::Yi, Stem::Gui],
            Self::Si => &[Stem::Bing, Stem::Geng, Stem::Wu],
            Self::Wu => &[Stem::Ding, Stem::Ji],
            Self::Wei => &[Stem::Ji, Stem::Ding, Stem::Yi],
            Self::Shen => &[Stem::Geng, Stem::Ren, Stem::Wu],
            Self::You => &[Stem::Xin],
            Self::Xu => &[Stem::Wu, Stem::Xin, Stem::Ding],
            Self::Hai => &[Stem::Ren, Stem::Jia],
        }
    }

    /// The four cardinal branches (四正): Zi, Wu, Mao, You.
    pub const fn is_cardinal(self) -> bool {
        matches!(self, Self::Zi | Self::Wu | Self::Mao | Self::You)
    }

    /// Season of the month this branch governs, for narrative labels.
    pub const fn season(self) -> &'static str {
        match self {
            Self::Yin => "early spring, everything revives",
            Self::Mao => "mid spring, full of vitality",
            Self::Chen => "late spring, gathering momentum",
            Self::Si => "early summer, brimming with energy",
            Self::Wu => "midsummer, warm and expansive",
            Self::Wei => "late summer, harvest is near",
            Self::Shen => "early autumn, cool and clear",
            Self::You => "mid autumn, the joy of harvest",
            Self::Xu => "late autumn, preparing for winter",
            Self::Hai => "early winter, storing strength",
            Self::Zi => "midwinter, yang is reborn at the depth of yin",
            Self::Chou => "late winter, cold and still",
        }
    }

    /// Branch `steps` positions further along the cycle (negative steps go back).
    pub fn offset(self, steps: i64) -> Self {
        branch_at(i64::from(self.index()) + steps)
    }

    /// Parse a branch from its hanzi or pinyin name (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        ALL_BRANCHES
            .iter()
            .copied()
            .find(|b| b.hanzi() == s || b.name().eq_ignore_ascii_case(s))
    }

    /// All 12 branches in order.
    pub const fn all() -> &'static [Branch; 12] {
        &ALL_BRANCHES
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanzi())
    }
}

/// Branch at any integer index, wrapping modulo 12.
pub fn branch_at(index: i64) -> Branch {
    ALL_BRANCHES[index.rem_euclid(12) as usize]
}

/// Hidden stems of a branch, main qi first.
pub fn hidden_stems_of(branch: Branch) -> &'static [Stem] {
    branch.hidden_stems()
}
