//! Phrase-source seam for narrative text.
//!
//! The assembler asks a [`PhraseSource`] for candidate phrases per category
//! and picks one with the caller's random source. [`PhraseBook`] is a small
//! built-in library; callers can load their own from JSON.

use bazi_base::{Branch, Element, PatternKind, Stem};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseCategory {
    Opening,
    Description,
    Judgment,
    Timing,
    Advice,
    Closing,
}

/// All categories in narrative order.
pub const ALL_CATEGORIES: [PhraseCategory; 6] = [
    PhraseCategory::Opening,
    PhraseCategory::Description,
    PhraseCategory::Judgment,
    PhraseCategory::Timing,
    PhraseCategory::Advice,
    PhraseCategory::Closing,
];

impl PhraseCategory {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::Description => "description",
            Self::Judgment => "judgment",
            Self::Timing => "timing",
            Self::Advice => "advice",
            Self::Closing => "closing",
        }
    }
}

/// Chart facts a phrase may interpolate.
#[derive(Debug, Clone, Copy)]
pub struct PhraseContext<'a> {
    pub name: &'a str,
    pub age: u32,
    pub day_master: Stem,
    pub month_branch: Branch,
    pub pattern: PatternKind,
    pub strongest: Element,
}

/// A library of narrative phrases.
pub trait PhraseSource {
    /// Candidate phrases for `category`, already rendered for `ctx`.
    fn candidates(&self, category: PhraseCategory, ctx: &PhraseContext<'_>) -> Vec<String>;
}

/// Pick one candidate uniformly with `rng`; empty when the source has none.
pub fn select_phrase<R: Rng + ?Sized>(
    source: &dyn PhraseSource,
    category: PhraseCategory,
    ctx: &PhraseContext<'_>,
    rng: &mut R,
) -> String {
    source
        .candidates(category, ctx)
        .choose(rng)
        .cloned()
        .unwrap_or_default()
}

/// Template phrase library.
///
/// Templates may use `{name}`, `{age}`, `{day_master}`, `{month}`,
/// `{season}`, `{pattern}` and `{strongest}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseBook {
    pub opening: Vec<String>,
    pub description: Vec<String>,
    pub judgment: Vec<String>,
    pub timing: Vec<String>,
    pub advice: Vec<String>,
    pub closing: Vec<String>,
}

impl PhraseBook {
    /// Parse a phrase book from JSON; missing categories fall back to the
    /// built-in templates.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn templates(&self, category: PhraseCategory) -> &[String] {
        match category {
            PhraseCategory::Opening => &self.opening,
            PhraseCategory::Description => &self.description,
            PhraseCategory::Judgment => &self.judgment,
            PhraseCategory::Timing => &self.timing,
            PhraseCategory::Advice => &self.advice,
            PhraseCategory::Closing => &self.closing,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for PhraseBook {
    fn default() -> Self {
        Self {
            opening: strings(&[
                "Greetings, {name}. Your day master is {day_master}, born in the {month} month: {season}.",
                "{name}, your chart is clear and its structure well defined.",
                "Looking closely at your chart, {name}: the day master {day_master} takes its season, and at {age} your path so far matches it.",
            ]),
            description: strings(&[
                "The chart leans on {strongest}; it sets the tone of the whole reading.",
                "A {pattern} chart carries its weight steadily through the pillars.",
            ]),
            judgment: strings(&[
                "The structure favors patience over haste.",
                "Steady effort pays more than bold wagers in this chart.",
            ]),
            timing: strings(&[
                "The coming decade rewards preparation made now.",
                "Watch the turn of the seasons; openings arrive with the {month} month.",
            ]),
            advice: strings(&[
                "Keep {strongest} in balance; excess of the strongest element is its own burden.",
                "Build on the day master {day_master}; lean on allies before acting alone.",
            ]),
            closing: strings(&[
                "May your career prosper and your household thrive, {name}.",
                "{name}, follow the times and seize them; great things follow.",
                "Make good use of your chart's strengths at {age}, {name}. Fate sets the board; effort moves the pieces.",
            ]),
        }
    }
}

fn render(template: &str, ctx: &PhraseContext<'_>) -> String {
    template
        .replace("{name}", ctx.name)
        .replace("{age}", &ctx.age.to_string())
        .replace("{day_master}", ctx.day_master.hanzi())
        .replace("{month}", ctx.month_branch.hanzi())
        .replace("{season}", ctx.month_branch.season())
        .replace("{pattern}", ctx.pattern.hanzi())
        .replace("{strongest}", ctx.strongest.name())
}

impl PhraseSource for PhraseBook {
    fn candidates(&self, category: PhraseCategory, ctx: &PhraseContext<'_>) -> Vec<String> {
        self.templates(category)
            .iter()
            .map(|t| render(t, ctx))
            .collect()
    }
}
