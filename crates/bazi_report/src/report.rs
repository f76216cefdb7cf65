//! Report assembly: one immutable analysis result per request.

use bazi_base::{
    AnalysisConfig, DecadeCycle, DecadePillar, ElementProfile, FourPillars, Gender, Pattern,
    Pillar, Stem, TenGodAssignment, compute_decade_cycle, compute_element_profile,
    compute_four_pillars, compute_pattern, compute_ten_gods, month_pillar, year_pillar,
};
use bazi_time::{CivilDate, CivilDateTime};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ReportError;
use crate::phrase::{PhraseCategory, PhraseContext, PhraseSource, select_phrase};

/// Everything needed to analyze one subject.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub name: String,
    /// Localized birth moment.
    pub birth: CivilDateTime,
    pub gender: Gender,
    /// Current civil date, injected by the caller.
    pub today: CivilDate,
    pub config: AnalysisConfig,
}

/// Pillars in effect on the current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrentCycle {
    pub date: CivilDate,
    /// Year pillar (流年).
    pub year: Pillar,
    /// Year pillar of the following civil year.
    pub next_year: Pillar,
    pub month: Pillar,
    /// Decade in effect, if the first one has begun.
    pub decade: Option<DecadePillar>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remark {
    pub category: PhraseCategory,
    pub text: String,
}

/// Narrative text of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub opening: String,
    /// Deterministic chart walk-through.
    pub explanation: String,
    /// One remark each for description, judgment, timing and advice.
    pub remarks: Vec<Remark>,
    pub closing: String,
}

/// The complete, immutable analysis of one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub name: String,
    pub gender: Gender,
    pub birth: CivilDateTime,
    /// Completed years on the current date.
    pub age: u32,
    pub day_master: Stem,
    pub pillars: FourPillars,
    pub elements: ElementProfile,
    pub ten_gods: TenGodAssignment,
    pub pattern: Pattern,
    pub decades: DecadeCycle,
    pub current: CurrentCycle,
    pub narrative: Narrative,
}

impl AnalysisResult {
    /// Pretty-printed JSON for an external store.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Completed years from `birth` to `today`.
pub fn age_on(birth: CivilDate, today: CivilDate) -> Result<u32, ReportError> {
    if today < birth {
        return Err(ReportError::TodayBeforeBirth { birth, today });
    }
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    Ok(years.unsigned_abs())
}

/// Walk through the pillars by role, opening with the day master and season.
pub fn explain(pillars: &FourPillars) -> String {
    let dm = pillars.day_master();
    let month = pillars.month.branch();
    let mut out = format!(
        "Day master {} ({} {}), born in the {} month: {}.",
        dm.hanzi(),
        dm.polarity().name(),
        dm.element().name(),
        month.hanzi(),
        month.season()
    );
    for (position, pillar) in pillars.iter() {
        out.push_str(&format!(
            " The {} pillar {} ({}) governs {}.",
            position.name(),
            pillar,
            pillar.nayin().gloss,
            position.role()
        ));
    }
    out
}

/// Compose the full analysis of `request`.
///
/// Phrase choice is the only randomness; everything else is a pure function
/// of the request.
pub fn assemble_report(
    request: ReportRequest,
    phrases: &dyn PhraseSource,
    rng: &mut impl Rng,
) -> Result<AnalysisResult, ReportError> {
    let ReportRequest {
        name,
        birth,
        gender,
        today,
        config,
    } = request;
    config.validate()?;
    let age = age_on(birth.date(), today)?;

    let pillars = compute_four_pillars(&birth, config.late_rat)?;
    let day_master = pillars.day_master();
    let elements = compute_element_profile(&pillars, &config);
    let ten_gods = compute_ten_gods(&pillars, day_master, gender, config.tie_break);
    let pattern = compute_pattern(&pillars, day_master);
    let decades = compute_decade_cycle(&birth, &pillars, gender, config.decade_count);
    debug!(pattern = %pattern.kind, strongest = elements.strongest().name(), "chart analyzed");

    let current = CurrentCycle {
        date: today,
        year: year_pillar(today.year()),
        next_year: year_pillar(today.year() + 1),
        month: month_pillar(today.year(), today.month())?,
        decade: decades.current(today).copied(),
    };

    let ctx = PhraseContext {
        name: &name,
        age,
        day_master,
        month_branch: pillars.month.branch(),
        pattern: pattern.kind,
        strongest: elements.strongest(),
    };
    let opening = select_phrase(phrases, PhraseCategory::Opening, &ctx, &mut *rng);
    let remarks = [
        PhraseCategory::Description,
        PhraseCategory::Judgment,
        PhraseCategory::Timing,
        PhraseCategory::Advice,
    ]
    .into_iter()
    .map(|category| Remark {
        category,
        text: select_phrase(phrases, category, &ctx, &mut *rng),
    })
    .collect();
    let closing = select_phrase(phrases, PhraseCategory::Closing, &ctx, &mut *rng);
    let narrative = Narrative {
        opening,
        explanation: explain(&pillars),
        remarks,
        closing,
    };

    info!(name = %name, pillars = %pillars, "assembled report");
    Ok(AnalysisResult {
        name,
        gender,
        birth,
        age,
        day_master,
        pillars,
        elements,
        ten_gods,
        pattern,
        decades,
        current,
        narrative,
    })
}
