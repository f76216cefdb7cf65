//! Report assembly for Four Pillars analyses.
//!
//! This crate provides:
//! - `assemble_report`, composing chart, elements, Ten Gods, pattern,
//!   decade cycle and current cycle into one `AnalysisResult`
//! - The `PhraseSource` seam and a built-in `PhraseBook`
//! - JSON serialization of results

pub mod error;
pub mod phrase;
pub mod report;

pub use error::ReportError;
pub use phrase::{
    ALL_CATEGORIES, PhraseBook, PhraseCategory, PhraseContext, PhraseSource, select_phrase,
};
pub use report::{
    AnalysisResult, CurrentCycle, Narrative, Remark, ReportRequest, age_on, assemble_report,
    explain,
};
