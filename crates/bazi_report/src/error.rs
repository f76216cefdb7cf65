//! Error types for report assembly.

use std::error::Error;
use std::fmt::{Display, Formatter};

use bazi_base::BaziError;
use bazi_time::CivilDate;

/// Errors from assembling or serializing a report.
#[derive(Debug)]
#[non_exhaustive]
pub enum ReportError {
    /// Chart computation or config validation failed.
    Bazi(BaziError),
    /// The injected current date precedes the birth date.
    TodayBeforeBirth { birth: CivilDate, today: CivilDate },
    /// JSON serialization failed.
    Json(serde_json::Error),
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bazi(e) => write!(f, "{e}"),
            Self::TodayBeforeBirth { birth, today } => {
                write!(f, "current date {today} precedes birth date {birth}")
            }
            Self::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Bazi(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::TodayBeforeBirth { .. } => None,
        }
    }
}

impl From<BaziError> for ReportError {
    fn from(e: BaziError) -> Self {
        Self::Bazi(e)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_passes_chart_errors_through() {
        let e = ReportError::from(BaziError::InvalidConfig("decade_count".into()));
        assert!(e.to_string().contains("decade_count"));
        assert!(e.source().is_some());
    }

    #[test]
    fn today_before_birth_message() {
        let e = ReportError::TodayBeforeBirth {
            birth: CivilDate::new(2008, 8, 8).unwrap(),
            today: CivilDate::new(2000, 1, 1).unwrap(),
        };
        assert_eq!(
            e.to_string(),
            "current date 2000-01-01 precedes birth date 2008-08-08"
        );
    }
}
