//! Schedule text parsing: OCR text → [`ScheduleData`].
//!
//! Two strategies implement one [`ParseStrategy`] capability and are tried
//! in fixed priority order:
//!
//! 1. [`table::TableStrategy`] — the structured Subject/Section/Unit table
//!    layout printed by the registrar.
//! 2. [`heuristic::HeuristicStrategy`] — loose per-line pattern matching for
//!    CORs without a recognisable table. Runs only when the table strategy
//!    recovers zero courses, even if individual lines would have matched its
//!    patterns.
//!
//! If both strategies come up empty, [`parse_schedule`] fails with
//! [`ExtractError::NoCoursesFound`] — callers never receive an empty
//! `ScheduleData`.

pub mod heuristic;
pub mod table;
pub mod time;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ExtractError;
use crate::schedule::ScheduleData;
pub use heuristic::HeuristicStrategy;
pub use table::TableStrategy;

/// One way of reading course data out of raw text.
///
/// Implementations must be pure: parsing the same text twice yields the
/// same result, with no state carried between invocations.
pub trait ParseStrategy {
    /// Which strategy this is, for tagging the extraction output.
    fn kind(&self) -> StrategyKind;

    /// Parse the text. An empty result means "this strategy does not apply",
    /// not an error; [`parse_schedule`] decides when to give up.
    fn parse(&self, text: &str) -> ScheduleData;
}

/// Identifies which strategy produced a parse result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// The structured table layout.
    Table,
    /// The loose pattern fallback.
    Heuristic,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Table => write!(f, "table"),
            StrategyKind::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// A successful parse plus the strategy that produced it.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub data: ScheduleData,
    pub strategy: StrategyKind,
}

/// Parse raw OCR text into a schedule, trying the strategies in priority
/// order.
///
/// # Errors
/// [`ExtractError::NoCoursesFound`] when neither strategy recovers a course.
pub fn parse_schedule(text: &str) -> Result<ParseOutcome, ExtractError> {
    let strategies: [&dyn ParseStrategy; 2] = [&TableStrategy, &HeuristicStrategy];

    for strategy in strategies {
        let data = strategy.parse(text);
        if !data.is_empty() {
            info!(
                strategy = %strategy.kind(),
                courses = data.courses.len(),
                meetings = data.schedule.len(),
                "parsed schedule"
            );
            return Ok(ParseOutcome {
                data,
                strategy: strategy.kind(),
            });
        }
        debug!(strategy = %strategy.kind(), "strategy found no courses");
    }

    Err(ExtractError::NoCoursesFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_takes_priority_over_heuristic() {
        // The second line would match the heuristic code-and-name pattern,
        // but one table row is enough to commit to the table strategy.
        let text = "Subject Section Unit Day Time Room\n\
                    IT 107 BSIT 2F 3 MON 06:00 PM-08:00 PM Online\n\
                    GEC 103 Ethics and Society\n";
        let outcome = parse_schedule(text).unwrap();
        assert_eq!(outcome.strategy, StrategyKind::Table);
        assert_eq!(outcome.data.courses.len(), 1);
        assert_eq!(outcome.data.courses[0].code, "IT 107");
    }

    #[test]
    fn falls_back_when_no_table() {
        let outcome = parse_schedule("GEC 103 Ethics and Society\n").unwrap();
        assert_eq!(outcome.strategy, StrategyKind::Heuristic);
        assert_eq!(outcome.data.courses[0].code, "GEC 103");
    }

    #[test]
    fn both_empty_is_an_error() {
        let err = parse_schedule("nothing of interest here\n").unwrap_err();
        assert!(matches!(err, ExtractError::NoCoursesFound));
    }
}
