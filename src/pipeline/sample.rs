//! Built-in sample COR text.
//!
//! Centralising the embedded text here serves two purposes:
//!
//! 1. **Single source of truth** — the substitute document used when OCR
//!    fails lives in exactly one place.
//!
//! 2. **Testability** — parser tests exercise the same text the runtime
//!    substitution uses, so the "sample data always parses" guarantee is
//!    checked directly.
//!
//! The pipeline substitutes this text when recognition fails or produces
//! degenerate output (see [`crate::config::ExtractionConfig::sample_fallback`]),
//! so the caller always has a schedule to display. Outputs built from it are
//! flagged with `used_sample_text`.

/// A realistic Tagoloan Community College COR in the tabular format the
/// primary parser targets: 7 course rows and a `Total Units` trailer.
pub const SAMPLE_COR_TEXT: &str = "
TAGOLOAN COMMUNITY COLLEGE
Certificate of Registration
Student Name: JOHN DOE
Program: BACHELOR OF SCIENCE IN INFORMATION TECHNOLOGY
Year Level: 2ND YEAR

Subject         Section    Unit    Day    Time                Room
Path Fit 3      BSIT 2F    2       TUE    08:00 AM-10:00 AM   FIELD
GEC 3           BSIT 2F    3       FRI    10:00 AM-01:00 PM   21
IT 107          BSIT 2F    3       MON    06:00 PM-08:00 PM   Online
IT 108          BSIT 2F    3       TUE    01:00 PM-04:00 PM   CpLab1
IT 109          BSIT 2F    3       WED    10:00 AM-12:00 PM   Online
IT 110          BSIT 2F    3       THU    01:00 PM-03:00 PM   Online
IT 111          BSIT 2F    3       MON    09:00 AM-12:00 PM   Online

Total Units: 20
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_schedule, StrategyKind};

    #[test]
    fn sample_text_always_parses() {
        let outcome = parse_schedule(SAMPLE_COR_TEXT).expect("sample text must parse");
        assert_eq!(outcome.strategy, StrategyKind::Table);
        assert_eq!(outcome.data.courses.len(), 7);
        assert_eq!(outcome.data.schedule.len(), 7);
    }
}
