//! Extraction results: the schedule plus everything a caller needs to judge
//! how it was produced.
//!
//! The parsed [`ScheduleData`] alone is not enough — because the pipeline
//! can silently substitute sample text when OCR fails, the output records
//! `used_sample_text` and the underlying [`RecognizeError`] so callers can
//! distinguish a genuine extraction from a stand-in. Stats and document
//! metadata ride along for diagnostics and the CLI's `--json` mode.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RecognizeError;
use crate::parser::StrategyKind;
use crate::schedule::ScheduleData;

/// The full result of one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutput {
    /// Parsed courses and meetings.
    pub data: ScheduleData,
    /// Metadata read from the source document.
    pub metadata: DocumentMetadata,
    /// Timing and volume statistics.
    pub stats: ExtractionStats,
    /// Which parsing strategy produced `data`.
    pub strategy: StrategyKind,
    /// True when OCR output was degenerate and the built-in sample COR text
    /// was parsed instead of the document's own text.
    pub used_sample_text: bool,
    /// The recognition error that triggered sample substitution, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recognition_error: Option<RecognizeError>,
}

/// Timing and volume statistics for one extraction run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Wall-clock duration of the whole run in milliseconds.
    pub total_duration_ms: u64,
    /// Time spent rasterising the first page.
    pub render_duration_ms: u64,
    /// Time spent in OCR.
    pub recognize_duration_ms: u64,
    /// Time spent parsing the recognised text.
    pub parse_duration_ms: u64,
    /// Characters of text the recogniser produced (before any substitution).
    pub recognized_chars: usize,
    /// Number of distinct courses found.
    pub course_count: usize,
    /// Number of schedule entries (course meetings) found.
    pub meeting_count: usize,
}

/// Document metadata read from the PDF's info dictionary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}

/// The stage an extraction run is currently in.
///
/// The pipeline moves strictly forward: `Idle → Rasterizing → Recognizing →
/// Parsing → Done`, or to `Failed` from any active stage. Reported through
/// [`crate::progress::ExtractionProgressCallback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStage {
    Idle,
    Rasterizing,
    Recognizing,
    Parsing,
    Done,
    Failed,
}

impl fmt::Display for ExtractionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExtractionStage::Idle => "idle",
            ExtractionStage::Rasterizing => "rasterizing",
            ExtractionStage::Recognizing => "recognizing",
            ExtractionStage::Parsing => "parsing",
            ExtractionStage::Done => "done",
            ExtractionStage::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_display() {
        assert_eq!(ExtractionStage::Rasterizing.to_string(), "rasterizing");
        assert_eq!(ExtractionStage::Done.to_string(), "done");
    }

    #[test]
    fn recognition_error_omitted_when_absent() {
        let output = ExtractionOutput {
            data: ScheduleData::default(),
            metadata: DocumentMetadata::default(),
            stats: ExtractionStats::default(),
            strategy: StrategyKind::Table,
            used_sample_text: false,
            recognition_error: None,
        };
        let json = serde_json::to_string(&output).unwrap();
        assert!(!json.contains("recognition_error"));
        assert!(json.contains("\"strategy\":\"table\""));
    }

    #[test]
    fn recognition_error_serialized_when_present() {
        let output = ExtractionOutput {
            data: ScheduleData::default(),
            metadata: DocumentMetadata::default(),
            stats: ExtractionStats::default(),
            strategy: StrategyKind::Heuristic,
            used_sample_text: true,
            recognition_error: Some(RecognizeError::Degenerate { chars: 3 }),
        };
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains("recognition_error"));
        assert!(json.contains("\"used_sample_text\":true"));
    }
}
