//! Error types for the cor2sched library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ExtractError`] — **Fatal**: the extraction cannot produce a schedule
//!   at all (bad input file, corrupt PDF, no recognisable course data).
//!   Returned as `Err(ExtractError)` from the top-level `extract*` functions.
//!
//! * [`RecognizeError`] — **Non-fatal**: the OCR step failed or produced
//!   degenerate output. By default the pipeline substitutes the built-in
//!   sample COR text and continues, recording the error inside
//!   [`crate::output::ExtractionOutput`] so callers can tell a genuine
//!   extraction from a substituted one.
//!
//! The separation lets callers decide their own tolerance: treat any OCR
//! hiccup as fatal (`sample_fallback(false)`), or accept the substitute and
//! inspect `used_sample_text` afterwards.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the cor2sched library.
///
/// OCR-level failures use [`RecognizeError`] and are absorbed by the sample
/// substitution rather than propagated here (unless substitution is
/// disabled, in which case they surface as [`ExtractError::RecognitionFailed`]).
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a valid file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// The document could not be opened or its first page could not be
    /// rasterised. Fatal: no sample data is substituted at this stage.
    #[error("Cannot read '{path}' as a PDF document: {detail}\nTry re-exporting or repairing the file.")]
    InvalidDocument { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    // ── Recognition errors ────────────────────────────────────────────────
    /// OCR failed and sample substitution was disabled by the caller.
    #[error("Text recognition failed: {source}\nRe-run without --no-sample-fallback to substitute sample data.")]
    RecognitionFailed {
        #[source]
        source: RecognizeError,
    },

    // ── Parse errors ──────────────────────────────────────────────────────
    /// Neither the table parser nor the heuristic fallback found a course.
    #[error(
        "No course information found in the PDF.\n\
Ensure the document contains a course schedule table (Subject / Section / Unit columns)\n\
or course codes with meeting times, then try again."
    )]
    NoCoursesFound,

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal OCR error.
///
/// Recorded in [`crate::output::ExtractionOutput::recognition_error`] when
/// the pipeline falls back to sample text. The extraction itself continues.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum RecognizeError {
    /// The OCR command could not be launched (binary missing, not executable).
    #[error("Failed to launch OCR command '{command}': {detail}")]
    Launch { command: String, detail: String },

    /// The OCR backend ran but reported an error.
    #[error("OCR failed: {detail}")]
    Failed { detail: String },

    /// Recognition succeeded but returned too little text to be a real COR.
    #[error("OCR produced only {chars} characters of text (degenerate output)")]
    Degenerate { chars: usize },

    /// Recognition did not complete within the configured timeout.
    #[error("OCR timed out after {secs}s")]
    Timeout { secs: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_pdf_display() {
        let e = ExtractError::NotAPdf {
            path: PathBuf::from("/tmp/sched.pdf"),
            magic: *b"PK\x03\x04",
        };
        let msg = e.to_string();
        assert!(msg.contains("not a valid PDF"), "got: {msg}");
        assert!(msg.contains("sched.pdf"));
    }

    #[test]
    fn no_courses_mentions_table_columns() {
        let msg = ExtractError::NoCoursesFound.to_string();
        assert!(msg.contains("No course information"));
        assert!(msg.contains("Subject / Section / Unit"));
    }

    #[test]
    fn degenerate_display() {
        let e = RecognizeError::Degenerate { chars: 12 };
        assert!(e.to_string().contains("12 characters"));
    }

    #[test]
    fn recognition_failed_carries_source() {
        use std::error::Error as _;
        let e = ExtractError::RecognitionFailed {
            source: RecognizeError::Timeout { secs: 60 },
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("recognition failed"));
    }
}
