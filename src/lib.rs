//! # cor2sched
//!
//! Extract course schedules from Certificate of Registration (COR) PDFs.
//!
//! ## Why this crate?
//!
//! A COR is a scanned or generated single-page PDF with the student's
//! enrolled courses laid out in a `Subject / Section / Unit / Day / Time /
//! Room` table. Text-layer extraction fails on the scanned ones and garbles
//! reading order on the generated ones, so this crate rasterises the first
//! page, OCRs the image, and recovers the schedule from the recognised text
//! with a structured table parser plus a looser heuristic fallback.
//!
//! ## Pipeline Overview
//!
//! ```text
//! COR PDF
//!  │
//!  ├─ 1. Input      resolve local file or download from URL
//!  ├─ 2. Rasterize  render the first page via pdfium (CPU-bound, spawn_blocking)
//!  ├─ 3. Recognize  OCR the page image (tesseract by default, pluggable)
//!  ├─ 4. Parse      table strategy, then heuristic fallback
//!  └─ 5. Output     courses + weekly meetings + stats and provenance
//! ```
//!
//! When OCR fails or produces degenerate output, the pipeline substitutes a
//! built-in sample COR so downstream consumers always receive a plausible
//! schedule; [`ExtractionOutput::used_sample_text`] records that this
//! happened, and `sample_fallback(false)` turns the behaviour off.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cor2sched::{extract, ExtractionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::default();
//!     let output = extract("registration.pdf", &config).await?;
//!     for course in &output.data.courses {
//!         println!("{} — {} ({} units)", course.code, course.name, course.units);
//!     }
//!     if output.used_sample_text {
//!         eprintln!("warning: OCR failed, showing sample data");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `cor2sched` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! cor2sched = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod progress;
pub mod schedule;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder};
pub use error::{ExtractError, RecognizeError};
pub use extract::{extract, extract_from_bytes, extract_sync, extract_to_file, inspect};
pub use output::{
    DocumentMetadata, ExtractionOutput, ExtractionStage, ExtractionStats,
};
pub use parser::{parse_schedule, ParseOutcome, StrategyKind};
pub use pipeline::recognize::{TesseractRecognizer, TextRecognizer};
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use schedule::{Course, ScheduleData, ScheduleEntry};
