//! Top-level extraction API: input → rendered page → OCR text → schedule.
//!
//! The stages run strictly in sequence (`Rasterizing → Recognizing →
//! Parsing`); each stage is timed and reported through the optional progress
//! callback. Recognition failures are non-fatal by default: the pipeline
//! substitutes the built-in sample COR text, records the error and the
//! `used_sample_text` flag in the output, and carries on. Set
//! `sample_fallback(false)` to make them fatal instead.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::config::ExtractionConfig;
use crate::error::{ExtractError, RecognizeError};
use crate::output::{ExtractionOutput, ExtractionStage, ExtractionStats, DocumentMetadata};
use crate::parser::parse_schedule;
use crate::pipeline::input::resolve_input;
use crate::pipeline::recognize::{recognize_page, resolve_recognizer};
use crate::pipeline::render::{extract_metadata, render_first_page};
use crate::pipeline::sample::SAMPLE_COR_TEXT;
use crate::progress::{ExtractionProgressCallback, NoopProgressCallback};

/// Extract a course schedule from a PDF file path or HTTP(S) URL.
///
/// This is the primary entry point. URL inputs are downloaded to a temp
/// directory first; local paths are validated for existence and PDF magic
/// bytes.
///
/// # Example
/// ```rust,no_run
/// use cor2sched::{extract, ExtractionConfig};
///
/// # async fn run() -> Result<(), cor2sched::ExtractError> {
/// let output = extract("registration.pdf", &ExtractionConfig::default()).await?;
/// for course in &output.data.courses {
///     println!("{} — {}", course.code, course.name);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn extract(
    input: &str,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let resolved = resolve_input(input, config.download_timeout_secs).await?;
    extract_from_path(resolved.path(), config).await
}

/// Extract a course schedule from in-memory PDF bytes.
///
/// pdfium needs a file-system path, so the bytes are spooled to a temp file
/// that lives for the duration of the call. The `%PDF` magic bytes are
/// checked before anything is written.
pub async fn extract_from_bytes(
    bytes: &[u8],
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let mut magic = [0u8; 4];
    if bytes.len() >= 4 {
        magic.copy_from_slice(&bytes[..4]);
    }
    if &magic != b"%PDF" {
        return Err(ExtractError::NotAPdf {
            path: PathBuf::from("<bytes>"),
            magic,
        });
    }

    let file = tempfile::Builder::new()
        .suffix(".pdf")
        .tempfile()
        .map_err(|e| ExtractError::Internal(format!("temp file: {}", e)))?;
    tokio::fs::write(file.path(), bytes)
        .await
        .map_err(|e| ExtractError::Internal(format!("temp file write: {}", e)))?;

    extract_from_path(file.path(), config).await
}

/// Blocking wrapper around [`extract`] for callers without a Tokio runtime.
pub fn extract_sync(
    input: &str,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ExtractError::Internal(format!("Failed to create runtime: {}", e)))?;
    runtime.block_on(extract(input, config))
}

/// Read document metadata without rendering or recognising anything.
pub async fn inspect(
    input: &str,
    config: &ExtractionConfig,
) -> Result<DocumentMetadata, ExtractError> {
    let resolved = resolve_input(input, config.download_timeout_secs).await?;
    extract_metadata(resolved.path(), config.password.as_deref()).await
}

/// Extract and write the result as pretty-printed JSON.
///
/// The file is written to a temp path in the target directory and renamed
/// into place, so a crash mid-write never leaves a half-written output.
pub async fn extract_to_file(
    input: &str,
    output_path: &Path,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let output = extract(input, config).await?;

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| ExtractError::Internal(format!("JSON serialisation failed: {}", e)))?;

    let dir = output_path.parent().unwrap_or_else(|| Path::new("."));
    let tmp = tempfile::Builder::new()
        .prefix(".cor2sched-")
        .tempfile_in(dir)
        .map_err(|e| ExtractError::OutputWriteFailed {
            path: output_path.to_path_buf(),
            source: e,
        })?;
    std::fs::write(tmp.path(), json.as_bytes()).map_err(|e| ExtractError::OutputWriteFailed {
        path: output_path.to_path_buf(),
        source: e,
    })?;
    tmp.persist(output_path)
        .map_err(|e| ExtractError::OutputWriteFailed {
            path: output_path.to_path_buf(),
            source: e.error,
        })?;

    info!("Wrote schedule to {}", output_path.display());
    Ok(output)
}

/// Run the pipeline stages against a resolved local PDF path.
async fn extract_from_path(
    pdf_path: &Path,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let callback: Arc<dyn ExtractionProgressCallback> = config
        .progress_callback
        .clone()
        .unwrap_or_else(|| Arc::new(NoopProgressCallback));
    let total_start = Instant::now();

    // Stage 1: rasterise the first page.
    callback.on_stage_start(ExtractionStage::Rasterizing);
    let render_start = Instant::now();
    let image = match render_first_page(pdf_path, config).await {
        Ok(image) => image,
        Err(e) => {
            callback.on_stage_start(ExtractionStage::Failed);
            return Err(e);
        }
    };
    let render_duration_ms = render_start.elapsed().as_millis() as u64;
    callback.on_stage_complete(ExtractionStage::Rasterizing, render_duration_ms);

    // Stage 2: OCR. Failures here are absorbed by sample substitution
    // unless the caller disabled it.
    callback.on_stage_start(ExtractionStage::Recognizing);
    let recognize_start = Instant::now();
    let recognizer = resolve_recognizer(config);
    let recognized = recognize_page(recognizer, image, config.ocr_timeout_secs).await;
    let recognize_duration_ms = recognize_start.elapsed().as_millis() as u64;

    let recognized = recognized.and_then(|text| {
        let chars = text.trim().chars().count();
        if chars < config.min_recognized_chars {
            Err(RecognizeError::Degenerate { chars })
        } else {
            Ok(text)
        }
    });

    let (text, recognized_chars, recognition_error) = match recognized {
        Ok(text) => {
            let chars = text.chars().count();
            callback.on_stage_complete(ExtractionStage::Recognizing, recognize_duration_ms);
            (text, chars, None)
        }
        Err(e) if config.sample_fallback => {
            warn!("Text recognition unusable ({}); substituting sample data", e);
            callback.on_sample_substituted(&e.to_string());
            callback.on_stage_complete(ExtractionStage::Recognizing, recognize_duration_ms);
            (SAMPLE_COR_TEXT.to_string(), 0, Some(e))
        }
        Err(e) => {
            callback.on_stage_start(ExtractionStage::Failed);
            return Err(ExtractError::RecognitionFailed { source: e });
        }
    };
    let used_sample_text = recognition_error.is_some();

    // Stage 3: parse the recognised text into courses and meetings.
    callback.on_stage_start(ExtractionStage::Parsing);
    let parse_start = Instant::now();
    let outcome = match parse_schedule(&text) {
        Ok(outcome) => outcome,
        Err(e) => {
            callback.on_stage_start(ExtractionStage::Failed);
            return Err(e);
        }
    };
    let parse_duration_ms = parse_start.elapsed().as_millis() as u64;
    callback.on_stage_complete(ExtractionStage::Parsing, parse_duration_ms);

    let metadata = extract_metadata(pdf_path, config.password.as_deref()).await?;

    let stats = ExtractionStats {
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        render_duration_ms,
        recognize_duration_ms,
        parse_duration_ms,
        recognized_chars,
        course_count: outcome.data.courses.len(),
        meeting_count: outcome.data.schedule.len(),
    };

    info!(
        courses = stats.course_count,
        meetings = stats.meeting_count,
        strategy = %outcome.strategy,
        used_sample_text,
        "extraction complete in {}ms",
        stats.total_duration_ms
    );
    callback.on_extraction_complete(stats.course_count, stats.meeting_count);
    callback.on_stage_start(ExtractionStage::Done);

    Ok(ExtractionOutput {
        data: outcome.data,
        metadata,
        stats,
        strategy: outcome.strategy,
        used_sample_text,
        recognition_error,
    })
}
