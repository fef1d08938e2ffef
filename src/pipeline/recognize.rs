//! Text recognition: rasterised page image → plain OCR text.
//!
//! The recogniser is a trait seam so callers can inject an alternative
//! backend (a test double, a hosted OCR service) through
//! [`crate::config::ExtractionConfig::recognizer`]. The default backend
//! drives the external `tesseract` binary over a temporary PNG — one fixed
//! recognition model, no layout analysis, output is the plain concatenation
//! of recognised lines.
//!
//! Recognition quality is judged by the *pipeline*, not here: this module
//! only reports what the backend produced, and [`crate::extract`] decides
//! whether the result is degenerate (too short to be a real COR) and
//! whether to substitute the sample text.

use std::io::Cursor;
use std::process::Command;
use std::sync::Arc;
use std::time::Duration;

use image::DynamicImage;
use tracing::{debug, warn};

use crate::config::ExtractionConfig;
use crate::error::{ExtractError, RecognizeError};

/// A text recognition backend.
///
/// Implementations must be `Send + Sync`; the pipeline calls `recognize`
/// from a blocking worker thread. The method is a pure function of the
/// image — no state may persist between invocations.
pub trait TextRecognizer: Send + Sync {
    /// Transcribe all text visible in the image, top to bottom.
    fn recognize(&self, image: &DynamicImage) -> Result<String, RecognizeError>;

    /// Backend name for logs and output metadata.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Default recogniser: shells out to the Tesseract OCR binary.
///
/// The page image is written to a temp PNG (PNG is lossless — compression
/// artefacts on rendered text measurably hurt recognition) and passed to
/// `<command> <png> stdout -l <language>`. Tesseract must be installed
/// separately; a missing binary surfaces as [`RecognizeError::Launch`],
/// which the pipeline absorbs like any other recognition failure.
pub struct TesseractRecognizer {
    command: String,
    language: String,
}

impl TesseractRecognizer {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }

    /// Build the default backend from the config's command and language.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.tesseract_cmd.clone(), config.ocr_language.clone())
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<String, RecognizeError> {
        // Tesseract reads from a file path, not stdin; a NamedTempFile is
        // cleaned up on drop even when recognition fails.
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| RecognizeError::Failed {
                detail: format!("PNG encoding failed: {}", e),
            })?;

        let file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .map_err(|e| RecognizeError::Failed {
                detail: format!("temp file: {}", e),
            })?;
        std::fs::write(file.path(), &png).map_err(|e| RecognizeError::Failed {
            detail: format!("temp file write: {}", e),
        })?;

        debug!(
            command = %self.command,
            language = %self.language,
            bytes = png.len(),
            "running OCR"
        );

        let output = Command::new(&self.command)
            .arg(file.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|e| RecognizeError::Launch {
                command: self.command.clone(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(RecognizeError::Failed {
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}

/// Run the configured recogniser on a blocking thread with a timeout.
///
/// Returns the raw recognised text. Degeneracy (too little text) is judged
/// by the caller, which also owns the sample-substitution policy.
pub async fn recognize_page(
    recognizer: Arc<dyn TextRecognizer>,
    image: DynamicImage,
    timeout_secs: u64,
) -> Result<String, RecognizeError> {
    let backend = recognizer.name().to_string();
    let task = tokio::task::spawn_blocking(move || recognizer.recognize(&image));

    match tokio::time::timeout(Duration::from_secs(timeout_secs), task).await {
        Ok(Ok(result)) => {
            if let Ok(ref text) = result {
                debug!(backend = %backend, chars = text.len(), "OCR finished");
            }
            result
        }
        Ok(Err(join_err)) => Err(RecognizeError::Failed {
            detail: format!("OCR task panicked: {}", join_err),
        }),
        Err(_) => {
            warn!(backend = %backend, timeout_secs, "OCR timed out");
            Err(RecognizeError::Timeout { secs: timeout_secs })
        }
    }
}

/// Resolve the effective recogniser: the injected one, or the Tesseract
/// default.
pub fn resolve_recognizer(config: &ExtractionConfig) -> Arc<dyn TextRecognizer> {
    match config.recognizer {
        Some(ref r) => Arc::clone(r),
        None => Arc::new(TesseractRecognizer::from_config(config)),
    }
}

#[cfg(test)]
mod test_support {
    use super::*;

    /// Recogniser double returning a fixed string.
    pub struct FixedTextRecognizer(pub &'static str);

    impl TextRecognizer for FixedTextRecognizer {
        fn recognize(&self, _image: &DynamicImage) -> Result<String, RecognizeError> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    /// Recogniser double that always fails.
    pub struct FailingRecognizer;

    impl TextRecognizer for FailingRecognizer {
        fn recognize(&self, _image: &DynamicImage) -> Result<String, RecognizeError> {
            Err(RecognizeError::Failed {
                detail: "simulated OCR failure".to_string(),
            })
        }

        fn name(&self) -> &str {
            "failing"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use image::{Rgba, RgbaImage};

    fn blank_image() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255])))
    }

    #[tokio::test]
    async fn fixed_recognizer_round_trips() {
        let text = recognize_page(Arc::new(FixedTextRecognizer("hello schedule")), blank_image(), 5)
            .await
            .unwrap();
        assert_eq!(text, "hello schedule");
    }

    #[tokio::test]
    async fn failing_recognizer_propagates() {
        let err = recognize_page(Arc::new(FailingRecognizer), blank_image(), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, RecognizeError::Failed { .. }));
    }

    #[tokio::test]
    async fn missing_binary_is_a_launch_error() {
        let backend = TesseractRecognizer::new("definitely-not-a-real-ocr-binary", "eng");
        let err = recognize_page(Arc::new(backend), blank_image(), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, RecognizeError::Launch { .. }));
    }

    #[test]
    fn default_backend_name() {
        let config = ExtractionConfig::default();
        assert_eq!(resolve_recognizer(&config).name(), "tesseract");
    }
}
