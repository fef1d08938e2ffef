//! Configuration types for COR schedule extraction.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across threads and to diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A dozen-field constructor is unreadable and breaks on every new field.
//! The builder pattern lets callers set only what they care about and rely on
//! well-documented defaults for the rest.

use crate::error::ExtractError;
use crate::pipeline::recognize::TextRecognizer;
use crate::progress::ProgressCallback;
use std::fmt;
use std::sync::Arc;

/// Configuration for a COR schedule extraction.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use cor2sched::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .render_scale(3.0)
///     .ocr_language("eng")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Scale factor applied when rasterising the first page. Range: 1.0–8.0.
    /// Default: 2.0.
    ///
    /// COR tables use small fonts, and OCR accuracy on 1× renders is poor
    /// enough to miss whole rows. 2× is the floor at which Tesseract reads
    /// the sample documents reliably; raise it to 3–4× for phone-scanned
    /// documents at the cost of render time and memory.
    pub render_scale: f32,

    /// Maximum rendered image dimension (width or height) in pixels.
    /// Default: 4000.
    ///
    /// A safety cap independent of scale. A 4× render of an A3 form could
    /// exhaust memory; this caps either dimension, scaling the other
    /// proportionally.
    pub max_rendered_pixels: u32,

    /// Minimum recognised characters (after trimming) for OCR output to be
    /// considered usable. Default: 50.
    ///
    /// A real COR produces hundreds of characters. Output below this
    /// threshold means the OCR step effectively failed (blank render, wrong
    /// language pack, image-only garbage) and triggers sample substitution.
    pub min_recognized_chars: usize,

    /// Substitute the built-in sample COR text when recognition fails or is
    /// degenerate. Default: true.
    ///
    /// When false, those failures surface as
    /// [`ExtractError::RecognitionFailed`] instead. Either way the output
    /// records whether substitution happened.
    pub sample_fallback: bool,

    /// Custom text recognition backend. Takes precedence over
    /// `tesseract_cmd` / `ocr_language` when set.
    pub recognizer: Option<Arc<dyn TextRecognizer>>,

    /// Command used to invoke the Tesseract binary. Default: "tesseract".
    pub tesseract_cmd: String,

    /// Tesseract language code passed via `-l`. Default: "eng".
    pub ocr_language: String,

    /// OCR timeout in seconds. Default: 60.
    pub ocr_timeout_secs: u64,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Progress callback for stage events. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            render_scale: 2.0,
            max_rendered_pixels: 4000,
            min_recognized_chars: 50,
            sample_fallback: true,
            recognizer: None,
            tesseract_cmd: "tesseract".to_string(),
            ocr_language: "eng".to_string(),
            ocr_timeout_secs: 60,
            password: None,
            download_timeout_secs: 120,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("render_scale", &self.render_scale)
            .field("max_rendered_pixels", &self.max_rendered_pixels)
            .field("min_recognized_chars", &self.min_recognized_chars)
            .field("sample_fallback", &self.sample_fallback)
            .field(
                "recognizer",
                &self.recognizer.as_ref().map(|r| r.name().to_string()),
            )
            .field("tesseract_cmd", &self.tesseract_cmd)
            .field("ocr_language", &self.ocr_language)
            .field("ocr_timeout_secs", &self.ocr_timeout_secs)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("download_timeout_secs", &self.download_timeout_secs)
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractionConfig`].
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn render_scale(mut self, scale: f32) -> Self {
        self.config.render_scale = scale.clamp(1.0, 8.0);
        self
    }

    pub fn max_rendered_pixels(mut self, px: u32) -> Self {
        self.config.max_rendered_pixels = px.max(100);
        self
    }

    pub fn min_recognized_chars(mut self, chars: usize) -> Self {
        self.config.min_recognized_chars = chars;
        self
    }

    pub fn sample_fallback(mut self, enabled: bool) -> Self {
        self.config.sample_fallback = enabled;
        self
    }

    pub fn recognizer(mut self, recognizer: Arc<dyn TextRecognizer>) -> Self {
        self.config.recognizer = Some(recognizer);
        self
    }

    pub fn tesseract_cmd(mut self, cmd: impl Into<String>) -> Self {
        self.config.tesseract_cmd = cmd.into();
        self
    }

    pub fn ocr_language(mut self, lang: impl Into<String>) -> Self {
        self.config.ocr_language = lang.into();
        self
    }

    pub fn ocr_timeout_secs(mut self, secs: u64) -> Self {
        self.config.ocr_timeout_secs = secs;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.config.progress_callback = Some(callback);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ExtractError> {
        let c = &self.config;
        if !(1.0..=8.0).contains(&c.render_scale) {
            return Err(ExtractError::InvalidConfig(format!(
                "render scale must be 1.0–8.0, got {}",
                c.render_scale
            )));
        }
        if c.tesseract_cmd.trim().is_empty() {
            return Err(ExtractError::InvalidConfig(
                "tesseract command must not be empty".into(),
            ));
        }
        if c.ocr_language.trim().is_empty() {
            return Err(ExtractError::InvalidConfig(
                "OCR language must not be empty".into(),
            ));
        }
        if c.ocr_timeout_secs == 0 {
            return Err(ExtractError::InvalidConfig(
                "OCR timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ExtractionConfig::builder().build().unwrap();
        assert_eq!(config.render_scale, 2.0);
        assert_eq!(config.min_recognized_chars, 50);
        assert!(config.sample_fallback);
        assert_eq!(config.tesseract_cmd, "tesseract");
    }

    #[test]
    fn scale_is_clamped() {
        let config = ExtractionConfig::builder()
            .render_scale(0.1)
            .build()
            .unwrap();
        assert_eq!(config.render_scale, 1.0);

        let config = ExtractionConfig::builder()
            .render_scale(100.0)
            .build()
            .unwrap();
        assert_eq!(config.render_scale, 8.0);
    }

    #[test]
    fn empty_ocr_language_rejected() {
        let err = ExtractionConfig::builder()
            .ocr_language("  ")
            .build()
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidConfig(_)));
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = ExtractionConfig::builder()
            .ocr_timeout_secs(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidConfig(_)));
    }

    #[test]
    fn debug_redacts_password() {
        let config = ExtractionConfig::builder()
            .password("hunter2")
            .build()
            .unwrap();
        let dbg = format!("{:?}", config);
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("redacted"));
    }
}
