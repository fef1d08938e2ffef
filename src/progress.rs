//! Progress-callback trait for per-stage extraction events.
//!
//! Inject an [`Arc<dyn ExtractionProgressCallback>`] via
//! [`crate::config::ExtractionConfigBuilder::progress_callback`] to receive
//! real-time events as the pipeline moves through its stages.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a Tokio broadcast channel, a UI state store, or a
//! terminal spinner — without the library knowing anything about how the host
//! application communicates. The trait is `Send + Sync` because stages run on
//! blocking worker threads.
//!
//! # Example
//!
//! ```rust
//! use cor2sched::{ExtractionProgressCallback, ExtractionStage, ExtractionConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: Arc<AtomicUsize>,
//! }
//!
//! impl ExtractionProgressCallback for CountingCallback {
//!     fn on_stage_complete(&self, stage: ExtractionStage, elapsed_ms: u64) {
//!         self.completed.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{} done in {}ms", stage, elapsed_ms);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback {
//!     completed: Arc::new(AtomicUsize::new(0)),
//! });
//!
//! let config = ExtractionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ExtractionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

use crate::output::ExtractionStage;

/// Called by the extraction pipeline as it moves through its stages.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Stages run sequentially, so methods are never
/// called concurrently for a single extraction; implementations still need
/// `Send + Sync` because stages execute on worker threads.
pub trait ExtractionProgressCallback: Send + Sync {
    /// Called when a stage begins.
    fn on_stage_start(&self, stage: ExtractionStage) {
        let _ = stage;
    }

    /// Called when a stage finishes successfully.
    ///
    /// # Arguments
    /// * `stage`      — the stage that just completed
    /// * `elapsed_ms` — wall-clock duration of the stage
    fn on_stage_complete(&self, stage: ExtractionStage, elapsed_ms: u64) {
        let _ = (stage, elapsed_ms);
    }

    /// Called when OCR output was unusable and the built-in sample COR text
    /// was substituted.
    ///
    /// # Arguments
    /// * `reason` — human-readable description of the recognition failure
    fn on_sample_substituted(&self, reason: &str) {
        let _ = reason;
    }

    /// Called once when the extraction finishes successfully.
    ///
    /// # Arguments
    /// * `courses`  — number of distinct courses found
    /// * `meetings` — number of schedule entries found
    fn on_extraction_complete(&self, courses: usize, meetings: usize) {
        let _ = (courses, meetings);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ExtractionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ExtractionConfig`].
pub type ProgressCallback = Arc<dyn ExtractionProgressCallback>;
