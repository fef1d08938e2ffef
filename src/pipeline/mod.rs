//! Pipeline stages for COR-to-schedule extraction.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap
//! implementations (e.g. a different OCR backend) without touching other
//! stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ recognize ──▶ parse
//! (URL/path) (pdfium)  (OCR text)   (schedule)
//! ```
//!
//! 1. [`input`]     — canonicalise the user-supplied path or URL to a local file
//! 2. [`render`]    — rasterise the first page; runs in `spawn_blocking`
//!    because pdfium is not async-safe
//! 3. [`recognize`] — OCR the page image into plain text; when the result is
//!    degenerate the pipeline may substitute [`sample`] text
//! 4. parsing lives in [`crate::parser`]; it consumes the recognised text and
//!    owns no I/O
//!
//! The [`sample`] module carries the built-in mock COR used as a stand-in
//! when recognition fails or produces too little text.

pub mod input;
pub mod recognize;
pub mod render;
pub mod sample;
