//! Pipeline stages for document-to-questions conversion.
//!
//! Each submodule implements exactly one transformation step, so each can
//! be tested alone and swapped (a different PDF backend, a model-backed
//! question strategy) without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! load ──▶ extract ──▶ select ──▶ synthesize
//! (bytes)   (text)     (sentences) (questions)
//! ```
//!
//! 1. [`load`]: validate the upload and decode pages through a
//!    [`backend::DocumentBackend`]; the only stage with concurrency
//! 2. [`extract`]: join runs and pages into one linear string
//! 3. [`select`]: keep the first meaningful sentences
//! 4. [`synthesize`]: one question per sentence per enabled
//!    [`strategy::GenerationStrategy`]

pub mod backend;
pub mod extract;
pub mod load;
pub mod lopdf_backend;
#[cfg(feature = "pdfium")]
pub mod pdfium_backend;
pub mod select;
pub mod strategy;
pub mod synthesize;
