//! # edgequake-pdf2quiz
//!
//! Turn uploaded PDF documents into study questions.
//!
//! A document is decoded into plain text once; questions are then drawn from
//! that text as often as the caller likes, each time with a different mix of
//! question strategies. Every question points back at the sentence it came
//! from.
//!
//! ## Pipeline Overview
//!
//! ```text
//! RawDocument (bytes + media type)
//!  │
//!  ├─ 1. Load        validate, open, decode pages (spawn_blocking, buffered)
//!  ├─ 2. Extract     pages → one linear ExtractedText
//!  │                 ── process() stops here ──
//!  ├─ 3. Select      first meaningful sentences (≤ 5)
//!  └─ 4. Synthesize  one question per sentence per enabled strategy
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_pdf2quiz::{format_report, GenerationOptions, PipelineConfig, QuestionPipeline, RawDocument};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = QuestionPipeline::new(PipelineConfig::default())?;
//!     let raw = RawDocument::from_path("lecture.pdf")?;
//!
//!     let text = pipeline.process(&raw).await?;
//!     let questions = pipeline.generate(&text, &GenerationOptions::default());
//!     print!("{}", format_report(&questions));
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `cli`    | on      | Enables the `pdf2quiz` binary (clap + anyhow + tracing-subscriber + indicatif) |
//! | `pdfium` | off     | Adds a pdfium-backed document backend next to the pure-Rust lopdf one |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! edgequake-pdf2quiz = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod document;
pub mod error;
pub mod orchestrate;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod stream;
pub mod templates;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{GenerationOptions, PipelineConfig, PipelineConfigBuilder, SelectionLimits};
pub use document::{DocumentMetadata, ExtractedText, Page, PageText, ParsedDocument, RawDocument};
pub use error::{PageError, Pdf2QuizError};
pub use orchestrate::{generate, inspect, process, process_sync, QuestionPipeline};
pub use output::{GeneratedQuestion, QuestionId, SentenceCandidate, StrategyKind};
pub use pipeline::backend::{DocumentBackend, PageSource};
pub use pipeline::strategy::{
    FixedPicker, GenerationStrategy, QuestionRequest, RandomPicker, SeededPicker,
    TemplatePicker, TemplateStrategy,
};
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use report::{format_report, questions_json};
pub use stream::{extract_stream, PageStream};
