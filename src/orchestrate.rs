//! Pipeline entry points.
//!
//! The caller drives two separate actions, and the API mirrors them:
//!
//! * [`QuestionPipeline::process`] runs when a document arrives (load → extract).
//!   Async, the only fallible step.
//! * [`QuestionPipeline::generate`] runs when questions are requested
//!   (select → synthesize). Synchronous, total, and can be re-run on the same text
//!   with different options without touching the document again.
//!
//! Neither call keeps state between invocations. A failed `process` returns
//! only the error, so whatever text the caller already holds stays valid.

use crate::config::{GenerationOptions, PipelineConfig};
use crate::document::{DocumentMetadata, ExtractedText, RawDocument};
use crate::error::Pdf2QuizError;
use crate::output::GeneratedQuestion;
use crate::pipeline::backend::{backend_from_config, DocumentBackend};
use crate::pipeline::extract::extract;
use crate::pipeline::load::DocumentLoader;
use crate::pipeline::select::select_with;
use crate::pipeline::strategy::{GenerationStrategy, RandomPicker, SeededPicker, TemplatePicker};
use crate::pipeline::synthesize::Synthesizer;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// A configured document-to-questions pipeline.
///
/// Cheap to clone; clones share the backend and strategies.
#[derive(Clone)]
pub struct QuestionPipeline {
    pub(crate) config: PipelineConfig,
    pub(crate) loader: DocumentLoader,
    synthesizer: Synthesizer,
}

impl QuestionPipeline {
    /// Build a pipeline whose backend and picker come from `config`.
    ///
    /// # Errors
    /// [`Pdf2QuizError::BackendUnavailable`] when the pdfium backend is
    /// requested but cannot be bound.
    pub fn new(config: PipelineConfig) -> Result<Self, Pdf2QuizError> {
        let backend = backend_from_config(&config)?;
        Ok(Self::with_backend(config, backend))
    }

    /// Build a pipeline around an explicit backend.
    pub fn with_backend(config: PipelineConfig, backend: Arc<dyn DocumentBackend>) -> Self {
        let loader = DocumentLoader::new(backend)
            .with_page_concurrency(config.page_concurrency)
            .with_progress(config.progress_callback.clone());
        let synthesizer = Synthesizer::new(picker_for(&config));
        Self {
            config,
            loader,
            synthesizer,
        }
    }

    /// Replace the template picker of all built-in strategies.
    ///
    /// Custom strategies registered earlier are dropped.
    pub fn with_picker(mut self, picker: Arc<dyn TemplatePicker>) -> Self {
        self.synthesizer = Synthesizer::new(picker);
        self
    }

    /// Register a strategy in place of the built-in one of the same kind.
    pub fn with_strategy(mut self, strategy: Arc<dyn GenerationStrategy>) -> Self {
        self.synthesizer = self.synthesizer.with_strategy(strategy);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn backend_name(&self) -> &'static str {
        self.loader.backend_name()
    }

    /// Turn an uploaded document into linear text.
    ///
    /// Either the whole text is returned or an error is; dropping the
    /// future cancels the call with nothing left behind.
    ///
    /// # Errors
    /// - [`Pdf2QuizError::UnsupportedFormat`]: not declared or shaped as a PDF
    /// - [`Pdf2QuizError::CorruptDocument`]: container or page malformed
    pub async fn process(&self, raw: &RawDocument) -> Result<ExtractedText, Pdf2QuizError> {
        let start = Instant::now();
        info!(
            "Processing {} bytes ({}) with {}",
            raw.bytes.len(),
            raw.media_type,
            self.loader.backend_name()
        );

        let parsed = self.loader.load(raw).await?;
        let total_pages = parsed.page_count();
        let text = extract(&parsed);
        drop(parsed);

        if let Some(ref cb) = self.config.progress_callback {
            cb.on_extraction_complete(total_pages, text.len());
        }

        info!(
            "Processed {} pages into {} bytes in {}ms",
            total_pages,
            text.len(),
            start.elapsed().as_millis()
        );
        Ok(text)
    }

    /// Generate questions from already-extracted text.
    pub fn generate(
        &self,
        text: &ExtractedText,
        options: &GenerationOptions,
    ) -> Vec<GeneratedQuestion> {
        let candidates = select_with(text, &self.config.selection);
        let questions = self.synthesizer.synthesize(&candidates, options);
        debug!(
            "Generated {} questions from {} candidates",
            questions.len(),
            candidates.len()
        );
        questions
    }

    /// Read document metadata without extracting any page text.
    pub async fn inspect(&self, raw: &RawDocument) -> Result<DocumentMetadata, Pdf2QuizError> {
        let source = self.loader.open(raw).await?;
        Ok(source.metadata())
    }
}

fn picker_for(config: &PipelineConfig) -> Arc<dyn TemplatePicker> {
    match config.seed {
        Some(seed) => Arc::new(SeededPicker::new(seed)),
        None => Arc::new(RandomPicker),
    }
}

/// [`QuestionPipeline::process`] with the default configuration.
pub async fn process(raw: &RawDocument) -> Result<ExtractedText, Pdf2QuizError> {
    QuestionPipeline::new(PipelineConfig::default())?
        .process(raw)
        .await
}

/// [`QuestionPipeline::generate`] with the default configuration.
pub fn generate(text: &ExtractedText, options: &GenerationOptions) -> Vec<GeneratedQuestion> {
    let candidates = select_with(text, &PipelineConfig::default().selection);
    Synthesizer::new(Arc::new(RandomPicker)).synthesize(&candidates, options)
}

/// Synchronous wrapper around [`QuestionPipeline::process`].
///
/// Creates a temporary tokio runtime internally.
pub fn process_sync(
    raw: &RawDocument,
    config: &PipelineConfig,
) -> Result<ExtractedText, Pdf2QuizError> {
    let pipeline = QuestionPipeline::new(config.clone())?;
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2QuizError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(pipeline.process(raw))
}

/// Extract document metadata with the default backend.
pub async fn inspect(raw: &RawDocument) -> Result<DocumentMetadata, Pdf2QuizError> {
    QuestionPipeline::new(PipelineConfig::default())?
        .inspect(raw)
        .await
}
