//! Configuration types for the document-to-questions pipeline.
//!
//! Pipeline behaviour is controlled through [`PipelineConfig`], built via its
//! [`PipelineConfigBuilder`]. Which strategies run on a given `generate` call
//! is a per-call choice and lives in [`GenerationOptions`] instead.

use crate::error::Pdf2QuizError;
use crate::output::StrategyKind;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Configuration for a [`crate::QuestionPipeline`].
///
/// # Example
/// ```rust
/// use edgequake_pdf2quiz::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .page_concurrency(8)
///     .seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Clone)]
pub struct PipelineConfig {
    /// Number of pages decoded at once. Default: 4.
    ///
    /// Decoding runs on tokio's blocking pool; results are always joined in
    /// page order regardless of completion order.
    pub page_concurrency: usize,

    /// Sentence-selection thresholds. Default: [`SelectionLimits::default`].
    pub selection: SelectionLimits,

    /// Seed for template selection. Default: None (true randomness).
    ///
    /// With a seed, the same text and options always produce the same
    /// questions.
    pub seed: Option<u64>,

    /// Explicit pdfium shared-library path for the pdfium backend.
    /// If None, the system library is used.
    pub pdfium_library: Option<PathBuf>,

    /// Use the pdfium backend instead of lopdf. Default: false.
    ///
    /// Only honoured when the crate is built with the `pdfium` feature.
    pub use_pdfium: bool,

    /// Per-page extraction events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            page_concurrency: 4,
            selection: SelectionLimits::default(),
            seed: None,
            pdfium_library: None,
            use_pdfium: false,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("page_concurrency", &self.page_concurrency)
            .field("selection", &self.selection)
            .field("seed", &self.seed)
            .field("pdfium_library", &self.pdfium_library)
            .field("use_pdfium", &self.use_pdfium)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ExtractionProgressCallback>"),
            )
            .finish()
    }
}

impl PipelineConfig {
    /// Create a new builder for `PipelineConfig`.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn page_concurrency(mut self, n: usize) -> Self {
        self.config.page_concurrency = n.max(1);
        self
    }

    pub fn selection(mut self, limits: SelectionLimits) -> Self {
        self.config.selection = limits;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn pdfium_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_library = Some(path.into());
        self.config.use_pdfium = true;
        self
    }

    pub fn use_pdfium(mut self, v: bool) -> Self {
        self.config.use_pdfium = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PipelineConfig, Pdf2QuizError> {
        let c = &self.config;
        if c.page_concurrency == 0 {
            return Err(Pdf2QuizError::InvalidConfig(
                "Page concurrency must be ≥ 1".into(),
            ));
        }
        if c.selection.max_candidates == 0 {
            return Err(Pdf2QuizError::InvalidConfig(
                "max_candidates must be ≥ 1".into(),
            ));
        }
        if c.use_pdfium && !cfg!(feature = "pdfium") {
            return Err(Pdf2QuizError::InvalidConfig(
                "pdfium backend requested but the crate was built without the `pdfium` feature"
                    .into(),
            ));
        }
        Ok(self.config)
    }
}

/// Thresholds deciding which sentences are worth asking about.
///
/// A segment is kept when it has strictly more than `min_chars` characters
/// and strictly more than `min_words` whitespace-delimited tokens. Scanning
/// stops once `max_candidates` have been kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionLimits {
    pub min_chars: usize,
    pub min_words: usize,
    pub max_candidates: usize,
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            min_chars: 20,
            min_words: 4,
            max_candidates: 5,
        }
    }
}

/// Which strategies run on a `generate` call.
///
/// Each flag is independent. All-off is a valid input that yields no
/// questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub template: bool,
    pub contextual: bool,
    pub generative: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::all()
    }
}

impl GenerationOptions {
    pub fn all() -> Self {
        Self {
            template: true,
            contextual: true,
            generative: true,
        }
    }

    pub fn none() -> Self {
        Self {
            template: false,
            contextual: false,
            generative: false,
        }
    }

    /// Only `kind` enabled.
    pub fn only(kind: StrategyKind) -> Self {
        Self::none().with(kind, true)
    }

    /// Copy with `kind` set to `enabled`.
    pub fn with(mut self, kind: StrategyKind, enabled: bool) -> Self {
        match kind {
            StrategyKind::Template => self.template = enabled,
            StrategyKind::Contextual => self.contextual = enabled,
            StrategyKind::Generative => self.generative = enabled,
        }
        self
    }

    pub fn is_enabled(&self, kind: StrategyKind) -> bool {
        match kind {
            StrategyKind::Template => self.template,
            StrategyKind::Contextual => self.contextual,
            StrategyKind::Generative => self.generative,
        }
    }

    /// Enabled strategies in the fixed output order.
    pub fn enabled(&self) -> impl Iterator<Item = StrategyKind> + '_ {
        StrategyKind::ORDER
            .into_iter()
            .filter(move |k| self.is_enabled(*k))
    }

    pub fn any_enabled(&self) -> bool {
        self.enabled().next().is_some()
    }
}
