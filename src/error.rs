//! Error types for the edgequake-pdf2quiz library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Pdf2QuizError`]: **Fatal**: the document cannot be turned into text
//!   at all (wrong media type, corrupt container, a page that will not
//!   decode). Returned as `Err(Pdf2QuizError)` from `process` and friends.
//!
//! * [`PageError`]: **Per page**: carried by the streaming API so callers
//!   that consume pages one by one can see which page broke.
//!
//! Sentence selection and question synthesis never fail. An empty document,
//! zero candidate sentences or zero questions are valid results, not errors.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the edgequake-pdf2quiz library.
#[derive(Debug, Error)]
pub enum Pdf2QuizError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The declared media type or the leading bytes are not a PDF.
    ///
    /// Raised before any parsing is attempted.
    #[error("Unsupported document format: {detail}\nOnly application/pdf is accepted.")]
    UnsupportedFormat { detail: String },

    /// Input file was not found at the given path.
    #[error("Document not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    // ── Document errors ───────────────────────────────────────────────────
    /// The format was accepted but the container or one page is malformed.
    ///
    /// `page` is 1-indexed and `None` when parsing failed before any page
    /// was reached (header, xref, trailer).
    #[error("{}", corrupt_message(.page, .detail))]
    CorruptDocument { page: Option<usize>, detail: String },

    // ── Backend errors ────────────────────────────────────────────────────
    /// The configured PDF backend could not be initialised.
    #[error("PDF backend '{backend}' is unavailable: {detail}")]
    BackendUnavailable { backend: String, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

fn corrupt_message(page: &Option<usize>, detail: &str) -> String {
    match page {
        Some(p) => format!("Document is corrupt at page {p}: {detail}"),
        None => format!("Document is corrupt: {detail}"),
    }
}

impl Pdf2QuizError {
    /// Page-level corruption at a 1-indexed page.
    pub fn corrupt_page(page: usize, detail: impl Into<String>) -> Self {
        Pdf2QuizError::CorruptDocument {
            page: Some(page),
            detail: detail.into(),
        }
    }

    /// Container-level corruption (no page reached yet).
    pub fn corrupt_container(detail: impl Into<String>) -> Self {
        Pdf2QuizError::CorruptDocument {
            page: None,
            detail: detail.into(),
        }
    }
}

/// A failure tied to a single page, surfaced by the streaming API.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum PageError {
    /// The page's content stream could not be decoded.
    #[error("Page {page}: decoding failed: {detail}")]
    DecodeFailed { page: usize, detail: String },

    /// The blocking decode task did not complete.
    #[error("Page {page}: decode task aborted: {detail}")]
    TaskFailed { page: usize, detail: String },
}

impl From<PageError> for Pdf2QuizError {
    fn from(e: PageError) -> Self {
        match e {
            PageError::DecodeFailed { page, detail } => Pdf2QuizError::corrupt_page(page, detail),
            PageError::TaskFailed { page, detail } => {
                Pdf2QuizError::Internal(format!("page {page} decode task: {detail}"))
            }
        }
    }
}
