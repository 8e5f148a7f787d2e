//! PDF backend seam: how a byte buffer becomes pages of text runs.
//!
//! The loader never talks to a PDF library directly. It is handed a
//! [`DocumentBackend`] at construction time, which opens a buffer into a
//! [`PageSource`] that can decode any page on demand. Backend setup (for
//! pdfium: which shared library to bind) is therefore a constructor
//! argument, not process-wide state, and tests can swap in a stub.

use crate::config::PipelineConfig;
use crate::document::DocumentMetadata;
use crate::error::{PageError, Pdf2QuizError};
use std::sync::Arc;

use super::lopdf_backend::LopdfBackend;

/// Opens raw PDF bytes.
///
/// `open` parses the container only; page content is decoded lazily by
/// [`PageSource::page_runs`] so the loader can fan pages out.
pub trait DocumentBackend: Send + Sync {
    /// Short backend name for logs and metadata.
    fn name(&self) -> &'static str;

    /// Parse the container.
    ///
    /// # Errors
    /// [`Pdf2QuizError::CorruptDocument`] with `page: None` when the
    /// header, cross-reference table or page tree cannot be read.
    fn open(&self, bytes: &[u8]) -> Result<Arc<dyn PageSource>, Pdf2QuizError>;
}

/// An opened document whose pages can be decoded independently.
///
/// Implementations must be `Send + Sync`: pages are decoded concurrently
/// on tokio's blocking pool.
pub trait PageSource: Send + Sync {
    fn page_count(&self) -> usize;

    /// Text runs of the page at 0-based `index`, in content-stream order.
    fn page_runs(&self, index: usize) -> Result<Vec<String>, PageError>;

    fn metadata(&self) -> DocumentMetadata;
}

/// Pick the backend described by `config`.
///
/// lopdf unless `use_pdfium` is set and the `pdfium` feature is compiled in.
pub fn backend_from_config(
    config: &PipelineConfig,
) -> Result<Arc<dyn DocumentBackend>, Pdf2QuizError> {
    if config.use_pdfium {
        #[cfg(feature = "pdfium")]
        {
            let backend =
                super::pdfium_backend::PdfiumBackend::new(config.pdfium_library.clone())?;
            return Ok(Arc::new(backend));
        }
        #[cfg(not(feature = "pdfium"))]
        {
            return Err(Pdf2QuizError::BackendUnavailable {
                backend: "pdfium".into(),
                detail: "built without the `pdfium` feature".into(),
            });
        }
    }
    Ok(Arc::new(LopdfBackend))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_selects_lopdf() {
        let backend = backend_from_config(&PipelineConfig::default()).unwrap();
        assert_eq!(backend.name(), "lopdf");
    }

    #[cfg(not(feature = "pdfium"))]
    #[test]
    fn pdfium_without_feature_is_unavailable() {
        let config = PipelineConfig {
            use_pdfium: true,
            ..PipelineConfig::default()
        };
        let err = backend_from_config(&config).err().unwrap();
        assert!(matches!(err, Pdf2QuizError::BackendUnavailable { .. }));
    }
}
