//! Document loading: validate the upload, open it, decode every page.
//!
//! ## Why spawn_blocking?
//!
//! Parsing a PDF and decoding content streams is CPU-bound work that would
//! stall tokio's worker threads. Both the container open and each page
//! decode run on the blocking pool.
//!
//! ## Order
//!
//! Pages are decoded up to `page_concurrency` at a time, but `buffered`
//! yields results in submission order, so the assembled page list always
//! matches document order no matter which page finishes first.
//!
//! ## Cancellation
//!
//! Dropping the future returned by [`DocumentLoader::load`] abandons the
//! load. Blocking tasks already running finish in the background, but their
//! results are discarded; no partially-decoded document is ever returned.

use super::backend::{DocumentBackend, PageSource};
use crate::document::{Page, ParsedDocument, RawDocument};
use crate::error::{PageError, Pdf2QuizError};
use crate::progress::ProgressCallback;
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns an uploaded buffer into a [`ParsedDocument`] through an injected backend.
#[derive(Clone)]
pub struct DocumentLoader {
    backend: Arc<dyn DocumentBackend>,
    page_concurrency: usize,
    progress: Option<ProgressCallback>,
}

impl DocumentLoader {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            backend,
            page_concurrency: 4,
            progress: None,
        }
    }

    pub fn with_page_concurrency(mut self, n: usize) -> Self {
        self.page_concurrency = n.max(1);
        self
    }

    pub fn with_progress(mut self, cb: Option<ProgressCallback>) -> Self {
        self.progress = cb;
        self
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Reject anything that is not declared and shaped as a PDF.
    ///
    /// Runs before any parsing attempt.
    pub fn validate(raw: &RawDocument) -> Result<(), Pdf2QuizError> {
        if !raw.declares_pdf() {
            return Err(Pdf2QuizError::UnsupportedFormat {
                detail: format!("declared media type '{}'", raw.media_type),
            });
        }
        if !raw.has_pdf_magic() {
            let head: Vec<u8> = raw.bytes.iter().take(4).copied().collect();
            return Err(Pdf2QuizError::UnsupportedFormat {
                detail: format!("first bytes {head:?} are not %PDF"),
            });
        }
        Ok(())
    }

    /// Validate and open the container without decoding any page.
    pub async fn open(&self, raw: &RawDocument) -> Result<Arc<dyn PageSource>, Pdf2QuizError> {
        Self::validate(raw)?;

        let backend = Arc::clone(&self.backend);
        let bytes = raw.bytes.clone();
        let source = tokio::task::spawn_blocking(move || backend.open(&bytes))
            .await
            .map_err(|e| Pdf2QuizError::Internal(format!("Open task panicked: {}", e)))??;

        info!(
            "Opened document with {}: {} pages",
            self.backend.name(),
            source.page_count()
        );
        Ok(source)
    }

    /// Load every page of `raw`.
    ///
    /// # Errors
    /// - [`Pdf2QuizError::UnsupportedFormat`]: wrong media type or not a PDF
    /// - [`Pdf2QuizError::CorruptDocument`]: container or page malformed
    pub async fn load(&self, raw: &RawDocument) -> Result<ParsedDocument, Pdf2QuizError> {
        let source = self.open(raw).await?;
        let total_pages = source.page_count();

        if let Some(ref cb) = self.progress {
            cb.on_extraction_start(total_pages);
        }

        let pages: Vec<Page> = self.decode_pages(source).try_collect().await?;
        debug!("Decoded {} pages", pages.len());

        Ok(ParsedDocument::new(pages))
    }

    /// Decode all pages of an opened document, yielding them in page order.
    pub fn decode_pages(
        &self,
        source: Arc<dyn PageSource>,
    ) -> impl Stream<Item = Result<Page, PageError>> + Send + 'static {
        let total_pages = source.page_count();
        let progress = self.progress.clone();

        stream::iter(0..total_pages)
            .map(move |index| {
                let source = Arc::clone(&source);
                let progress = progress.clone();
                async move {
                    let page_num = index + 1;
                    let result = tokio::task::spawn_blocking(move || source.page_runs(index))
                        .await
                        .map_err(|e| PageError::TaskFailed {
                            page: page_num,
                            detail: e.to_string(),
                        })
                        .and_then(|runs| runs);

                    if let Err(ref e) = result {
                        warn!("{}", e);
                    }
                    if let Some(ref cb) = progress {
                        match &result {
                            Ok(runs) => cb.on_page_extracted(page_num, total_pages, runs.len()),
                            Err(e) => cb.on_page_error(page_num, total_pages, &e.to_string()),
                        }
                    }

                    result.map(|runs| Page::new(page_num, runs))
                }
            })
            .buffered(self.page_concurrency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentMetadata;
    use std::time::Duration;

    /// Pages finish in reverse order: later pages return sooner.
    struct SlowFirstPages {
        pages: Vec<Vec<&'static str>>,
    }

    impl PageSource for SlowFirstPages {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn page_runs(&self, index: usize) -> Result<Vec<String>, PageError> {
            let delay = (self.pages.len() - index) as u64 * 15;
            std::thread::sleep(Duration::from_millis(delay));
            Ok(self.pages[index].iter().map(|s| s.to_string()).collect())
        }

        fn metadata(&self) -> DocumentMetadata {
            DocumentMetadata::default()
        }
    }

    struct StubBackend;

    impl DocumentBackend for StubBackend {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn open(&self, _bytes: &[u8]) -> Result<Arc<dyn PageSource>, Pdf2QuizError> {
            Ok(Arc::new(SlowFirstPages {
                pages: vec![vec!["one"], vec!["two", "2"], vec![], vec!["four"]],
            }))
        }
    }

    #[test]
    fn validate_rejects_wrong_media_type_before_magic() {
        let raw = RawDocument::new(b"%PDF-1.4".to_vec(), "image/png");
        let err = DocumentLoader::validate(&raw).unwrap_err();
        assert!(err.to_string().contains("image/png"));
    }

    #[test]
    fn validate_rejects_missing_magic() {
        let raw = RawDocument::pdf(b"PK\x03\x04rest".to_vec());
        assert!(matches!(
            DocumentLoader::validate(&raw),
            Err(Pdf2QuizError::UnsupportedFormat { .. })
        ));
    }

    #[tokio::test]
    async fn pages_keep_document_order_under_concurrency() {
        let loader = DocumentLoader::new(Arc::new(StubBackend)).with_page_concurrency(4);
        let doc = loader
            .load(&RawDocument::pdf(b"%PDF-stub".to_vec()))
            .await
            .unwrap();

        let numbers: Vec<usize> = doc.pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(doc.pages[1].runs, vec!["two", "2"]);
        assert!(doc.pages[2].runs.is_empty());
    }
}
