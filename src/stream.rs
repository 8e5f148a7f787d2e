//! Streaming extraction API: emit page text as pages are decoded.
//!
//! Long documents can take a while to decode. A stream lets callers show
//! partial text immediately or write pages out incrementally instead of
//! waiting for [`crate::orchestrate::QuestionPipeline::process`].
//!
//! Unlike the eager path, a failed page does not end the stream: it is
//! yielded as an `Err` item and the remaining pages still arrive. Items come
//! out in page order; up to `page_concurrency` pages decode at once.

use crate::config::PipelineConfig;
use crate::document::{PageText, RawDocument};
use crate::error::{PageError, Pdf2QuizError};
use crate::orchestrate::QuestionPipeline;
use futures::stream::StreamExt;
use std::pin::Pin;
use tokio_stream::Stream;
use tracing::info;

/// A boxed stream of per-page text.
pub type PageStream = Pin<Box<dyn Stream<Item = Result<PageText, PageError>> + Send>>;

impl QuestionPipeline {
    /// Open `raw` and stream the text of each page in page order.
    ///
    /// Progress callbacks see `on_extraction_start` and one page event per
    /// page; `on_extraction_complete` is never fired here.
    ///
    /// # Returns
    /// - `Ok(PageStream)`: a stream of `Result<PageText, PageError>`
    /// - `Err(Pdf2QuizError)`: fatal error (not a PDF, unreadable container)
    pub async fn extract_stream(&self, raw: &RawDocument) -> Result<PageStream, Pdf2QuizError> {
        let source = self.loader.open(raw).await?;
        info!("Streaming {} pages", source.page_count());

        if let Some(ref cb) = self.config.progress_callback {
            cb.on_extraction_start(source.page_count());
        }

        let s = self.loader.decode_pages(source).map(|result| {
            result.map(|page| PageText {
                page_num: page.number,
                text: page.text(),
            })
        });
        Ok(Box::pin(s))
    }
}

/// Stream page text from `raw` using a pipeline built from `config`.
///
/// # Example
/// ```rust,no_run
/// use edgequake_pdf2quiz::{extract_stream, PipelineConfig, RawDocument};
/// use futures::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let raw = RawDocument::from_path("lecture.pdf")?;
/// let mut pages = extract_stream(&raw, &PipelineConfig::default()).await?;
/// while let Some(page) = pages.next().await {
///     match page {
///         Ok(p) => println!("Page {}: {} chars", p.page_num, p.text.len()),
///         Err(e) => eprintln!("Error: {e}"),
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub async fn extract_stream(
    raw: &RawDocument,
    config: &PipelineConfig,
) -> Result<PageStream, Pdf2QuizError> {
    QuestionPipeline::new(config.clone())?
        .extract_stream(raw)
        .await
}
