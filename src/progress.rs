//! Progress-callback trait for per-page extraction events.
//!
//! Inject an [`Arc<dyn ExtractionProgressCallback>`] via
//! [`crate::config::PipelineConfigBuilder::progress_callback`] to receive
//! events while `process` decodes a document. Only extraction reports
//! progress; question generation is a synchronous in-memory step.
//!
//! # Example
//!
//! ```rust
//! use edgequake_pdf2quiz::{ExtractionProgressCallback, PipelineConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     pages: AtomicUsize,
//! }
//!
//! impl ExtractionProgressCallback for CountingCallback {
//!     fn on_page_extracted(&self, page_num: usize, total_pages: usize, run_count: usize) {
//!         self.pages.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("Page {}/{}: {} runs", page_num, total_pages, run_count);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { pages: AtomicUsize::new(0) });
//!
//! let config = PipelineConfig::builder()
//!     .progress_callback(counter as Arc<dyn ExtractionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the pipeline as it decodes each page.
///
/// Pages are decoded concurrently, so `on_page_extracted` may be called from
/// several blocking-pool threads at once and not in page order. All methods
/// default to no-ops.
pub trait ExtractionProgressCallback: Send + Sync {
    /// Called once the container is open and the page count is known.
    fn on_extraction_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called when one page's text runs have been decoded.
    ///
    /// # Arguments
    /// * `page_num`: 1-indexed page number
    /// * `total_pages`: total pages in the document
    /// * `run_count`: number of text runs found on the page
    fn on_page_extracted(&self, page_num: usize, total_pages: usize, run_count: usize) {
        let _ = (page_num, total_pages, run_count);
    }

    /// Called when a page fails to decode.
    ///
    /// `process` fails with this page's error, but pages already being
    /// decoded may still report `on_page_extracted` afterwards. The
    /// streaming API keeps going and reports the remaining pages.
    fn on_page_error(&self, page_num: usize, total_pages: usize, error: &str) {
        let _ = (page_num, total_pages, error);
    }

    /// Called once after every page decoded and the text was assembled.
    ///
    /// Fired by `process` only. A page stream has no assembly step, so its
    /// consumer sees the end of the stream instead.
    fn on_extraction_complete(&self, total_pages: usize, text_len: usize) {
        let _ = (total_pages, text_len);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ExtractionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::PipelineConfig`].
pub type ProgressCallback = Arc<dyn ExtractionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        started_total: AtomicUsize,
        pages: AtomicUsize,
        runs: AtomicUsize,
        errors: AtomicUsize,
        completed_len: AtomicUsize,
    }

    impl ExtractionProgressCallback for TrackingCallback {
        fn on_extraction_start(&self, total_pages: usize) {
            self.started_total.store(total_pages, Ordering::SeqCst);
        }

        fn on_page_extracted(&self, _page_num: usize, _total_pages: usize, run_count: usize) {
            self.pages.fetch_add(1, Ordering::SeqCst);
            self.runs.fetch_add(run_count, Ordering::SeqCst);
        }

        fn on_page_error(&self, _page_num: usize, _total_pages: usize, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_extraction_complete(&self, _total_pages: usize, text_len: usize) {
            self.completed_len.store(text_len, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_extraction_start(5);
        cb.on_page_extracted(1, 5, 12);
        cb.on_page_error(2, 5, "bad stream");
        cb.on_extraction_complete(5, 1024);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_extraction_start(3);
        tracker.on_page_extracted(2, 3, 4);
        tracker.on_page_extracted(1, 3, 6);
        tracker.on_page_error(3, 3, "truncated");
        tracker.on_extraction_complete(3, 99);

        assert_eq!(tracker.started_total.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.pages.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.runs.load(Ordering::SeqCst), 10);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.completed_len.load(Ordering::SeqCst), 99);
    }
}
