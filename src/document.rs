//! Document-side data types: what goes into the pipeline and what the
//! extraction half hands to the question half.
//!
//! ```text
//! RawDocument ──load──▶ ParsedDocument { Page { runs } … } ──extract──▶ ExtractedText
//! ```

use crate::error::Pdf2QuizError;
use crate::pipeline::extract::RUN_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// The only media type the loader accepts.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Leading bytes of every PDF file.
pub const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// An uploaded document: opaque bytes plus the media type the caller declared.
///
/// Owned by the caller and only ever borrowed by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

impl RawDocument {
    pub fn new(bytes: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
        }
    }

    /// Bytes declared as `application/pdf`.
    pub fn pdf(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(bytes, PDF_MEDIA_TYPE)
    }

    /// Read a local file, inferring the media type from its extension.
    ///
    /// A `.pdf` extension (any case) declares `application/pdf`; anything
    /// else is declared `application/octet-stream` and will be rejected by
    /// the loader.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Pdf2QuizError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => Pdf2QuizError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Pdf2QuizError::FileNotFound {
                path: path.to_path_buf(),
            },
        })?;

        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        let media_type = if is_pdf {
            PDF_MEDIA_TYPE
        } else {
            "application/octet-stream"
        };

        debug!("Read {} bytes from {} as {}", bytes.len(), path.display(), media_type);
        Ok(Self::new(bytes, media_type))
    }

    /// Whether the declared media type is `application/pdf`.
    ///
    /// Comparison is case-insensitive and ignores parameters after `;`.
    pub fn declares_pdf(&self) -> bool {
        let essence = self
            .media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        essence.eq_ignore_ascii_case(PDF_MEDIA_TYPE)
    }

    /// Whether the buffer starts with the `%PDF` magic.
    pub fn has_pdf_magic(&self) -> bool {
        self.bytes.starts_with(PDF_MAGIC)
    }
}

/// One page: its text runs in content-stream order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-indexed page number.
    pub number: usize,
    pub runs: Vec<String>,
}

impl Page {
    pub fn new(number: usize, runs: Vec<String>) -> Self {
        Self { number, runs }
    }

    /// Runs joined by [`RUN_SEPARATOR`].
    pub fn text(&self) -> String {
        self.runs.join(RUN_SEPARATOR)
    }
}

/// Every page of a loaded document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub pages: Vec<Page>,
}

impl ParsedDocument {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// The linear text of a whole document.
///
/// Runs on one page are joined by a space, pages by a newline. No
/// whitespace, case or Unicode normalisation is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A preview of at most `max_chars` characters.
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.0.char_indices().nth(max_chars) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ExtractedText {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ExtractedText {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ExtractedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Document metadata read without extracting any text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub producer: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
    /// Name of the backend that opened the document.
    pub backend: String,
}

/// The text of a single page, as emitted by the streaming API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-indexed page number.
    pub page_num: usize,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_pdf_ignores_case_and_parameters() {
        assert!(RawDocument::new(vec![], "application/pdf").declares_pdf());
        assert!(RawDocument::new(vec![], "Application/PDF").declares_pdf());
        assert!(RawDocument::new(vec![], "application/pdf; charset=binary").declares_pdf());
        assert!(!RawDocument::new(vec![], "text/plain").declares_pdf());
        assert!(!RawDocument::new(vec![], "").declares_pdf());
    }

    #[test]
    fn magic_check() {
        assert!(RawDocument::pdf(b"%PDF-1.7\n".to_vec()).has_pdf_magic());
        assert!(!RawDocument::pdf(b"PK\x03\x04".to_vec()).has_pdf_magic());
        assert!(!RawDocument::pdf(Vec::new()).has_pdf_magic());
    }

    #[test]
    fn page_text_joins_runs_with_single_space() {
        let page = Page::new(1, vec!["Hello".into(), "world".into(), "".into()]);
        assert_eq!(page.text(), "Hello world ");
        assert_eq!(Page::new(2, vec![]).text(), "");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let text = ExtractedText::new("héllo wörld");
        assert_eq!(text.preview(4), "héll");
        assert_eq!(text.preview(100), "héllo wörld");
    }

    #[test]
    fn from_path_missing_file() {
        let err = RawDocument::from_path("/definitely/not/here.pdf").unwrap_err();
        assert!(matches!(err, Pdf2QuizError::FileNotFound { .. }));
    }

    #[test]
    fn from_path_infers_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("doc.PDF");
        let txt = dir.path().join("notes.txt");
        std::fs::write(&pdf, b"%PDF-1.4").unwrap();
        std::fs::write(&txt, b"hello").unwrap();

        assert!(RawDocument::from_path(&pdf).unwrap().declares_pdf());
        assert!(!RawDocument::from_path(&txt).unwrap().declares_pdf());
    }
}
