//! Google PDFium backend (feature `pdfium`): page text objects via pdfium-render.
//!
//! pdfium copes with fonts the lopdf backend cannot read (CID fonts with
//! ToUnicode maps, Type3, embedded encodings).
//!
//! The upstream `Pdfium` handle is `!Send`, so every operation binds a fresh
//! instance on whichever blocking-pool thread it runs on. The OS caches the
//! `dlopen`, so repeat binds are cheap. Which library to bind is fixed when
//! the backend is constructed.

use super::backend::{DocumentBackend, PageSource};
use crate::document::DocumentMetadata;
use crate::error::{PageError, Pdf2QuizError};
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Backend bound to one pdfium shared library.
#[derive(Debug, Clone)]
pub struct PdfiumBackend {
    library: Option<PathBuf>,
}

impl PdfiumBackend {
    /// Create a backend, verifying the library is loadable (fail-fast).
    ///
    /// `library` is an explicit path to `libpdfium`; `None` binds the
    /// system library.
    pub fn new(library: Option<PathBuf>) -> Result<Self, Pdf2QuizError> {
        let _ = bind(library.as_deref())?;
        info!(
            "pdfium backend ready ({})",
            library
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "system library".to_string())
        );
        Ok(Self { library })
    }
}

fn bind(library: Option<&Path>) -> Result<Pdfium, Pdf2QuizError> {
    let bindings = match library {
        Some(path) => Pdfium::bind_to_library(path),
        None => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| Pdf2QuizError::BackendUnavailable {
        backend: "pdfium".into(),
        detail: format!("{e:?}"),
    })?;
    Ok(Pdfium::new(bindings))
}

impl DocumentBackend for PdfiumBackend {
    fn name(&self) -> &'static str {
        "pdfium"
    }

    fn open(&self, bytes: &[u8]) -> Result<Arc<dyn PageSource>, Pdf2QuizError> {
        let pdfium = bind(self.library.as_deref())?;
        let document = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| Pdf2QuizError::corrupt_container(format!("{e:?}")))?;

        let metadata = read_metadata(&document);
        debug!("pdfium opened document: {} pages", metadata.page_count);

        Ok(Arc::new(PdfiumPages {
            library: self.library.clone(),
            bytes: bytes.to_vec(),
            metadata,
        }))
    }
}

struct PdfiumPages {
    library: Option<PathBuf>,
    bytes: Vec<u8>,
    metadata: DocumentMetadata,
}

impl PageSource for PdfiumPages {
    fn page_count(&self) -> usize {
        self.metadata.page_count
    }

    fn page_runs(&self, index: usize) -> Result<Vec<String>, PageError> {
        let page_num = index + 1;
        let failed = |detail: String| PageError::DecodeFailed {
            page: page_num,
            detail,
        };

        let pdfium = bind(self.library.as_deref()).map_err(|e| failed(e.to_string()))?;
        let document = pdfium
            .load_pdf_from_byte_slice(&self.bytes, None)
            .map_err(|e| failed(format!("{e:?}")))?;

        let page_index =
            u16::try_from(index).map_err(|_| failed(format!("page index {index} exceeds u16")))?;
        let page = document
            .pages()
            .get(page_index)
            .map_err(|e| failed(format!("{e:?}")))?;

        let runs: Vec<String> = page
            .objects()
            .iter()
            .filter_map(|object| object.as_text_object().map(|t| t.text()))
            .collect();

        debug!("Page {}: {} text objects", page_num, runs.len());
        Ok(runs)
    }

    fn metadata(&self) -> DocumentMetadata {
        self.metadata.clone()
    }
}

fn read_metadata(document: &PdfDocument<'_>) -> DocumentMetadata {
    let metadata = document.metadata();
    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    DocumentMetadata {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        subject: get_meta(PdfDocumentMetadataTagType::Subject),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        page_count: document.pages().len() as usize,
        pdf_version: format!("{:?}", document.version()),
        backend: "pdfium".to_string(),
    }
}
