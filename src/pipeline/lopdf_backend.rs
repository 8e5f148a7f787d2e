//! Pure-Rust backend: read text runs straight from page content streams.
//!
//! Every text-showing operator yields one run, in stream order:
//!
//! | Operator | Operands | Run |
//! |----------|----------|-----|
//! | `Tj`     | `string` | the string |
//! | `'`      | `string` | the string |
//! | `"`      | `aw ac string` | the string |
//! | `TJ`     | `[string / number …]` | strings concatenated; a kerning gap wider than [`WORD_GAP`] becomes a space |
//!
//! Strings are decoded as UTF-16BE when they carry a byte-order mark and as
//! single-byte (Latin-1 compatible) text otherwise. Composite (CID) fonts
//! need a ToUnicode map to read correctly; use the pdfium backend for those.

use super::backend::{DocumentBackend, PageSource};
use crate::document::DocumentMetadata;
use crate::error::{PageError, Pdf2QuizError};
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use std::sync::Arc;
use tracing::debug;

/// `TJ` adjustments (thousandths of an em) at or below this read as a word break.
pub const WORD_GAP: f32 = -200.0;

/// The default backend, built on `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

impl DocumentBackend for LopdfBackend {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn open(&self, bytes: &[u8]) -> Result<Arc<dyn PageSource>, Pdf2QuizError> {
        let document = Document::load_mem(bytes)
            .map_err(|e| Pdf2QuizError::corrupt_container(format!("{e}")))?;

        // get_pages() is keyed by 1-based page number, so values come out in
        // document order.
        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
        debug!("lopdf opened document: {} pages", page_ids.len());

        Ok(Arc::new(LopdfPages { document, page_ids }))
    }
}

struct LopdfPages {
    document: Document,
    page_ids: Vec<ObjectId>,
}

impl PageSource for LopdfPages {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page_runs(&self, index: usize) -> Result<Vec<String>, PageError> {
        let page = index + 1;
        let page_id = *self.page_ids.get(index).ok_or_else(|| PageError::DecodeFailed {
            page,
            detail: format!("page out of range (document has {} pages)", self.page_ids.len()),
        })?;

        let data = self
            .document
            .get_page_content(page_id)
            .map_err(|e| PageError::DecodeFailed {
                page,
                detail: format!("content stream: {e}"),
            })?;

        let content = Content::decode(&data).map_err(|e| PageError::DecodeFailed {
            page,
            detail: format!("content operators: {e}"),
        })?;

        let runs = content
            .operations
            .iter()
            .filter_map(|op| text_run(&op.operator, &op.operands))
            .collect::<Vec<_>>();

        debug!("Page {}: {} text runs", page, runs.len());
        Ok(runs)
    }

    fn metadata(&self) -> DocumentMetadata {
        DocumentMetadata {
            title: self.info_string(b"Title"),
            author: self.info_string(b"Author"),
            subject: self.info_string(b"Subject"),
            producer: self.info_string(b"Producer"),
            page_count: self.page_ids.len(),
            pdf_version: self.document.version.clone(),
            backend: "lopdf".to_string(),
        }
    }
}

impl LopdfPages {
    /// A non-empty string entry of the trailer's `/Info` dictionary.
    fn info_string(&self, key: &[u8]) -> Option<String> {
        let info = self.document.trailer.get(b"Info").ok()?;
        let dict = match info {
            Object::Reference(id) => self.document.get_dictionary(*id).ok()?,
            Object::Dictionary(d) => d,
            _ => return None,
        };
        match dict.get(key).ok()? {
            Object::String(bytes, _) => {
                let s = decode_pdf_string(bytes);
                if s.is_empty() {
                    None
                } else {
                    Some(s)
                }
            }
            _ => None,
        }
    }
}

/// The run produced by one content-stream operation, if it shows text.
fn text_run(operator: &str, operands: &[Object]) -> Option<String> {
    match operator {
        "Tj" | "'" | "\"" => match operands.last()? {
            Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
            _ => None,
        },
        "TJ" => match operands.first()? {
            Object::Array(items) => Some(join_tj_array(items)),
            _ => None,
        },
        _ => None,
    }
}

fn join_tj_array(items: &[Object]) -> String {
    let mut run = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => run.push_str(&decode_pdf_string(bytes)),
            other => {
                if let Ok(adjust) = other.as_float() {
                    if adjust <= WORD_GAP && !run.is_empty() && !run.ends_with(' ') {
                        run.push(' ');
                    }
                }
            }
        }
    }
    run
}

/// Decode a PDF string object: UTF-16BE with BOM, else one byte per char.
pub(crate) fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::StringFormat;

    fn lit(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec(), StringFormat::Literal)
    }

    #[test]
    fn tj_yields_its_string() {
        assert_eq!(text_run("Tj", &[lit("Hello")]), Some("Hello".to_string()));
    }

    #[test]
    fn quote_operators_use_last_operand() {
        assert_eq!(text_run("'", &[lit("next line")]), Some("next line".into()));
        assert_eq!(
            text_run("\"", &[Object::Integer(1), Object::Integer(2), lit("spaced")]),
            Some("spaced".into())
        );
    }

    #[test]
    fn tj_array_concatenates_and_breaks_wide_gaps() {
        let arr = Object::Array(vec![
            lit("Rel"),
            Object::Integer(-30),
            lit("ativity"),
            Object::Integer(-250),
            lit("theory"),
        ]);
        assert_eq!(text_run("TJ", &[arr]), Some("Relativity theory".into()));
    }

    #[test]
    fn non_text_operators_are_ignored() {
        assert_eq!(text_run("Td", &[Object::Integer(10), Object::Integer(20)]), None);
        assert_eq!(text_run("BT", &[]), None);
        assert_eq!(text_run("Tj", &[]), None);
    }

    #[test]
    fn utf16_strings_with_bom() {
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0xE9];
        assert_eq!(decode_pdf_string(&bytes), "Hé");
    }

    #[test]
    fn single_byte_strings() {
        assert_eq!(decode_pdf_string(b"caf\xe9"), "café");
    }

    #[test]
    fn open_rejects_garbage_container() {
        let err = LopdfBackend
            .open(b"%PDF-1.7\nthis is not really a pdf")
            .err()
            .unwrap();
        assert!(matches!(
            err,
            Pdf2QuizError::CorruptDocument { page: None, .. }
        ));
    }
}
