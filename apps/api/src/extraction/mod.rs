//! Text Extraction: turns an uploaded document into plain text.
//!
//! PDFs go through a page extractor; anything else, and any PDF the
//! extractor chokes on, is read as (lossy) UTF-8 text.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

const PDF_MAGIC: &[u8] = b"%PDF-";
const PAGE_BREAK: char = '\x0c';

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Could not read the uploaded document: {0}")]
    Read(String),

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),
}

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct Document {
    pub bytes: Bytes,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

impl Document {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: None,
            content_type: None,
        }
    }

    /// Declared type, file extension or magic bytes.
    pub fn is_pdf(&self) -> bool {
        let declared = self
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.eq_ignore_ascii_case("application/pdf"));
        let named = self
            .file_name
            .as_deref()
            .is_some_and(|name| name.to_ascii_lowercase().ends_with(".pdf"));
        declared || named || self.bytes.starts_with(PDF_MAGIC)
    }
}

/// Page-by-page text extraction for binary documents.
pub trait PageExtractor: Send + Sync {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

/// `pdf-extract` backed extractor. Pages are split on form feeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfPageExtractor;

impl PageExtractor for PdfPageExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        // pdf-extract panics on some malformed documents.
        let text = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
            .map_err(|_| ExtractionError::Pdf("extractor panicked".to_string()))?
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?;
        Ok(text.split(PAGE_BREAK).map(str::to_string).collect())
    }
}

/// Reads a document from disk. The only fatal path: a file that cannot be
/// read at all.
pub async fn read_document(path: &Path) -> Result<Document, ExtractionError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ExtractionError::Read(format!("{}: {e}", path.display())))?;
    Ok(Document {
        file_name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
        ..Document::new(bytes)
    })
}

/// Best-effort plain text for a document. Never fails: extractor errors fall
/// back to reading the raw bytes as text.
pub fn extract_text(document: &Document, extractor: &dyn PageExtractor) -> String {
    if document.is_pdf() {
        match extractor.extract_pages(&document.bytes) {
            Ok(pages) => {
                debug!("Extracted {} page(s) from PDF", pages.len());
                return pages.join("\n");
            }
            Err(e) => warn!("Falling back to raw text for {:?}: {e}", document.file_name),
        }
    }
    String::from_utf8_lossy(&document.bytes).into_owned()
}
