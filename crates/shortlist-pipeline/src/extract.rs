//! PDF text extraction.

use tracing::debug;

use shortlist_core::{Error, Result, TextExtractor};

/// Extracts plain text from PDF bytes via `pdf-extract`.
///
/// A malformed or non-conforming document is a per-candidate failure; the
/// pipeline converts it to an empty-text candidate, same as a fetch failure.
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| Error::Internal(format!("PDF extraction failed: {}", e)))?;
        debug!(text_len = text.len(), "Extracted document text");
        Ok(text)
    }
}
