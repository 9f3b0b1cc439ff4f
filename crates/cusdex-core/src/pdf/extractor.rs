//! First-page loading and text extraction using lopdf and pdf-extract.

use lopdf::{Document, ObjectId};
use tracing::debug;

use super::Result;
use crate::error::PdfError;

/// A loaded declaration PDF.
///
/// Only the first page is ever read; the declaration form is a single-page
/// document and continuation sheets are out of scope.
#[derive(Debug)]
pub struct DeclarationPdf {
    document: Document,
    raw_data: Vec<u8>,
}

impl DeclarationPdf {
    /// Load a declaration from raw PDF bytes.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("loaded PDF with {} pages", page_count);
        Ok(Self {
            document: doc,
            raw_data,
        })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// Extract the text of the first page.
    ///
    /// Errors when nothing at all can be extracted; a scanned form with no
    /// text layer is document-fatal.
    pub fn first_page_text(&self) -> Result<String> {
        let full_text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let page_count = self.page_count() as usize;
        let text = if page_count <= 1 {
            full_text
        } else {
            // pdf-extract yields one stream for the whole document; take the
            // leading share of lines as the first page.
            let lines: Vec<&str> = full_text.lines().collect();
            let per_page = lines.len() / page_count;
            lines[..per_page.min(lines.len())].join("\n")
        };

        if text.trim().is_empty() {
            return Err(PdfError::NoText);
        }
        Ok(text)
    }

    pub(crate) fn document(&self) -> &Document {
        &self.document
    }

    pub(crate) fn first_page_id(&self) -> Option<ObjectId> {
        self.document.get_pages().values().next().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rejects_garbage() {
        let err = DeclarationPdf::load(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }
}
