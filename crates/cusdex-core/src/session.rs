//! Session state: cached uploads and their extraction records.

use chrono::Utc;
use tracing::{info, warn};

use crate::error::{CusdexError, Result};
use crate::models::record::{ExportTable, ExtractionRecord};
use crate::pipeline::DocumentExtractor;

/// One uploaded document, read once and kept for the session.
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Explicit session state owned by the caller.
///
/// Holds cached document bytes and one record per processed document. Adding
/// a new file invalidates all previous records (a fresh batch); recapture
/// replaces a single record wholesale, never merging partial updates.
pub struct Session {
    user: String,
    documents: Vec<Document>,
    records: Vec<ExtractionRecord>,
}

impl Session {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            documents: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Cache a document's bytes. Returns true when the filename is new.
    pub fn add_document(&mut self, filename: impl Into<String>, bytes: Vec<u8>) -> bool {
        let filename = filename.into();
        if self.documents.iter().any(|d| d.filename == filename) {
            return false;
        }
        if !self.records.is_empty() {
            info!(
                "new upload detected, resetting {} existing records",
                self.records.len()
            );
            self.records.clear();
        }
        self.documents.push(Document { filename, bytes });
        true
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn records(&self) -> &[ExtractionRecord] {
        &self.records
    }

    /// Process every cached document sequentially, replacing all records.
    pub async fn extract_all<E: DocumentExtractor>(&mut self, extractor: &E) {
        self.records.clear();
        let filenames: Vec<String> = self.documents.iter().map(|d| d.filename.clone()).collect();
        for filename in filenames {
            // cannot fail: every filename comes from the cache
            self.capture(extractor, &filename).await.ok();
        }
    }

    /// Capture (or recapture) a single cached document.
    ///
    /// The resulting record replaces any previous one for the same file;
    /// extraction failures become error records, not `Err`.
    pub async fn capture<E: DocumentExtractor>(
        &mut self,
        extractor: &E,
        filename: &str,
    ) -> Result<&ExtractionRecord> {
        let document = self
            .documents
            .iter()
            .find(|d| d.filename == filename)
            .ok_or_else(|| CusdexError::UnknownDocument(filename.to_string()))?;

        let processed_at = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let record = match extractor.extract(&document.bytes, filename).await {
            Ok(fields) => {
                ExtractionRecord::success(filename, processed_at, self.user.clone(), fields)
            }
            Err(e) => {
                warn!("extraction failed for {}: {}", filename, e);
                ExtractionRecord::error(filename, processed_at, self.user.clone(), e.to_string())
            }
        };

        match self
            .records
            .iter()
            .position(|r| r.source_file == filename)
        {
            Some(index) => {
                self.records[index] = record;
                Ok(&self.records[index])
            }
            None => {
                self.records.push(record);
                let index = self.records.len() - 1;
                Ok(&self.records[index])
            }
        }
    }

    /// Render the fixed-column export table for all records.
    pub fn export_table(&self) -> ExportTable {
        ExportTable::from_records(&self.records)
    }
}
