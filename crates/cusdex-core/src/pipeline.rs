//! End-to-end per-document extraction.

use tracing::{debug, info};

use crate::error::Result;
use crate::extract::Reconciler;
use crate::gemini::{GenerativeClient, build_prompt};
use crate::models::config::PdfConfig;
use crate::models::record::FieldMap;
use crate::pdf::{DeclarationPdf, RegionHint, RegionMap};

/// Seam for document-to-fields extraction.
///
/// The session drives batches through this trait so that record handling
/// stays testable without a live endpoint.
#[allow(async_fn_in_trait)]
pub trait DocumentExtractor {
    /// Extract the canonical field map from one document's bytes.
    ///
    /// Document-fatal and service-fatal conditions surface as errors; field
    /// level problems never do.
    async fn extract(&self, bytes: &[u8], filename: &str) -> Result<FieldMap>;
}

/// The production pipeline: PDF first page -> region hints -> prompt ->
/// generative endpoint -> reconciled record.
pub struct ExtractionPipeline {
    client: GenerativeClient,
    regions: RegionMap,
    reconciler: Reconciler,
    pdf_config: PdfConfig,
}

impl ExtractionPipeline {
    pub fn new(client: GenerativeClient) -> Self {
        Self::with_config(client, PdfConfig::default())
    }

    pub fn with_config(client: GenerativeClient, pdf_config: PdfConfig) -> Self {
        Self {
            client,
            regions: RegionMap::new(pdf_config.line_grouping_tolerance),
            reconciler: Reconciler::new(),
            pdf_config,
        }
    }

    /// Region hint text for a document, for diagnostics.
    pub fn hints(&self, bytes: &[u8]) -> Result<Vec<RegionHint>> {
        let pdf = DeclarationPdf::load(bytes)?;
        Ok(self
            .regions
            .hints_for(&pdf, self.pdf_config.fallback_page_height))
    }

    /// Build the prompt for a document without calling the service.
    pub fn prompt(&self, bytes: &[u8]) -> Result<String> {
        let pdf = DeclarationPdf::load(bytes)?;
        let document_text = pdf.first_page_text()?;
        let hints = self
            .regions
            .hints_for(&pdf, self.pdf_config.fallback_page_height);
        Ok(build_prompt(&document_text, &hints))
    }
}

impl DocumentExtractor for ExtractionPipeline {
    async fn extract(&self, bytes: &[u8], filename: &str) -> Result<FieldMap> {
        let pdf = DeclarationPdf::load(bytes)?;
        let document_text = pdf.first_page_text()?;
        info!(
            "extracting fields from {} ({} pages)",
            filename,
            pdf.page_count()
        );

        let hints = self
            .regions
            .hints_for(&pdf, self.pdf_config.fallback_page_height);
        let prompt = build_prompt(&document_text, &hints);
        debug!("prompt length: {} chars", prompt.len());

        let completion = self.client.generate(&prompt).await?;
        debug!("completion length: {} chars", completion.len());

        Ok(self.reconciler.reconcile(&completion, &document_text))
    }
}
