//! Core library for CUSDEC II declaration data extraction.
//!
//! This crate provides:
//! - First-page PDF handling (text plus fixed-region hint extraction)
//! - Extraction prompt assembly for a generative-text endpoint
//! - The endpoint client
//! - Response parsing and reconciliation into a canonical 28-field record
//! - Session state, record assembly, and tabular export

pub mod error;
pub mod extract;
pub mod gemini;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod session;

pub use error::{CusdexError, ModelError, PdfError, Result};
pub use extract::Reconciler;
pub use gemini::{GenerativeClient, build_prompt};
pub use models::{
    CanonicalField, CusdexConfig, ERROR_SENTINEL, ExportTable, ExtractionRecord, FieldMap,
    RecordOutcome,
};
pub use pdf::{DeclarationPdf, RegionHint, RegionMap};
pub use pipeline::{DocumentExtractor, ExtractionPipeline};
pub use session::{Document, Session};
