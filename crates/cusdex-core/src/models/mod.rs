//! Data models: canonical fields, records, configuration.

pub mod config;
pub mod fields;
pub mod record;

pub use config::{CusdexConfig, ExtractionConfig, ModelConfig, PdfConfig};
pub use fields::CanonicalField;
pub use record::{ERROR_SENTINEL, ExportTable, ExtractionRecord, FieldMap, RecordOutcome};
