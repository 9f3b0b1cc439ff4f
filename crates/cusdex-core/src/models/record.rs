//! Extraction records and the derived export table.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::fields::CanonicalField;

/// Sentinel written into every domain column of an errored record.
pub const ERROR_SENTINEL: &str = "N/A due to error";

/// Values for the canonical output schema.
///
/// Structurally complete: reading a field that was never set yields the
/// empty string, and ordered iteration always visits all 28 fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    values: HashMap<CanonicalField, String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for a field, empty string when absent.
    pub fn get(&self, field: CanonicalField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: CanonicalField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Iterate every canonical field in export order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        CanonicalField::ALL.iter().map(|f| (*f, self.get(*f)))
    }

    /// Render as a label-keyed JSON object in export order.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (field, value) in self.iter_ordered() {
            map.insert(field.label().to_string(), Value::String(value.to_string()));
        }
        Value::Object(map)
    }
}

/// Outcome of processing one document.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// Reconciled field values.
    Fields(FieldMap),
    /// Document-fatal or service-fatal failure message.
    Error(String),
}

/// One processed document: metadata plus outcome.
///
/// Replaced wholesale on recapture, never merged field-by-field.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRecord {
    /// Source filename as uploaded.
    pub source_file: String,
    /// UTC processing timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub processed_at: String,
    /// User the processing ran on behalf of.
    pub processed_by: String,
    pub outcome: RecordOutcome,
}

impl ExtractionRecord {
    pub fn success(
        source_file: impl Into<String>,
        processed_at: impl Into<String>,
        processed_by: impl Into<String>,
        fields: FieldMap,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            processed_at: processed_at.into(),
            processed_by: processed_by.into(),
            outcome: RecordOutcome::Fields(fields),
        }
    }

    pub fn error(
        source_file: impl Into<String>,
        processed_at: impl Into<String>,
        processed_by: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            processed_at: processed_at.into(),
            processed_by: processed_by.into(),
            outcome: RecordOutcome::Error(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, RecordOutcome::Error(_))
    }

    pub fn fields(&self) -> Option<&FieldMap> {
        match &self.outcome {
            RecordOutcome::Fields(fields) => Some(fields),
            RecordOutcome::Error(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            RecordOutcome::Fields(_) => None,
            RecordOutcome::Error(message) => Some(message),
        }
    }
}

/// Derived tabular view of a set of records, fixed column order.
#[derive(Debug, Clone, Default)]
pub struct ExportTable {
    rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Column headers: metadata, error marker, then the canonical fields.
    pub fn columns() -> Vec<&'static str> {
        let mut columns = vec![
            "Source File",
            "Processing DateTime (UTC)",
            "Processed By User",
            "Error",
        ];
        columns.extend(CanonicalField::ALL.iter().map(|f| f.label()));
        columns
    }

    /// Build the table from records, one row per record, in record order.
    pub fn from_records(records: &[ExtractionRecord]) -> Self {
        let rows = records
            .iter()
            .map(|record| {
                let mut row = vec![
                    record.source_file.clone(),
                    record.processed_at.clone(),
                    record.processed_by.clone(),
                ];
                match &record.outcome {
                    RecordOutcome::Fields(fields) => {
                        row.push(String::new());
                        row.extend(fields.iter_ordered().map(|(_, v)| v.to_string()));
                    }
                    RecordOutcome::Error(message) => {
                        row.push(message.clone());
                        row.extend(
                            std::iter::repeat_n(ERROR_SENTINEL.to_string(), CanonicalField::ALL.len()),
                        );
                    }
                }
                row
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_field_map_is_structurally_complete() {
        let fields = FieldMap::new();
        assert_eq!(fields.iter_ordered().count(), 28);
        assert_eq!(fields.get(CanonicalField::Currency), "");
    }

    #[test]
    fn test_field_map_json_uses_labels() {
        let mut fields = FieldMap::new();
        fields.set(CanonicalField::Currency, "USD");

        let json = fields.to_json();
        assert_eq!(json["Currency"], "USD");
        assert_eq!(json["Box 2: Exporter"], "");
    }

    #[test]
    fn test_export_columns() {
        let columns = ExportTable::columns();
        assert_eq!(columns.len(), 4 + 28);
        assert_eq!(columns[0], "Source File");
        assert_eq!(columns[3], "Error");
        assert_eq!(columns[4], "Customs Reference Code E");
    }

    #[test]
    fn test_error_record_renders_sentinel_row() {
        let record = ExtractionRecord::error(
            "broken.pdf",
            "2024-05-01 10:00:00",
            "inspector",
            "PDF has no pages",
        );

        let table = ExportTable::from_records(std::slice::from_ref(&record));
        let row = &table.rows()[0];

        assert_eq!(row.len(), 4 + 28);
        assert_eq!(row[0], "broken.pdf");
        assert_eq!(row[3], "PDF has no pages");
        assert!(row[4..].iter().all(|v| v == ERROR_SENTINEL));
    }

    #[test]
    fn test_success_record_has_empty_error_column() {
        let mut fields = FieldMap::new();
        fields.set(CanonicalField::Exporter, "ACME EXPORTS LTD");

        let record =
            ExtractionRecord::success("decl.pdf", "2024-05-01 10:00:00", "inspector", fields);
        let table = ExportTable::from_records(std::slice::from_ref(&record));
        let row = &table.rows()[0];

        assert_eq!(row[3], "");
        // Box 2 sits directly after the reference/sequence block.
        assert_eq!(row[4 + 6], "ACME EXPORTS LTD");
    }
}
