//! Line-oriented reconciliation of model output into the canonical record.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::rules::patterns::BULLET_PREFIX;
use super::rules::{
    parse_customs_reference, reference_date, split_currency_amount, split_declarant_sequence,
    strip_mass_prefix,
};
use super::schema::{LabelTable, Target};
use crate::models::fields::CanonicalField;
use crate::models::record::FieldMap;

/// Best-effort reconciler for "Label: Value" model output.
///
/// The model's answers arrive with inconsistent bullets, label echoes, and
/// casing; parsing absorbs all of that. Lines that do not resolve are
/// dropped silently and the output always carries the complete canonical
/// schema, so a malformed completion can only ever cost individual fields.
pub struct Reconciler {
    table: &'static LabelTable,
}

impl Reconciler {
    pub fn new() -> Self {
        Self {
            table: LabelTable::shared(),
        }
    }

    /// Reconcile one completion against the original first-page text.
    ///
    /// `document_text` is consulted only for the reference date lookup; the
    /// completion is never trusted for it.
    pub fn reconcile(&self, completion: &str, document_text: &str) -> FieldMap {
        let mut raw = self.parse_lines(completion);
        let mut fields = FieldMap::new();

        let sequence = self.take(&mut raw, Target::DeclarantSequence);
        let (year, identifier) = split_declarant_sequence(&sequence);
        fields.set(CanonicalField::DeclarantSequenceYear, year);
        fields.set(CanonicalField::DeclarantSequenceIdentifier, identifier);

        let raw_reference = self.take(&mut raw, Target::CustomsReference);
        let (reference_type, numbers) = parse_customs_reference(&raw_reference);
        fields.set(CanonicalField::CustomsReferenceType, reference_type);
        fields.set(CanonicalField::CustomsReferenceNumber, numbers.join("\n"));
        fields.set(
            CanonicalField::CustomsReferenceDate,
            reference_date(document_text, &raw_reference),
        );

        for spec in self.table.specs() {
            if let Target::Canonical(field) = spec.target {
                if let Some(value) = raw.remove(spec.display) {
                    fields.set(field, value);
                }
            }
        }

        for field in [CanonicalField::GrossMass, CanonicalField::NetMass] {
            let cleaned = strip_mass_prefix(fields.get(field));
            fields.set(field, cleaned);
        }

        let combined = self.take(&mut raw, Target::CurrencyAmount);
        let (currency, amount) = split_currency_amount(&combined);
        fields.set(CanonicalField::Currency, currency);
        fields.set(CanonicalField::TotalAmountInvoiced, amount);

        fields
    }

    fn take(&self, raw: &mut HashMap<&'static str, String>, target: Target) -> String {
        self.table
            .specs()
            .iter()
            .find(|spec| spec.target == target)
            .and_then(|spec| raw.remove(spec.display))
            .unwrap_or_default()
    }

    /// Scan completion lines into display-label keyed values.
    ///
    /// Later lines overwrite earlier ones for the same label.
    fn parse_lines(&self, completion: &str) -> HashMap<&'static str, String> {
        let mut parsed = HashMap::new();

        for line in completion.trim().lines() {
            let line = line.trim();
            let line = BULLET_PREFIX.replace(line, "");

            let Some((key, value)) = line.split_once(": ") else {
                continue;
            };
            let key = key.trim();

            let Some(spec) = self.table.resolve(key) else {
                trace!("dropping unmapped label: {}", key);
                continue;
            };

            let cleaned = spec.strip_value_prefix(value.trim());
            parsed.insert(spec.display, cleaned);
        }

        debug!("parsed {} labeled fields from completion", parsed.len());
        parsed
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const COMPLETION: &str = "\
Here are the extracted fields:
- Customs Reference Code E: CBBE1
* Customs Reference Number: E 72766
Declarant's Sequence Number: 2024 #3041
Box 2: Exporter: ACME EXPORTS LTD
Box 8: Consignee: NORTHERN TRADERS
Box 22: Currency & Total Amount Invoiced: & Total Amount Invoiced: USD 12,345.67
Box 35: Gross Mass (Kg): Mass (Kg): 450.00
Box 38: Net Mass (Kg): 438.50
no separator on this line
Unknown Label: dropped silently
D.Qty: 1,200";

    const DOCUMENT_TEXT: &str =
        "SRI LANKA CUSTOMS E 72766 registered on 05/03/2024 at Colombo";

    #[test]
    fn test_reconcile_full_completion() {
        let fields = Reconciler::new().reconcile(COMPLETION, DOCUMENT_TEXT);

        assert_eq!(fields.get(CanonicalField::CustomsReferenceCodeE), "CBBE1");
        assert_eq!(fields.get(CanonicalField::CustomsReferenceType), "E");
        assert_eq!(fields.get(CanonicalField::CustomsReferenceNumber), "72766");
        assert_eq!(fields.get(CanonicalField::CustomsReferenceDate), "05/03/2024");
        assert_eq!(fields.get(CanonicalField::DeclarantSequenceYear), "2024");
        assert_eq!(fields.get(CanonicalField::DeclarantSequenceIdentifier), "#3041");
        assert_eq!(fields.get(CanonicalField::Exporter), "ACME EXPORTS LTD");
        assert_eq!(fields.get(CanonicalField::Consignee), "NORTHERN TRADERS");
        assert_eq!(fields.get(CanonicalField::Currency), "USD");
        assert_eq!(fields.get(CanonicalField::TotalAmountInvoiced), "12,345.67");
        assert_eq!(fields.get(CanonicalField::GrossMass), "450.00");
        assert_eq!(fields.get(CanonicalField::NetMass), "438.50");
        assert_eq!(fields.get(CanonicalField::DQty), "1,200");

        // Unanswered fields are present and empty.
        assert_eq!(fields.get(CanonicalField::ExchangeRate), "");
        assert_eq!(fields.iter_ordered().count(), 28);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let reconciler = Reconciler::new();
        let first = reconciler.reconcile(COMPLETION, DOCUMENT_TEXT);
        let second = reconciler.reconcile(COMPLETION, DOCUMENT_TEXT);
        assert_eq!(first, second);
    }

    #[test]
    fn test_last_write_wins_per_label() {
        let completion = "Box 2: FIRST ANSWER\nBox 2: Exporter: SECOND ANSWER";
        let fields = Reconciler::new().reconcile(completion, "");
        assert_eq!(fields.get(CanonicalField::Exporter), "SECOND ANSWER");
    }

    #[test]
    fn test_not_found_answers_are_kept_verbatim() {
        let completion = "Box 20: Delivery Terms: Not Found";
        let fields = Reconciler::new().reconcile(completion, "");
        assert_eq!(fields.get(CanonicalField::DeliveryTerms), "Not Found");
    }

    #[test]
    fn test_empty_completion_yields_complete_empty_schema() {
        let fields = Reconciler::new().reconcile("", "");
        assert_eq!(fields.iter_ordered().count(), 28);
        assert!(fields.iter_ordered().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn test_reference_continuation_lines_without_label_are_dropped() {
        let completion = "Customs Reference Number: E 72766\n76315: ignored";
        let fields = Reconciler::new().reconcile(completion, "");
        assert_eq!(fields.get(CanonicalField::CustomsReferenceNumber), "72766");
        assert_eq!(fields.get(CanonicalField::CustomsReferenceType), "E");
    }

    #[test]
    fn test_reference_date_prefers_date_after_block() {
        let completion = "Customs Reference Number: E 72766";
        let text = "01/01/2020 E 72766 then 05/03/2024";
        let fields = Reconciler::new().reconcile(completion, text);
        assert_eq!(fields.get(CanonicalField::CustomsReferenceDate), "05/03/2024");
    }

    #[test]
    fn test_reference_date_without_block_uses_first_date() {
        let fields = Reconciler::new().reconcile("", "cleared 12/11/2023 and 01/01/2024");
        assert_eq!(fields.get(CanonicalField::CustomsReferenceDate), "12/11/2023");
    }
}
