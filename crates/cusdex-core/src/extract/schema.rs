//! Label schema mapping model output labels to canonical fields.

use lazy_static::lazy_static;

use crate::models::fields::CanonicalField;

/// What a parsed label feeds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Maps one-to-one onto a canonical field.
    Canonical(CanonicalField),
    /// Combined year + identifier, split during post-processing.
    DeclarantSequence,
    /// Raw multi-line reference block, parsed during post-processing.
    CustomsReference,
    /// Combined currency + amount, split during post-processing.
    CurrencyAmount,
}

/// One extractable label.
///
/// `short` is the compact form the model may echo back, `display` is the
/// form enumerated in the prompt. The prefix-normalization rule for the
/// label's values is precomputed here so parsing stays table-driven.
#[derive(Debug, Clone)]
pub struct LabelSpec {
    pub short: &'static str,
    pub display: &'static str,
    pub target: Target,
    prefixes: Vec<String>,
}

impl LabelSpec {
    fn new(short: &'static str, display: &'static str, target: Target) -> Self {
        Self {
            short,
            display,
            target,
            prefixes: prefix_candidates(short, display),
        }
    }

    /// Exact match against either label form.
    pub fn matches(&self, key: &str) -> bool {
        key == self.short || key == self.display
    }

    /// Remove one redundant leading label echo from a value.
    ///
    /// Candidates come from both label forms and their colon/whitespace
    /// sub-tokens, longest first, compared case-insensitively. Only the
    /// first match is removed.
    pub fn strip_value_prefix(&self, value: &str) -> String {
        let value = value.trim();
        for prefix in &self.prefixes {
            if let Some(head) = value.get(..prefix.len()) {
                if head.eq_ignore_ascii_case(prefix) {
                    return value[prefix.len()..].trim().to_string();
                }
            }
        }
        value.to_string()
    }
}

fn prefix_candidates(short: &str, display: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    for label in [short, display] {
        push_prefix_forms(&mut candidates, label);
        for token in label
            .split(|c: char| c == ':' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            push_prefix_forms(&mut candidates, token);
        }
    }
    candidates.sort();
    candidates.dedup();
    candidates.sort_by(|a, b| b.len().cmp(&a.len()));
    candidates
}

fn push_prefix_forms(candidates: &mut Vec<String>, label: &str) {
    candidates.push(format!("{}:", label));
    candidates.push(format!("{} :", label));
    candidates.push(format!("{} ", label));
}

/// The fixed table of labels the model is asked for.
#[derive(Debug)]
pub struct LabelTable {
    specs: Vec<LabelSpec>,
}

lazy_static! {
    static ref LABEL_TABLE: LabelTable = LabelTable::new();
}

impl LabelTable {
    pub fn new() -> Self {
        use CanonicalField::*;
        use Target::Canonical;

        let specs = vec![
            LabelSpec::new(
                "Customs Reference Code E",
                "Customs Reference Code E",
                Canonical(CustomsReferenceCodeE),
            ),
            LabelSpec::new(
                "Customs Reference Number",
                "Customs Reference Number",
                Target::CustomsReference,
            ),
            LabelSpec::new(
                "Declarant Sequence Number",
                "Declarant's Sequence Number",
                Target::DeclarantSequence,
            ),
            LabelSpec::new("Box 2", "Box 2: Exporter", Canonical(Exporter)),
            LabelSpec::new("Box 8", "Box 8: Consignee", Canonical(Consignee)),
            LabelSpec::new(
                "Box 9",
                "Box 9: Person Responsible for Financial Settlement",
                Canonical(FinancialSettlement),
            ),
            LabelSpec::new("Box 11", "Box 11: Trading", Canonical(Trading)),
            LabelSpec::new(
                "Box 14",
                "Box 14: Declarant/Representative",
                Canonical(Declarant),
            ),
            LabelSpec::new(
                "Box 15",
                "Box 15: Country of Export",
                Canonical(CountryOfExport),
            ),
            LabelSpec::new(
                "Box 16",
                "Box 16: Country of origin",
                Canonical(CountryOfOrigin),
            ),
            LabelSpec::new("Box 18", "Box 18: Vessel/Flight", Canonical(VesselFlight)),
            LabelSpec::new("Box 20", "Box 20: Delivery Terms", Canonical(DeliveryTerms)),
            LabelSpec::new(
                "Box 22",
                "Box 22: Currency & Total Amount Invoiced",
                Target::CurrencyAmount,
            ),
            LabelSpec::new("Box 23", "Box 23: Exchange Rate", Canonical(ExchangeRate)),
            LabelSpec::new(
                "Box 28",
                "Box 28: Financial and banking data",
                Canonical(BankingData),
            ),
            LabelSpec::new("Guarantee LKR", "Guarantee LKR", Canonical(GuaranteeLkr)),
            LabelSpec::new("Box 31", "Box 31: Description", Canonical(Description)),
            LabelSpec::new(
                "Marks & Nos of Packages",
                "Marks & Nos of Packages",
                Canonical(MarksAndNumbers),
            ),
            LabelSpec::new("Number & Kind", "Number & Kind", Canonical(NumberAndKind)),
            LabelSpec::new(
                "Box 33",
                "Box 33: Commodity (HS) Code",
                Canonical(CommodityCode),
            ),
            LabelSpec::new("Box 35", "Box 35: Gross Mass (Kg)", Canonical(GrossMass)),
            LabelSpec::new("Box 38", "Box 38: Net Mass (Kg)", Canonical(NetMass)),
            LabelSpec::new("D.Val", "D.Val", Canonical(DVal)),
            LabelSpec::new("D.Qty", "D.Qty", Canonical(DQty)),
        ];

        Self { specs }
    }

    /// Process-wide shared instance.
    pub fn shared() -> &'static LabelTable {
        &LABEL_TABLE
    }

    /// Resolve a parsed key against the table.
    pub fn resolve(&self, key: &str) -> Option<&LabelSpec> {
        self.specs.iter().find(|spec| spec.matches(key))
    }

    pub fn specs(&self) -> &[LabelSpec] {
        &self.specs
    }

    /// Display labels in prompt order.
    pub fn display_labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.iter().map(|spec| spec.display)
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_resolve_by_short_and_display_label() {
        let table = LabelTable::shared();

        let by_short = table.resolve("Box 2").unwrap();
        let by_display = table.resolve("Box 2: Exporter").unwrap();
        assert_eq!(by_short.display, by_display.display);

        assert!(table.resolve("Box 99").is_none());
        assert!(table.resolve("box 2").is_none());
    }

    #[test]
    fn test_prompt_lists_24_labels() {
        assert_eq!(LabelTable::shared().display_labels().count(), 24);
    }

    #[test]
    fn test_strip_value_prefix_longest_first() {
        let spec = LabelTable::shared().resolve("Box 2").unwrap();

        // Full display-label echo outranks its sub-tokens.
        assert_eq!(
            spec.strip_value_prefix("Box 2: Exporter: ACME EXPORTS LTD"),
            "ACME EXPORTS LTD"
        );
        assert_eq!(spec.strip_value_prefix("Exporter: ACME"), "ACME");
        assert_eq!(spec.strip_value_prefix("ACME EXPORTS LTD"), "ACME EXPORTS LTD");
    }

    #[test]
    fn test_strip_value_prefix_is_case_insensitive() {
        let spec = LabelTable::shared().resolve("Box 35").unwrap();
        assert_eq!(spec.strip_value_prefix("box 35: 450.00"), "450.00");
    }

    #[test]
    fn test_strip_value_prefix_removes_only_one_prefix() {
        let spec = LabelTable::shared().resolve("Box 11").unwrap();
        assert_eq!(spec.strip_value_prefix("Trading: Trading: 4"), "Trading: 4");
    }
}
