//! Canonical output fields for a CUSDEC II declaration.

/// One of the fixed named output fields of an extraction record.
///
/// Every assembled record carries all of these, defaulting to an empty
/// string when the model gave no usable answer. The declaration order
/// matches the export column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalField {
    CustomsReferenceCodeE,
    CustomsReferenceType,
    CustomsReferenceNumber,
    CustomsReferenceDate,
    DeclarantSequenceYear,
    DeclarantSequenceIdentifier,
    /// Box 2: Exporter.
    Exporter,
    /// Box 8: Consignee.
    Consignee,
    /// Box 9: Person responsible for financial settlement.
    FinancialSettlement,
    /// Box 11: Trading.
    Trading,
    /// Box 14: Declarant/Representative.
    Declarant,
    /// Box 15: Country of export.
    CountryOfExport,
    /// Box 16: Country of origin.
    CountryOfOrigin,
    /// Box 18: Vessel/Flight.
    VesselFlight,
    /// Box 20: Delivery terms.
    DeliveryTerms,
    Currency,
    TotalAmountInvoiced,
    /// Box 23: Exchange rate.
    ExchangeRate,
    /// Box 28: Financial and banking data.
    BankingData,
    GuaranteeLkr,
    /// Box 31: Description.
    Description,
    MarksAndNumbers,
    NumberAndKind,
    /// Box 33: Commodity (HS) code.
    CommodityCode,
    /// Box 35: Gross mass.
    GrossMass,
    /// Box 38: Net mass.
    NetMass,
    DVal,
    DQty,
}

impl CanonicalField {
    /// All canonical fields in export column order.
    pub const ALL: [CanonicalField; 28] = [
        CanonicalField::CustomsReferenceCodeE,
        CanonicalField::CustomsReferenceType,
        CanonicalField::CustomsReferenceNumber,
        CanonicalField::CustomsReferenceDate,
        CanonicalField::DeclarantSequenceYear,
        CanonicalField::DeclarantSequenceIdentifier,
        CanonicalField::Exporter,
        CanonicalField::Consignee,
        CanonicalField::FinancialSettlement,
        CanonicalField::Trading,
        CanonicalField::Declarant,
        CanonicalField::CountryOfExport,
        CanonicalField::CountryOfOrigin,
        CanonicalField::VesselFlight,
        CanonicalField::DeliveryTerms,
        CanonicalField::Currency,
        CanonicalField::TotalAmountInvoiced,
        CanonicalField::ExchangeRate,
        CanonicalField::BankingData,
        CanonicalField::GuaranteeLkr,
        CanonicalField::Description,
        CanonicalField::MarksAndNumbers,
        CanonicalField::NumberAndKind,
        CanonicalField::CommodityCode,
        CanonicalField::GrossMass,
        CanonicalField::NetMass,
        CanonicalField::DVal,
        CanonicalField::DQty,
    ];

    /// The display label used in prompts, records, and export headers.
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalField::CustomsReferenceCodeE => "Customs Reference Code E",
            CanonicalField::CustomsReferenceType => "Customs Reference Type",
            CanonicalField::CustomsReferenceNumber => "Customs Reference Number",
            CanonicalField::CustomsReferenceDate => "Customs Reference Date",
            CanonicalField::DeclarantSequenceYear => "Declarant Sequence Year",
            CanonicalField::DeclarantSequenceIdentifier => "Declarant Sequence Identifier",
            CanonicalField::Exporter => "Box 2: Exporter",
            CanonicalField::Consignee => "Box 8: Consignee",
            CanonicalField::FinancialSettlement => {
                "Box 9: Person Responsible for Financial Settlement"
            }
            CanonicalField::Trading => "Box 11: Trading",
            CanonicalField::Declarant => "Box 14: Declarant/Representative",
            CanonicalField::CountryOfExport => "Box 15: Country of Export",
            CanonicalField::CountryOfOrigin => "Box 16: Country of origin",
            CanonicalField::VesselFlight => "Box 18: Vessel/Flight",
            CanonicalField::DeliveryTerms => "Box 20: Delivery Terms",
            CanonicalField::Currency => "Currency",
            CanonicalField::TotalAmountInvoiced => "Total Amount Invoiced",
            CanonicalField::ExchangeRate => "Box 23: Exchange Rate",
            CanonicalField::BankingData => "Box 28: Financial and banking data",
            CanonicalField::GuaranteeLkr => "Guarantee LKR",
            CanonicalField::Description => "Box 31: Description",
            CanonicalField::MarksAndNumbers => "Marks & Nos of Packages",
            CanonicalField::NumberAndKind => "Number & Kind",
            CanonicalField::CommodityCode => "Box 33: Commodity (HS) Code",
            CanonicalField::GrossMass => "Box 35: Gross Mass (Kg)",
            CanonicalField::NetMass => "Box 38: Net Mass (Kg)",
            CanonicalField::DVal => "D.Val",
            CanonicalField::DQty => "D.Qty",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_fields_present_once() {
        let labels: HashSet<&str> = CanonicalField::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels.len(), 28);
    }

    #[test]
    fn test_export_order_starts_with_reference_block() {
        assert_eq!(
            CanonicalField::ALL[0].label(),
            "Customs Reference Code E"
        );
        assert_eq!(CanonicalField::ALL[27].label(), "D.Qty");
    }
}
