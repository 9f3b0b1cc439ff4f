//! Extraction prompt assembly.

use std::fmt::Write;

use crate::extract::schema::LabelTable;
use crate::pdf::RegionHint;

/// Build the extraction prompt for one first page.
///
/// Pure and deterministic: region hints as labeled context lines, the
/// per-field formatting rules, the enumerated target labels, and the full
/// page text appended last.
pub fn build_prompt(document_text: &str, hints: &[RegionHint]) -> String {
    let mut hint_block = String::new();
    for hint in hints {
        if hint.full_text {
            let _ = writeln!(
                hint_block,
                "Full text found in the approximate region of {}: \"{}\"",
                hint.name, hint.text
            );
        } else {
            let example = hint
                .example
                .map(|e| format!(" (e.g., {})", e))
                .unwrap_or_default();
            let _ = writeln!(
                hint_block,
                "Text found in the approximate region of {}{}: \"{}\"",
                hint.name, example, hint.text
            );
        }
    }

    let field_list = LabelTable::shared()
        .display_labels()
        .map(|label| format!("- {}", label))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Analyze the following text from the first page of a SRI LANKA CUSTOMS-GOODS DECLARATION (CUSDEC II) document.\n\
{hint_block}\
Extract the following specific fields. For each field, look for the associated label and extract the value next to it.\n\
For 'Customs Reference Code E', use the text provided from its approximate region (e.g., CBBE1).\n\
For 'Customs Reference Number', extract all reference numbers (e.g., E 72766, E 76315, etc.) and keep the original lines.\n\
For 'Declarant's Sequence Number', use the text provided from its approximate region (e.g., 2024 #3041).\n\
For 'Marks & Nos of Packages', 'Number & Kind', and 'Description', extract the relevant text block under Box 31 and split according to the sublabels.\n\
Return fields in \"FieldName: FieldValue\" format. Use FieldName exactly as specified below.\n\
Common Fields to Extract:\n\
{field_list}\n\
If a field is not found, indicate 'Not Found'.\n\
Document text:\n\
{document_text}"
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_hints() -> Vec<RegionHint> {
        vec![
            RegionHint {
                name: "Customs Reference Code E",
                example: Some("CBBE1"),
                full_text: false,
                text: "CBBE1".to_string(),
            },
            RegionHint {
                name: "Box 31",
                example: None,
                full_text: true,
                text: "GARMENTS\n450 CARTONS".to_string(),
            },
        ]
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let hints = sample_hints();
        let a = build_prompt("page text", &hints);
        let b = build_prompt("page text", &hints);
        assert_eq!(a, b);
    }

    #[test]
    fn test_prompt_contains_hints_and_fields() {
        let prompt = build_prompt("DECLARATION BODY", &sample_hints());

        assert!(prompt.starts_with("Analyze the following text"));
        assert!(prompt.contains(
            "Text found in the approximate region of Customs Reference Code E (e.g., CBBE1): \"CBBE1\""
        ));
        assert!(prompt.contains("Full text found in the approximate region of Box 31:"));
        assert!(prompt.contains("- Box 22: Currency & Total Amount Invoiced"));
        assert!(prompt.contains("- Box 38: Net Mass (Kg)"));
        assert!(prompt.contains("indicate 'Not Found'"));
        assert!(prompt.ends_with("Document text:\nDECLARATION BODY"));
    }

    #[test]
    fn test_prompt_with_no_hints_keeps_field_list() {
        let prompt = build_prompt("text", &[]);
        assert!(prompt.contains("Common Fields to Extract:"));
        assert!(!prompt.contains("approximate region"));
    }
}
