//! Customs reference block parsing and reference date lookup.

use super::patterns::{DATE_DDMMYYYY, REFERENCE_LINE};

/// Parse the raw multi-line reference block into (type, numbers).
///
/// Each line contributes its bare numeric id; the one-letter type is taken
/// from the first line only. Lines matching no pattern pass through
/// verbatim rather than being dropped.
pub fn parse_customs_reference(raw: &str) -> (String, Vec<String>) {
    let mut reference_type = String::new();
    let mut numbers = Vec::new();

    for (index, line) in raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
    {
        match REFERENCE_LINE.captures(line) {
            Some(caps) => {
                if index == 0 {
                    if let Some(t) = caps.get(1) {
                        reference_type = t.as_str().to_string();
                    }
                }
                numbers.push(caps[2].to_string());
            }
            None => numbers.push(line.to_string()),
        }
    }

    (reference_type, numbers)
}

/// Find the registration date belonging to the reference block.
///
/// Scans the original document text (not the model output) for DD/MM/YYYY
/// tokens: the first one positioned after the raw block wins, falling back
/// to the first date anywhere, or empty when the text has none.
pub fn reference_date(document_text: &str, raw_reference: &str) -> String {
    if raw_reference.is_empty() {
        return DATE_DDMMYYYY
            .find(document_text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
    }

    let matches: Vec<_> = DATE_DDMMYYYY.find_iter(document_text).collect();
    if matches.is_empty() {
        return String::new();
    }

    let reference_position = document_text
        .find(raw_reference)
        .map(|p| p as i64)
        .unwrap_or(-1);

    matches
        .iter()
        .find(|m| m.start() as i64 > reference_position)
        .unwrap_or(&matches[0])
        .as_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_typed_reference_lines() {
        let (reference_type, numbers) = parse_customs_reference("E 72766\n76315");
        assert_eq!(reference_type, "E");
        assert_eq!(numbers, vec!["72766".to_string(), "76315".to_string()]);
    }

    #[test]
    fn test_type_taken_from_first_line_only() {
        let (reference_type, numbers) = parse_customs_reference("72766\nE 76315");
        assert_eq!(reference_type, "");
        assert_eq!(numbers, vec!["72766".to_string(), "76315".to_string()]);
    }

    #[test]
    fn test_unmatched_lines_pass_through() {
        let (reference_type, numbers) = parse_customs_reference("E 72766\nPENDING");
        assert_eq!(reference_type, "E");
        assert_eq!(numbers, vec!["72766".to_string(), "PENDING".to_string()]);
    }

    #[test]
    fn test_empty_block() {
        let (reference_type, numbers) = parse_customs_reference("  \n ");
        assert_eq!(reference_type, "");
        assert!(numbers.is_empty());
    }

    #[test]
    fn test_date_after_reference_block() {
        let text = "header 01/01/2020 ... E 72766 registered 05/03/2024 cleared";
        assert_eq!(reference_date(text, "E 72766"), "05/03/2024");
    }

    #[test]
    fn test_date_falls_back_to_first_when_none_follow() {
        let text = "05/03/2024 then E 72766 at the end";
        assert_eq!(reference_date(text, "E 72766"), "05/03/2024");
    }

    #[test]
    fn test_date_without_reference_block() {
        let text = "issued 12/11/2023 and 01/01/2024";
        assert_eq!(reference_date(text, ""), "12/11/2023");
    }

    #[test]
    fn test_no_date_anywhere() {
        assert_eq!(reference_date("no dates here", "E 72766"), "");
        assert_eq!(reference_date("no dates here", ""), "");
    }
}
