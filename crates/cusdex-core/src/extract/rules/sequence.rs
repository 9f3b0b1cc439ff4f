//! Declarant sequence number splitting.

use super::patterns::DECLARANT_SEQUENCE;

/// Split the combined declarant sequence value into (year, identifier).
///
/// The usual shape is `2024 #3041`. Without a leading four-digit year the
/// value splits on its first space; a single token that is not plain
/// alphanumeric (`#3041`) is an identifier with no year.
pub fn split_declarant_sequence(raw: &str) -> (String, String) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return (String::new(), String::new());
    }

    if let Some(caps) = DECLARANT_SEQUENCE.captures(trimmed) {
        return (caps[1].to_string(), caps[2].trim().to_string());
    }

    match trimmed.split_once(' ') {
        Some((year, identifier)) => (year.to_string(), identifier.to_string()),
        None => {
            let alphanumeric = trimmed.chars().all(char::is_alphanumeric);
            if trimmed.starts_with('#') || !alphanumeric {
                (String::new(), trimmed.to_string())
            } else {
                (trimmed.to_string(), String::new())
            }
        }
    }
}
