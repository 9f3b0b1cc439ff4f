//! Regex patterns for response parsing and field post-processing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Leading bullet or list marker on a model output line.
    pub static ref BULLET_PREFIX: Regex = Regex::new(r"^[-*•]\s*").unwrap();

    /// Four-digit year followed by the sequence identifier.
    pub static ref DECLARANT_SEQUENCE: Regex = Regex::new(r"^(\d{4})\s*(.*)").unwrap();

    /// Reference line: optional one-letter type then a numeric id.
    pub static ref REFERENCE_LINE: Regex = Regex::new(r"^([A-Za-z])?\s*(\d+)").unwrap();

    /// DD/MM/YYYY date token.
    pub static ref DATE_DDMMYYYY: Regex = Regex::new(r"\b\d{2}/\d{2}/\d{4}\b").unwrap();

    /// Three-letter currency code followed by a decimal amount.
    pub static ref CURRENCY_AMOUNT: Regex = Regex::new(r"^([A-Z]{3})\s*([\d,]+\.\d{2})").unwrap();

    /// Redundant Box 22 label echo inside the value.
    pub static ref BOX22_PREFIX: Regex = Regex::new(r"& Total Amount Invoiced:\s*").unwrap();

    /// Redundant mass label echo inside the value.
    pub static ref MASS_PREFIX: Regex = Regex::new(r"Mass \(Kg\):\s*").unwrap();
}
