//! Currency/amount splitting and mass cleanup.

use super::patterns::{BOX22_PREFIX, CURRENCY_AMOUNT, MASS_PREFIX};

/// Split the combined Box 22 value into (currency, amount).
///
/// Accepts a `USD 12,345.67` shape after removing a redundant label echo.
/// Anything else is kept whole as the amount with an empty currency.
pub fn split_currency_amount(raw: &str) -> (String, String) {
    if raw.is_empty() {
        return (String::new(), String::new());
    }

    let value = BOX22_PREFIX.replace_all(raw, "").into_owned();
    match CURRENCY_AMOUNT.captures(&value) {
        Some(caps) => (caps[1].to_string(), caps[2].to_string()),
        None => (String::new(), value),
    }
}

/// Strip a redundant mass label echo from Box 35 / Box 38 values.
pub fn strip_mass_prefix(value: &str) -> String {
    MASS_PREFIX.replace_all(value, "").into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_with_label_echo() {
        assert_eq!(
            split_currency_amount("& Total Amount Invoiced: USD 12,345.67"),
            ("USD".to_string(), "12,345.67".to_string())
        );
    }

    #[test]
    fn test_split_plain_code_and_amount() {
        assert_eq!(
            split_currency_amount("EUR 1,000.00"),
            ("EUR".to_string(), "1,000.00".to_string())
        );
    }

    #[test]
    fn test_amount_without_code() {
        assert_eq!(
            split_currency_amount("12,345.67"),
            ("".to_string(), "12,345.67".to_string())
        );
    }

    #[test]
    fn test_unrecognized_shape_kept_whole() {
        assert_eq!(
            split_currency_amount("USD12345"),
            ("".to_string(), "USD12345".to_string())
        );
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(split_currency_amount(""), ("".to_string(), "".to_string()));
    }

    #[test]
    fn test_strip_mass_prefix() {
        assert_eq!(strip_mass_prefix("Mass (Kg): 450.00"), "450.00");
        assert_eq!(strip_mass_prefix("450.00"), "450.00");
        assert_eq!(strip_mass_prefix(""), "");
    }
}
