//! Field-specific post-processing rules.

pub mod amounts;
pub mod patterns;
pub mod reference;
pub mod sequence;

pub use amounts::{split_currency_amount, strip_mass_prefix};
pub use reference::{parse_customs_reference, reference_date};
pub use sequence::split_declarant_sequence;
