//! PDF processing module.

mod extractor;
pub mod regions;

pub use extractor::DeclarationPdf;
pub use regions::{Region, RegionBox, RegionHint, RegionMap, TextFragment};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;
