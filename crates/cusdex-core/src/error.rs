//! Error types for the cusdex-core library.

use thiserror::Error;

/// Main error type for the cusdex library.
#[derive(Error, Debug)]
pub enum CusdexError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Generative-model service error.
    #[error("model service error: {0}")]
    Model(#[from] ModelError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A session operation named a document that was never cached.
    #[error("unknown document: {0}")]
    UnknownDocument(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Failed to extract text from the PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The first page carries no extractable text.
    #[error("no text could be extracted from the first page")]
    NoText,
}

/// Errors related to the generative-text endpoint.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Transport-level failure (connect, TLS, timeout).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-200 status.
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not decode into the expected shape.
    #[error("malformed response body: {0}")]
    MalformedBody(String),

    /// The response decoded but contained no completion text.
    #[error("empty completion in response")]
    EmptyCompletion,
}

/// Result type for the cusdex library.
pub type Result<T> = std::result::Result<T, CusdexError>;
