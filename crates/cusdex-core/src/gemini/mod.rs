//! Generative-language endpoint integration: prompt assembly and client.

mod client;
mod prompt;

pub use client::GenerativeClient;
pub use prompt::build_prompt;

use crate::error::ModelError;

/// Result type for model-service operations.
pub type Result<T> = std::result::Result<T, ModelError>;
