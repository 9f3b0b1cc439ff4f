//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the cusdex pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CusdexConfig {
    /// Generative-model service configuration.
    pub model: ModelConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Extraction and record-assembly configuration.
    pub extraction: ExtractionConfig,
}

impl Default for CusdexConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            pdf: PdfConfig::default(),
            extraction: ExtractionConfig::default(),
        }
    }
}

/// Generative-text endpoint configuration.
///
/// The API key is deliberately not part of the config file; it is read
/// from the environment at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Full `generateContent` endpoint URL.
    pub endpoint: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
                .to_string(),
            timeout_secs: 30,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Page height assumed when the MediaBox cannot be resolved (A4 points).
    pub fallback_page_height: f32,

    /// Vertical tolerance when grouping region fragments into lines (points).
    pub line_grouping_tolerance: f32,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            fallback_page_height: 842.0,
            line_grouping_tolerance: 4.0,
        }
    }
}

/// Extraction and record-assembly configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// User name attached to every record's metadata.
    pub processing_user: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            processing_user: "cusdex".to_string(),
        }
    }
}

impl CusdexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roundtrip() {
        let config = CusdexConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: CusdexConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.model.timeout_secs, 30);
        assert!(back.model.endpoint.contains("generateContent"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CusdexConfig =
            serde_json::from_str(r#"{"model": {"timeout_secs": 10}}"#).unwrap();

        assert_eq!(config.model.timeout_secs, 10);
        assert_eq!(config.extraction.processing_user, "cusdex");
    }
}
