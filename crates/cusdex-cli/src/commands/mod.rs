//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use cusdex_core::CusdexConfig;

/// Load configuration from an explicit path or fall back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CusdexConfig> {
    match config_path {
        Some(path) => Ok(CusdexConfig::from_file(std::path::Path::new(path))?),
        None => Ok(CusdexConfig::default()),
    }
}

/// Load the API key from the environment, honoring a local `.env` file.
///
/// A missing key aborts before any document is touched.
pub fn api_key_from_env() -> anyhow::Result<String> {
    dotenvy::dotenv().ok();
    match std::env::var("GOOGLE_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => anyhow::bail!(
            "Gemini API key not found. Please set GOOGLE_API_KEY in your environment or .env file."
        ),
    }
}
