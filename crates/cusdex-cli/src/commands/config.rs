//! Config command - manage configuration.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use cusdex_core::CusdexConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "model.timeout_secs")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

const DEFAULT_CONFIG_FILE: &str = "cusdex.json";

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = PathBuf::from(config_path.unwrap_or(DEFAULT_CONFIG_FILE));

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn load_or_default(path: &Path) -> anyhow::Result<CusdexConfig> {
    if path.exists() {
        Ok(CusdexConfig::from_file(path)?)
    } else {
        Ok(CusdexConfig::default())
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    let config = load_or_default(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_config(args: InitArgs) -> anyhow::Result<()> {
    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    if path.exists() && !args.force {
        anyhow::bail!(
            "Configuration file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    CusdexConfig::default().save(&path)?;
    println!(
        "{} Configuration written to {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let config = load_or_default(path)?;
    let root = serde_json::to_value(&config)?;

    let mut current = &root;
    for part in key.split('.') {
        current = current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;
    }

    println!("{}", current);
    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let config = load_or_default(path)?;
    let mut root = serde_json::to_value(&config)?;

    // Numbers and booleans parse as themselves, anything else is a string
    let new_value: Value = serde_json::from_str(value)
        .unwrap_or_else(|_| Value::String(value.to_string()));

    let mut current = &mut root;
    let parts: Vec<&str> = key.split('.').collect();
    for part in &parts[..parts.len() - 1] {
        current = current
            .get_mut(*part)
            .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;
    }

    let leaf = parts
        .last()
        .ok_or_else(|| anyhow::anyhow!("Empty configuration key"))?;
    match current.as_object_mut() {
        Some(object) if object.contains_key(*leaf) => {
            object.insert((*leaf).to_string(), new_value);
        }
        _ => anyhow::bail!("Unknown configuration key: {}", key),
    }

    // Round-trip through the typed config so bad values fail here
    let updated: CusdexConfig = serde_json::from_value(root)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    updated.save(path)?;

    println!(
        "{} Set {} in {}",
        style("✓").green(),
        key,
        path.display()
    );
    Ok(())
}
