//! Process command - extract fields from a single declaration PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::debug;

use cusdex_core::{ExportTable, ExtractionPipeline, ExtractionRecord, GenerativeClient, Session};

use super::{api_key_from_env, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input declaration PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Processing user recorded in the output metadata
    #[arg(short, long)]
    user: Option<String>,

    /// Print the region hint text before extracting
    #[arg(long)]
    show_hints: bool,

    /// Build and print the prompt without calling the service
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text field listing
    Text,
    /// JSON object keyed by field label
    Json,
    /// Single-row CSV in export column order
    Csv,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let api_key = api_key_from_env()?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let filename = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("declaration.pdf")
        .to_string();
    let bytes = fs::read(&args.input)?;

    let client = GenerativeClient::new(&config.model, api_key)?;
    let pipeline = ExtractionPipeline::with_config(client, config.pdf.clone());

    if args.show_hints {
        for hint in pipeline.hints(&bytes)? {
            println!("{} {}: \"{}\"", style("hint").cyan(), hint.name, hint.text);
        }
    }

    if args.dry_run {
        println!("{}", pipeline.prompt(&bytes)?);
        return Ok(());
    }

    let user = args
        .user
        .clone()
        .unwrap_or_else(|| config.extraction.processing_user.clone());
    let mut session = Session::new(user);
    session.add_document(filename.clone(), bytes);

    let record = session.capture(&pipeline, &filename).await?;

    if let Some(message) = record.error_message() {
        anyhow::bail!("Extraction failed for {}: {}", filename, message);
    }

    let output = format_record(record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_record(record: &ExtractionRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(record)),
        OutputFormat::Json => format_json(record),
        OutputFormat::Csv => format_csv(record),
    }
}

fn format_text(record: &ExtractionRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Extracted data for: {}\n", record.source_file));
    output.push_str(&format!(
        "Processed on: {} (UTC) by {}\n\n",
        record.processed_at, record.processed_by
    ));

    if let Some(fields) = record.fields() {
        for (field, value) in fields.iter_ordered() {
            output.push_str(&format!("{}: {}\n", field.label(), value));
        }
    }

    output
}

fn format_json(record: &ExtractionRecord) -> anyhow::Result<String> {
    let mut map = serde_json::Map::new();
    map.insert("Source File".to_string(), record.source_file.clone().into());
    map.insert(
        "Processing DateTime (UTC)".to_string(),
        record.processed_at.clone().into(),
    );
    map.insert(
        "Processed By User".to_string(),
        record.processed_by.clone().into(),
    );

    if let Some(fields) = record.fields() {
        if let serde_json::Value::Object(field_map) = fields.to_json() {
            map.extend(field_map);
        }
    }

    Ok(serde_json::to_string_pretty(&serde_json::Value::Object(
        map,
    ))?)
}

fn format_csv(record: &ExtractionRecord) -> anyhow::Result<String> {
    let table = ExportTable::from_records(std::slice::from_ref(record));

    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(ExportTable::columns())?;
    for row in table.rows() {
        wtr.write_record(row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
