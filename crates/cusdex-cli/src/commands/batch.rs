//! Batch command - process multiple declaration PDFs into one export table.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use cusdex_core::{ExportTable, ExtractionPipeline, GenerativeClient, Session};

use super::{api_key_from_env, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Write the combined export table to this CSV file
    #[arg(short, long, default_value = "cusdec_extracted_data.csv")]
    export: PathBuf,

    /// Processing user recorded in the export metadata
    #[arg(short, long)]
    user: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let api_key = api_key_from_env()?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching PDF files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} declarations to process",
        style("ℹ").blue(),
        files.len()
    );

    let client = GenerativeClient::new(&config.model, api_key)?;
    let pipeline = ExtractionPipeline::with_config(client, config.pdf.clone());

    let user = args
        .user
        .clone()
        .unwrap_or_else(|| config.extraction.processing_user.clone());
    let mut session = Session::new(user);

    for path in &files {
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("declaration.pdf")
            .to_string();
        session.add_document(filename, fs::read(path)?);
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Sequential, one blocking round trip per document; a failed document
    // becomes an error record and the batch carries on.
    let filenames: Vec<String> = session
        .documents()
        .iter()
        .map(|d| d.filename.clone())
        .collect();
    for filename in &filenames {
        pb.set_message(filename.clone());
        session.capture(&pipeline, filename).await?;
        pb.inc(1);
    }
    pb.finish_with_message("Complete");

    let table = session.export_table();
    let mut wtr = csv::Writer::from_path(&args.export)?;
    wtr.write_record(ExportTable::columns())?;
    for row in table.rows() {
        wtr.write_record(row)?;
    }
    wtr.flush()?;

    let failed: Vec<_> = session.records().iter().filter(|r| r.is_error()).collect();
    let successful = session.records().len() - failed.len();

    println!();
    println!(
        "{} Processed {} declarations in {:?}",
        style("✓").green(),
        session.records().len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed declarations:").red());
        for record in &failed {
            println!(
                "  - {}: {}",
                record.source_file,
                record.error_message().unwrap_or("unknown error")
            );
        }
    }

    println!(
        "{} Export table written to {}",
        style("✓").green(),
        args.export.display()
    );

    debug!("total batch time: {:?}", start.elapsed());

    Ok(())
}
