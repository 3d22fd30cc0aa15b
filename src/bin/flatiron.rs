//! flatiron: convert nested JSON into a flat CSV table
//!
//! Designed for AWS CLI describe output, where the resources of interest
//! sit below a known path of keys.
//!
//! Usage:
//!   # Whole document as a single CSV row
//!   flatiron data.json out.csv
//!
//!   # One row per EC2 instance
//!   flatiron describe-instances.json out.csv --path Reservations:Instances
//!
//!   # One row per volume
//!   flatiron describe-volumes.json out.csv -p Volumes

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use flatiron::{convert, FlattenConfig};
use serde_json::Value;
use std::fs::File;

#[derive(Parser, Debug)]
#[command(name = "flatiron")]
#[command(about = "Convert nested JSON into a flat CSV table", long_about = None)]
struct Args {
    /// The JSON file to convert
    #[arg(value_name = "INPUT_FILE")]
    input_file: String,

    /// The CSV output file
    #[arg(value_name = "OUTPUT_FILE")]
    output_file: String,

    /// Path of keys to the resource list, with ':' between each key.
    /// For AWS CLI describe-instances output: 'Reservations:Instances'
    #[arg(long, short = 'p')]
    path: Option<String>,

    /// Maximum nesting depth to flatten (default: 64)
    #[arg(long)]
    max_depth: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = FlattenConfig::default();
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }

    log::info!("opening {}", args.input_file);
    let value = read_json(&args.input_file)?;

    let output = File::create(&args.output_file)
        .with_context(|| format!("failed to create output file {}", args.output_file))?;

    log::info!("writing data to CSV file {}", args.output_file);
    let rows = convert(&value, args.path.as_deref(), config, output)?;
    log::info!("wrote {rows} rows to {}", args.output_file);

    Ok(())
}

/// Read and parse the input file.
///
/// Tries SIMD parsing first for speed; on failure, reparses with serde_json
/// so the error message carries a line and column.
fn read_json(path: &str) -> Result<Value> {
    let content =
        std::fs::read(path).with_context(|| format!("failed to read input file {path}"))?;

    let mut simd_buf = content.clone();
    match simd_json::serde::from_slice::<Value>(&mut simd_buf) {
        Ok(value) => Ok(value),
        Err(_) => serde_json::from_slice(&content)
            .with_context(|| format!("input file {path} is not valid JSON")),
    }
}
