use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Ingest, clean, and summarize HR workforce CSV exports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full pipeline and print the workforce summary metrics
    Metrics(MetricsArgs),
    /// List the datasets discovered in the data directory
    Datasets(DatasetsArgs),
    /// Preview the first rows of one cleaned dataset
    Preview(PreviewArgs),
}

/// Arguments shared by every pipeline-backed command.
#[derive(Debug, Args)]
pub struct PipelineArgs {
    /// Directory containing the CSV exports
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,
    /// Optional YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Extra column name to coerce to a date (repeatable)
    #[arg(long = "date-column", action = clap::ArgAction::Append)]
    pub date_columns: Vec<String>,
    /// Extra column name to coerce to a number (repeatable)
    #[arg(long = "numeric-column", action = clap::ArgAction::Append)]
    pub numeric_columns: Vec<String>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of input files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct MetricsArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,
    /// Emit metrics as JSON instead of an ASCII table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct DatasetsArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,
    /// Canonical dataset key to preview (e.g. all_employees)
    #[arg(short, long)]
    pub key: String,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
