pub mod clean;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod io_utils;
pub mod metrics;
pub mod normalize;
pub mod registry;
pub mod report;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cli::{Cli, Commands, PipelineArgs},
    config::PipelineConfig,
    dataset::DatasetCollection,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("hr_metrics", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Metrics(args) => handle_metrics(&args),
        Commands::Datasets(args) => handle_datasets(&args),
        Commands::Preview(args) => handle_preview(&args),
    }
}

/// Runs the ingest-normalize-clean stages and returns the cleaned collection.
/// The only propagated failure is the explicit no-data signal for an empty
/// load cycle.
fn load_cleaned(args: &PipelineArgs) -> Result<DatasetCollection> {
    let config = match &args.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    let data_dir = args
        .data_dir
        .clone()
        .or_else(|| config.data_dir.clone())
        .context("No data directory given; pass --data-dir or set data_dir in the config file")?;
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let load_options = registry::LoadOptions {
        delimiter: args.delimiter,
    };
    let raw = registry::load_directory(&data_dir, encoding, &load_options);
    if raw.is_empty() {
        bail!("No tabular data could be loaded from {data_dir:?}");
    }
    info!(
        "Loaded {} dataset(s) from {}",
        raw.len(),
        data_dir.display()
    );
    let options = config.clean_options(&args.date_columns, &args.numeric_columns);
    Ok(clean::clean_collection(&raw, &options))
}

fn handle_metrics(args: &cli::MetricsArgs) -> Result<()> {
    let collection = load_cleaned(&args.pipeline)?;
    let metrics = metrics::derive(&collection);
    if args.json {
        println!("{}", report::render_metrics_json(&metrics)?);
    } else {
        print!("{}", report::render_metrics_table(&metrics));
    }
    let available = metrics
        .entries()
        .iter()
        .filter(|(_, value)| value.is_available())
        .count();
    info!("Derived {available} of {} metric(s)", metrics.entries().len());
    Ok(())
}

fn handle_datasets(args: &cli::DatasetsArgs) -> Result<()> {
    let collection = load_cleaned(&args.pipeline)?;
    print!("{}", report::render_inventory(&collection));
    Ok(())
}

fn handle_preview(args: &cli::PreviewArgs) -> Result<()> {
    let collection = load_cleaned(&args.pipeline)?;
    let dataset = collection
        .get(&args.key)
        .with_context(|| format!("Dataset '{}' was not loaded", args.key))?;
    print!("{}", report::render_preview(dataset, args.rows));
    Ok(())
}
