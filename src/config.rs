//! Optional YAML configuration for the pipeline.
//!
//! The data directory and extra coercion columns can be injected from a
//! config file instead of being hard-coded; CLI flags take precedence over
//! config values, which take precedence over the built-in defaults.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::clean::CleanOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory scanned for tabular exports.
    pub data_dir: Option<PathBuf>,
    /// Extra columns coerced to dates, merged with the defaults.
    pub date_columns: Vec<String>,
    /// Extra columns coerced to numbers, merged with the defaults.
    pub numeric_columns: Vec<String>,
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Opening config file {path:?}"))?;
        serde_yaml::from_str(&raw).with_context(|| format!("Parsing config file {path:?}"))
    }

    /// Builds cleaning options from the config plus CLI-supplied extras.
    pub fn clean_options(&self, extra_dates: &[String], extra_numeric: &[String]) -> CleanOptions {
        CleanOptions::new()
            .with_date_columns(self.date_columns.iter().cloned())
            .with_date_columns(extra_dates.iter().cloned())
            .with_numeric_columns(self.numeric_columns.iter().cloned())
            .with_numeric_columns(extra_numeric.iter().cloned())
    }
}
