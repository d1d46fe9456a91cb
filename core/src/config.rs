//! Pipeline configuration: explicit paths and generation parameters.
//!
//! Nothing in the core crate assumes a working directory; every stage
//! receives the paths it needs from this struct (or directly from the
//! CLI flags that override it).

use crate::{
    error::PipelineResult,
    generator::{DEFAULT_COUNT, DEFAULT_SEED},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory the generator writes its CSV files into.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// SQLite database file the loader populates.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Number of transactions to synthesize.
    #[serde(default = "default_count")]
    pub transaction_count: usize,

    /// Master seed; the whole dataset is a pure function of it.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// End of the trailing 90-day timestamp window. Defaults to today;
    /// fixed explicitly when reproducible dates are needed.
    #[serde(default)]
    pub anchor_date: Option<NaiveDate>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_db_path() -> PathBuf {
    PathBuf::from("database/supermarket.db")
}

fn default_count() -> usize {
    DEFAULT_COUNT
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            db_path: default_db_path(),
            transaction_count: default_count(),
            seed: default_seed(),
            anchor_date: None,
        }
    }
}

impl PipelineConfig {
    /// Load from a JSON file; absent fields fall back to defaults.
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let raw = fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// The window anchor to use: the configured date, or today.
    pub fn effective_anchor(&self) -> NaiveDate {
        self.anchor_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
