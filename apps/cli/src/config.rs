//! TOML configuration for the analysis run.
//!
//! ```toml
//! [trades]
//! folder = "./exports"
//! patterns = ["Webull_Orders_Records*.csv"]
//!
//! [transfers]
//! folder = "./exports"
//! patterns = ["Webull_Transfers*.csv"]
//!
//! [benchmark]
//! symbol = "VTI"
//!
//! [output]
//! dir = "./reports"
//! ```
//!
//! The `[transfers]` section is optional; without it the money-weighted
//! return falls back to trade-derived cash flows. Log verbosity comes from
//! the `RUST_LOG` environment variable, not the config file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub trades: SourceConfig,
    pub transfers: Option<SourceConfig>,
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// One export folder plus the filename patterns to pick up inside it.
#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    pub folder: PathBuf,
    pub patterns: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BenchmarkConfig {
    #[serde(default = "default_benchmark_symbol")]
    pub symbol: String,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            symbol: default_benchmark_symbol(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_benchmark_symbol() -> String {
    "VTI".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./reports")
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}
