use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::batch::FailurePolicy;

/// Record format read by the batch driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Comma-separated records with a header row.
    #[default]
    Csv,
    /// One JSON object per line.
    Ndjson,
    /// One URL per line.
    Lines,
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(InputFormat::Csv),
            "ndjson" => Ok(InputFormat::Ndjson),
            "lines" => Ok(InputFormat::Lines),
            other => Err(format!("unknown input format {other:?} (expected csv, ndjson or lines)")),
        }
    }
}

/// Global configuration loaded from `~/.config/urlcanon/config.toml`.
///
/// Only the batch driver is configurable; the canonicalization rules are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonConfig {
    /// Format of records on the input stream.
    pub input_format: InputFormat,
    /// Name of the record field (CSV column / JSON key) holding the URL.
    pub url_field: String,
    /// What to do with a record that fails: "skip", "log" or "halt".
    pub on_error: FailurePolicy,
    /// Number of worker tasks for batch canonicalization (1 = sequential).
    pub jobs: usize,
    /// Records handed to a worker at a time.
    pub chunk_size: usize,
}

impl Default for CanonConfig {
    fn default() -> Self {
        Self {
            input_format: InputFormat::Csv,
            url_field: "url".to_string(),
            on_error: FailurePolicy::Log,
            jobs: 1,
            chunk_size: 1024,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlcanon")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CanonConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<CanonConfig> {
    if !path.exists() {
        let default_cfg = CanonConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: CanonConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
