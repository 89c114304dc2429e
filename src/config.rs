//! Aggregator configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! wants to change.

use anyhow::{bail, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::bio::REFERENCE_WINDOW;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Window compared literally against each sequence position.
    pub reference_window: String,
    /// First year of the synthetic time series.
    pub time_series_base_year: i32,
    /// Reject non-numeric parameter fields instead of letting NaN through.
    pub strict_numbers: bool,
    /// Worker threads for per-row statistics. 1 keeps everything on the caller.
    pub threads: usize,
    pub chunk_size: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        AggregatorConfig {
            reference_window: REFERENCE_WINDOW.to_string(),
            time_series_base_year: 2020,
            strict_numbers: false,
            threads: 1,
            chunk_size: 1000,
        }
    }
}

impl AggregatorConfig {
    /// Loads a JSON config file and validates it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        let config: AggregatorConfig = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.validate()?;
        info!("Loaded aggregator config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.reference_window.is_empty() {
            bail!("reference_window must not be empty");
        }
        if self.threads == 0 {
            bail!("threads must be at least 1");
        }
        if self.chunk_size == 0 {
            bail!("chunk_size must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let config = AggregatorConfig::default();
        assert_eq!(config.reference_window, "ATCG");
        assert_eq!(config.time_series_base_year, 2020);
        assert!(!config.strict_numbers);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = File::create(&path).unwrap();
        writeln!(file, r#"{{ "strict_numbers": true, "threads": 4 }}"#).unwrap();

        let config = AggregatorConfig::from_file(&path).unwrap();
        assert!(config.strict_numbers);
        assert_eq!(config.threads, 4);
        assert_eq!(config.reference_window, "ATCG");
        assert_eq!(config.chunk_size, 1000);
    }

    #[test]
    fn test_empty_reference_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "reference_window": "" }"#).unwrap();
        assert!(AggregatorConfig::from_file(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempdir().unwrap();
        assert!(AggregatorConfig::from_file(&dir.path().join("nope.json")).is_err());
    }
}
