//! Filesystem input and output.
//!
//! The scrapers leave their output in the data directory:
//! - `decklists.json`: decklists, as an array or an object keyed by URL
//! - `results.json`: round results
//!
//! The analysis report is written next to them as `analysis.json`.

mod json;

use std::path::PathBuf;
use thiserror::Error;

pub use json::{read_decklists, read_results, write_report};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected decklist format in {0}")]
    InvalidFormat(PathBuf),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn decklists_path(&self) -> PathBuf {
        self.data_dir.join("decklists.json")
    }

    pub fn results_path(&self) -> PathBuf {
        self.data_dir.join("results.json")
    }

    pub fn analysis_path(&self) -> PathBuf {
        self.data_dir.join("analysis.json")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));

        assert_eq!(config.decklists_path(), PathBuf::from("/data/decklists.json"));
        assert_eq!(config.results_path(), PathBuf::from("/data/results.json"));
        assert_eq!(config.analysis_path(), PathBuf::from("/data/analysis.json"));
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }
}
