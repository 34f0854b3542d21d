//! Configuration loading and validation.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Rounds played in a non-constructed format (draft); excluded from archetype stats
    #[serde(default = "default_draft_rounds")]
    pub draft_rounds: BTreeSet<u32>,

    /// Report "A vs A" self-pairings in matchup stats
    #[serde(default)]
    pub report_mirror_matchups: bool,
}

fn default_draft_rounds() -> BTreeSet<u32> {
    [1, 2, 3, 8, 9, 10].into_iter().collect()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            draft_rounds: default_draft_rounds(),
            report_mirror_matchups: false,
        }
    }
}

impl AnalysisConfig {
    /// Whether results from this round are left out of archetype statistics.
    pub fn is_excluded_round(&self, round: u32) -> bool {
        self.draft_rounds.contains(&round)
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.draft_rounds.contains(&0) {
            return Err(ConfigError::ValidationError(
                "Draft rounds are numbered from 1".to_string(),
            ));
        }

        if self.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Log level must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
