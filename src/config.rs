//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration for the player search engine: dataset file
//! locations, query behavior, and logging, loaded from a TOML file with
//! environment variable overrides and validation.
//!
//! ## Configuration Sources (in order of precedence)
//! 1. Command line arguments (applied by the binary, highest priority)
//! 2. Environment variables (`PLAYER_SEARCH_*`)
//! 3. Configuration file
//! 4. Default values (lowest priority)

use crate::errors::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure containing all system settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Dataset file locations
    pub data: DataConfig,
    /// Query engine behavior
    pub query: QueryConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Dataset file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Records dataset (id, names, positions, nationality, club, league)
    pub players_path: PathBuf,
    /// Ratings dataset (contributor, record id, score)
    pub ratings_path: PathBuf,
    /// Tags dataset (record id, tag)
    pub tags_path: PathBuf,
}

/// Query engine behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Maximum entries returned by a per-contributor rating lookup
    pub contributor_result_limit: usize,
    /// Minimum sample size a record needs to appear in top-N rankings
    pub top_min_rating_count: usize,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable structured JSON logging
    pub json_format: bool,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::from_file("config.toml")
    }

    /// Load configuration from a specific file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!("Configuration file not found: {:?}, using defaults", path);
            let mut config = Self::default();
            config.apply_env_overrides();
            config.validate()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Config {
            message: format!("Failed to read config file {:?}: {}", path, e),
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| CatalogError::Config {
            message: format!("Failed to parse config file {:?}: {}", path, e),
        })?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("PLAYER_SEARCH_PLAYERS") {
            self.data.players_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("PLAYER_SEARCH_RATINGS") {
            self.data.ratings_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("PLAYER_SEARCH_TAGS") {
            self.data.tags_path = PathBuf::from(path);
        }
        if let Ok(level) = std::env::var("PLAYER_SEARCH_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.query.contributor_result_limit == 0 {
            return Err(CatalogError::ValidationFailed {
                field: "query.contributor_result_limit".to_string(),
                reason: "Limit cannot be zero".to_string(),
            });
        }

        const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.logging.level.as_str()) {
            return Err(CatalogError::ValidationFailed {
                field: "logging.level".to_string(),
                reason: format!("Unknown log level: {}", self.logging.level),
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                players_path: PathBuf::from("players.csv"),
                ratings_path: PathBuf::from("rating.csv"),
                tags_path: PathBuf::from("tags.csv"),
            },
            query: QueryConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                json_format: false,
            },
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            contributor_result_limit: 20,
            top_min_rating_count: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.query.contributor_result_limit, 20);
    }

    #[test]
    fn parses_toml_file_contents() {
        let toml = r#"
            [data]
            players_path = "data/players.csv"
            ratings_path = "data/rating.csv"
            tags_path = "data/tags.csv"

            [query]
            contributor_result_limit = 10
            top_min_rating_count = 5

            [logging]
            level = "debug"
            json_format = true
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.data.players_path, PathBuf::from("data/players.csv"));
        assert_eq!(config.query.top_min_rating_count, 5);
        assert!(config.logging.json_format);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_contributor_limit() {
        let mut config = Config::default();
        config.query.contributor_result_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }
}
