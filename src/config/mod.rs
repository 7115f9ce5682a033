//! Configuration management for clipfetch
//!
//! Layered configuration loaded from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Environment Variables
//!
//! Settings can be overridden with the pattern
//! `CLIPFETCH__<section>__<key>`, for example:
//! - `CLIPFETCH__SERVER__BIND_ADDR=0.0.0.0:9000`
//! - `CLIPFETCH__DOWNLOADER__BIN=/usr/local/bin/yt-dlp`
//! - `CLIPFETCH__DOWNLOADER__DOWNLOAD_DIR=/srv/videos`
//!
//! # Configuration File
//!
//! By default the configuration is read from `config/clipfetch.toml`;
//! override the path with the `CLIPFETCH_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{Config, DownloaderConfig, ServerConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or
    /// validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
