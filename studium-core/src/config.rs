//! Configuration management for Studium
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (STUDIUM_*)
//! 3. Config file (~/.config/studium/config.toml)
//! 4. Default values

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default chat-completions endpoint
pub const DEFAULT_API_URL: &str = "https://api.fireworks.ai/inference/v1/chat/completions";

/// Default generation model
pub const DEFAULT_MODEL: &str = "accounts/fireworks/models/llama-v3p3-70b-instruct";

/// LLM-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Chat-completions endpoint URL
    pub api_url: String,

    /// Model identifier sent with each request
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Database-related configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file; None means the default location
    pub path: Option<PathBuf>,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// LLM configuration
    pub llm: LlmConfig,

    /// Database configuration
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/studium/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("studium").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - STUDIUM_API_URL: Chat-completions endpoint
    /// - STUDIUM_MODEL: Model identifier
    /// - STUDIUM_DB_PATH: SQLite database path
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(api_url) = std::env::var("STUDIUM_API_URL") {
            self.llm.api_url = api_url;
        }

        if let Ok(model) = std::env::var("STUDIUM_MODEL") {
            self.llm.model = model;
        }

        if let Ok(db_path) = std::env::var("STUDIUM_DB_PATH") {
            self.database.path = Some(PathBuf::from(db_path));
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        api_url: Option<String>,
        model: Option<String>,
        db_path: Option<PathBuf>,
    ) -> Self {
        if let Some(url) = api_url {
            self.llm.api_url = url;
        }

        if let Some(m) = model {
            self.llm.model = m;
        }

        if let Some(path) = db_path {
            self.database.path = Some(path);
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        api_url: Option<String>,
        model: Option<String>,
        db_path: Option<PathBuf>,
    ) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(api_url, model, db_path))
    }
}
