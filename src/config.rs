//! Configuration management for SoulCare
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, SoulCareError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the on-disk store location
pub const DATA_DIR_ENV: &str = "SOULCARE_DATA_DIR";

/// Main configuration structure for SoulCare
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote generation proxy settings
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Local persistence settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote generation proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Base URL of the proxy, without a trailing path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the chat endpoint
    #[serde(default = "default_chat_path")]
    pub chat_path: String,

    /// Path of the assessment endpoint
    #[serde(default = "default_assessment_path")]
    pub assessment_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_chat_path() -> String {
    "/api/chatbot".to_string()
}

fn default_assessment_path() -> String {
    "/api/test".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chat_path: default_chat_path(),
            assessment_path: default_assessment_path(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Local persistence configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the key-value store; platform data dir when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(SoulCareError::from)?;
        let config = serde_yaml::from_str(&contents).map_err(SoulCareError::from)?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(url) = std::env::var("SOULCARE_PROXY_URL") {
            tracing::debug!(url = %url, "Env override: SOULCARE_PROXY_URL");
            self.proxy.base_url = url;
        }

        if let Ok(timeout) = std::env::var("SOULCARE_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.proxy.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid SOULCARE_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                self.storage.data_dir = Some(PathBuf::from(dir));
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(dir) = &cli.data_dir {
            self.storage.data_dir = Some(dir.clone());
        }
        if let Some(url) = &cli.proxy_url {
            self.proxy.base_url = url.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the proxy URL, endpoint paths, or timeout are invalid
    pub fn validate(&self) -> Result<()> {
        let base_url = self.proxy.base_url.trim();
        if base_url.is_empty() {
            return Err(SoulCareError::Config("proxy.base_url cannot be empty".to_string()).into());
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(SoulCareError::Config(format!(
                "proxy.base_url must start with http:// or https://, got {}",
                base_url
            ))
            .into());
        }

        for (name, path) in [
            ("proxy.chat_path", &self.proxy.chat_path),
            ("proxy.assessment_path", &self.proxy.assessment_path),
        ] {
            if !path.starts_with('/') {
                return Err(
                    SoulCareError::Config(format!("{} must start with '/'", name)).into(),
                );
            }
        }

        if self.proxy.timeout_seconds == 0 {
            return Err(SoulCareError::Config(
                "proxy.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
