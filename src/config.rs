//! Configuration management for og-query-runner.
//!
//! Handles loading configuration from TOML files and environment variables,
//! with support for named instances.

use crate::client::{ClientConfig, DEFAULT_TIMEOUT_SECS};
use crate::error::{QueryRunnerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use url::Url;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Named instances.
    #[serde(default)]
    pub instances: HashMap<String, InstanceConfig>,
}

/// Connection settings for one instance.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Base URL of the instance (e.g., `https://og.example.com`).
    pub url: Option<String>,

    /// API key (not recommended to store in config).
    pub api_key: Option<String>,

    /// Request timeout in seconds. Unset means the client default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for InstanceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl InstanceConfig {
    /// Checks that an instance URL is an absolute http(s) URL.
    pub fn validate_url(url: &str) -> Result<()> {
        let parsed = Url::parse(url)
            .map_err(|e| QueryRunnerError::config(format!("Invalid instance URL '{url}': {e}")))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(QueryRunnerError::config(format!(
                "Invalid scheme '{}'. Expected 'http' or 'https'",
                parsed.scheme()
            )));
        }

        Ok(())
    }

    /// Merges another config into this one, with the other taking precedence.
    pub fn merge(&mut self, other: &InstanceConfig) {
        if other.url.is_some() {
            self.url = other.url.clone();
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key.clone();
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }

    /// Applies environment variables (OG_INSTANCE_URL, OG_API_KEY, OG_TIMEOUT_SECS) as defaults.
    pub fn apply_env_defaults(&mut self) {
        if self.url.is_none() {
            self.url = std::env::var("OG_INSTANCE_URL").ok();
        }
        if self.api_key.is_none() {
            self.api_key = std::env::var("OG_API_KEY").ok();
        }
        if self.timeout_secs.is_none() {
            self.timeout_secs = std::env::var("OG_TIMEOUT_SECS")
                .ok()
                .and_then(|secs| secs.parse().ok());
        }
    }

    /// Builds a client configuration, requiring both a URL and an API key.
    pub fn to_client_config(&self) -> Result<ClientConfig> {
        let url = self
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| QueryRunnerError::config("Instance URL is required"))?;
        Self::validate_url(url)?;

        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| QueryRunnerError::config("API key is required"))?;

        Ok(ClientConfig::new(url, api_key).with_timeout(self.effective_timeout_secs()))
    }

    /// Returns the configured timeout, or the client default when unset.
    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    /// Returns a display-safe string (no API key) for log output.
    pub fn display_string(&self) -> String {
        let url = self.url.as_deref().unwrap_or("<no url>");
        format!("{url} (timeout {}s)", self.effective_timeout_secs())
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("og-query-runner")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the default (empty) configuration.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| QueryRunnerError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            QueryRunnerError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Gets a named instance, or the default instance if name is None.
    pub fn get_instance(&self, name: Option<&str>) -> Option<&InstanceConfig> {
        let key = name.unwrap_or("default");
        self.instances.get(key)
    }
}
