//! Service configuration.
//!
//! Configuration is read from a YAML file, then overridden from the
//! environment. Every key is optional and falls back to the defaults that
//! point at the production recipe host.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

/// Production host serving the recipe listings.
pub const DEFAULT_BASE_URL: &str = "https://d3jbb8n5wk0qxi.cloudfront.net";

pub const BASE_URL_ENV: &str = "FETCH_RECIPES_BASE_URL";
pub const USER_AGENT_ENV: &str = "FETCH_RECIPES_USER_AGENT";

/// Errors that can occur while loading configuration or building the HTTP client.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to build HTTP client: {0}")]
    ClientError(#[from] reqwest::Error),
}

/// Settings for [`RecipeService`](crate::RecipeService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Scheme and host the endpoint paths are appended to
    pub base_url: String,
    /// Value sent in the `User-Agent` header
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("fetch-recipes/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ServiceConfig {
    /// Parses configuration from YAML text.
    ///
    /// An empty document yields the defaults.
    ///
    /// ```
    /// use fetch_recipes::ServiceConfig;
    ///
    /// let config = ServiceConfig::from_yaml_str("base_url: http://localhost:8080")?;
    /// assert_eq!(config.base_url, "http://localhost:8080");
    /// # Ok::<(), fetch_recipes::ConfigError>(())
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(ServiceConfig::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads configuration from a YAML file.
    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Applies `FETCH_RECIPES_BASE_URL` and `FETCH_RECIPES_USER_AGENT` when set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.base_url = base_url;
        }
        if let Some(user_agent) = lookup(USER_AGENT_ENV).filter(|v| !v.is_empty()) {
            self.user_agent = user_agent;
        }
        self
    }
}
