use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5001";
pub const DEFAULT_CONFIG_FILE: &str = "shortly.toml";

const ENV_API_BASE_URL: &[&str] = &["SHORTLY_API_BASE_URL", "APP__API_BASE_URL"];
const ENV_REQUEST_TIMEOUT: &[&str] = &["SHORTLY_REQUEST_TIMEOUT_SECS", "APP__REQUEST_TIMEOUT_SECS"];

/// Client settings injected at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(alias = "apiBaseUrl")]
    pub api_base_url: String,
    /// No client-side timeout unless set; the transport default applies.
    #[serde(alias = "requestTimeoutSecs")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Later names in each list win, matching the order they are checked.
    pub fn apply_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        for name in ENV_API_BASE_URL {
            if let Some(v) = lookup(name).filter(|v| !v.trim().is_empty()) {
                self.api_base_url = v;
            }
        }
        for name in ENV_REQUEST_TIMEOUT {
            if let Some(v) = lookup(name).filter(|v| !v.trim().is_empty()) {
                let secs = v
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(v.clone()))?;
                self.request_timeout_secs = Some(secs);
            }
        }
        Ok(self)
    }

    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    /// Checks the base URL and normalizes it to have no trailing slash.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        let raw = self.api_base_url.trim();
        let parsed = Url::parse(raw).map_err(|err| ConfigError::InvalidBaseUrl {
            value: raw.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                value: raw.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ConfigError::InvalidBaseUrl {
                value: raw.to_string(),
                reason: "query strings and fragments are not allowed".into(),
            });
        }
        self.api_base_url = raw.trim_end_matches('/').to_string();
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidTimeout("0".into()));
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Resolves defaults, then the config file, then the environment.
///
/// An explicit `path` must exist; the default `shortly.toml` is optional.
pub fn load_config(path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    let (file, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let config = match fs::read_to_string(&file) {
        Ok(raw) => ClientConfig::from_toml_str(&raw, &file)?,
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
            ClientConfig::default()
        }
        Err(source) => return Err(ConfigError::Read { path: file, source }),
    };

    config.apply_env(|name| std::env::var(name).ok())?.validated()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
