//! Client configuration
//!
//! Read from environment variables, with defaults for everything but the
//! API key.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "https://www.myfoodrepo.org";
pub const DEFAULT_API_VERSION: &str = "1";

pub const ENV_API_KEY: &str = "MFR_API_KEY";
pub const ENV_HOST: &str = "MFR_HOST";
pub const ENV_API_VERSION: &str = "MFR_API_VERSION";
pub const ENV_TIMEOUT_SECS: &str = "MFR_TIMEOUT_SECS";
pub const ENV_INSTALLATION_UUID: &str = "MFR_INSTALLATION_UUID";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Connection settings for a MyFoodRepo server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub host: String,
    pub api_version: String,
    /// Default request timeout, `None` for no limit
    pub timeout: Option<Duration>,
    pub installation_uuid: Option<String>,
}

impl ClientConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            host: DEFAULT_HOST.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: None,
            installation_uuid: None,
        }
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from any name → value lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_empty(ENV_API_KEY).ok_or(ConfigError::Missing(ENV_API_KEY))?;

        let mut config = Self::new(&api_key);
        if let Some(host) = non_empty(ENV_HOST) {
            config.host = host.trim_end_matches('/').to_string();
        }
        if let Some(version) = non_empty(ENV_API_VERSION) {
            config.api_version = version;
        }
        if let Some(raw) = non_empty(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            // 0 means no timeout
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        config.installation_uuid = non_empty(ENV_INSTALLATION_UUID);

        Ok(config)
    }

    /// Base URL of the versioned API, e.g. `https://host/api/v1`
    pub fn api_base(&self) -> String {
        format!("{}/api/v{}", self.host.trim_end_matches('/'), self.api_version)
    }
}
