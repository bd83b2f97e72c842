#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::geocode::DEFAULT_GEOCODER_URL;
use crate::adapters::http::DEFAULT_BASE_URL;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate};
use toml_config::TomlConfig;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
pub const DEFAULT_USER_AGENT: &str = concat!("outfit-weather/", env!("CARGO_PKG_VERSION"));

/// Fully resolved runtime settings: defaults, then the TOML file, then flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub geocoder_url: String,
    pub user_agent: String,
    pub storage_dir: String,
    pub timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            storage_dir: default_storage_dir(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

fn default_storage_dir() -> String {
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => format!("{}/.outfit-weather", home),
        _ => ".outfit-weather".to_string(),
    }
}

impl Settings {
    pub fn merge_toml(mut self, file: &TomlConfig) -> Self {
        if let Some(url) = &file.api.base_url {
            self.api_base_url = url.clone();
        }
        if let Some(timeout) = file.api.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if let Some(endpoint) = &file.geocoding.endpoint {
            self.geocoder_url = endpoint.clone();
        }
        if let Some(agent) = &file.geocoding.user_agent {
            self.user_agent = agent.clone();
        }
        if let Some(path) = &file.storage.path {
            self.storage_dir = path.clone();
        }
        self
    }
}

impl ConfigProvider for Settings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn geocoder_url(&self) -> &str {
        &self.geocoder_url
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn storage_dir(&self) -> &str {
        &self.storage_dir
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api_base_url)?;
        validate_url("geocoding.endpoint", &self.geocoder_url)?;
        validate_non_empty_string("geocoding.user_agent", &self.user_agent)?;
        validate_path("storage.path", &self.storage_dir)?;
        validate_positive_number("api.timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}
