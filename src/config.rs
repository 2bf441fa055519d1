//! Configuration management for the PPA statistics tool

use crate::types::{ArchiveId, Target};
use crate::{
    DEFAULT_API_VERSION, DEFAULT_CACHE_DIR, DEFAULT_CONSUMER_NAME, DEFAULT_SERVICE_ROOT,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, PUBLISHED_STATUS,
};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Launchpad API connection
    pub launchpad: LaunchpadConfig,

    /// Archive and query space to report on
    pub archive: ArchiveConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Launchpad API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchpadConfig {
    /// Service root, without the version segment
    #[serde(default = "default_service_root")]
    pub service_root: String,

    /// Web service version (`devel`, `1.0`, ...)
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Application name used as the OAuth consumer key
    #[serde(default = "default_consumer_name")]
    pub consumer_name: String,

    /// Session metadata cache; a leading `~` is the home directory
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// User agent for requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_api_timeout")]
    pub timeout_seconds: u64,
}

/// Archive configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// PPA owner account
    #[serde(default = "default_owner")]
    pub owner: String,

    /// PPA name
    #[serde(default = "default_archive_name")]
    pub name: String,

    /// Distribution the series belong to
    #[serde(default = "default_distribution")]
    pub distribution: String,

    /// Publication status filter
    #[serde(default = "default_status")]
    pub status: String,

    /// Series, in report order
    #[serde(default = "default_series")]
    pub series: Vec<String>,

    /// Architectures, in report order within each series
    #[serde(default = "default_architectures")]
    pub architectures: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_service_root() -> String {
    DEFAULT_SERVICE_ROOT.to_string()
}
fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}
fn default_consumer_name() -> String {
    DEFAULT_CONSUMER_NAME.to_string()
}
fn default_cache_dir() -> String {
    DEFAULT_CACHE_DIR.to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_api_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_owner() -> String {
    "purple-vk-plugin".to_string()
}
fn default_archive_name() -> String {
    "dev".to_string()
}
fn default_distribution() -> String {
    "ubuntu".to_string()
}
fn default_status() -> String {
    PUBLISHED_STATUS.to_string()
}
fn default_series() -> Vec<String> {
    vec!["precise".to_string(), "saucy".to_string()]
}
fn default_architectures() -> Vec<String> {
    vec!["i386".to_string(), "amd64".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            launchpad: LaunchpadConfig::default(),
            archive: ArchiveConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LaunchpadConfig {
    fn default() -> Self {
        Self {
            service_root: default_service_root(),
            api_version: default_api_version(),
            consumer_name: default_consumer_name(),
            cache_dir: default_cache_dir(),
            user_agent: default_user_agent(),
            timeout_seconds: default_api_timeout(),
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            name: default_archive_name(),
            distribution: default_distribution(),
            status: default_status(),
            series: default_series(),
            architectures: default_architectures(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file(None::<std::path::PathBuf>)
    }

    /// Load configuration from a specific file, then the environment
    pub fn load_from_file<P: AsRef<Path>>(config_file: Option<P>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        builder = builder.add_source(Config::try_from(&AppConfig::default())?);

        if let Some(path) = config_file {
            let path = path.as_ref();
            if !path.exists() {
                return Err(ConfigError::Message(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            info!("Loading configuration from: {}", path.display());
            builder = builder.add_source(File::from(path));
        }

        // Values stay strings until deserialization so "1.0" or "007" survive intact
        builder = builder.add_source(Environment::with_prefix("PPA_STATS").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.launchpad.service_root.trim().is_empty() {
            return Err("Service root cannot be empty".to_string());
        }

        if self.launchpad.api_version.trim().is_empty() {
            return Err("API version cannot be empty".to_string());
        }

        if self.launchpad.consumer_name.trim().is_empty() {
            return Err("Consumer name cannot be empty".to_string());
        }

        if self.launchpad.timeout_seconds == 0 {
            return Err("API timeout cannot be 0".to_string());
        }

        if self.archive.owner.trim().is_empty() || self.archive.name.trim().is_empty() {
            return Err("Archive owner and name cannot be empty".to_string());
        }

        if self.archive.series.is_empty() {
            return Err("At least one series is required".to_string());
        }

        if self.archive.architectures.is_empty() {
            return Err("At least one architecture is required".to_string());
        }

        if self
            .archive
            .series
            .iter()
            .chain(self.archive.architectures.iter())
            .any(|s| s.trim().is_empty())
        {
            return Err("Series and architecture names cannot be empty".to_string());
        }

        if !["trace", "debug", "info", "warn", "error"].contains(&self.logging.level.as_str()) {
            return Err(format!("Invalid log level: {}", self.logging.level));
        }

        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Identity of the archive to report on
    pub fn archive_id(&self) -> ArchiveId {
        ArchiveId {
            owner: self.archive.owner.clone(),
            name: self.archive.name.clone(),
        }
    }

    /// Query space in report order
    pub fn targets(&self) -> Vec<Target> {
        Target::cross_product(&self.archive.series, &self.archive.architectures)
    }
}
