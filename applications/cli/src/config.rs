/// CLI configuration
use crate::error::{CliError, Result};
use chorus_remote::RemoteConfig;
use chorus_sync::SyncConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file, read from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "chorus.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChorusConfig {
    /// Journal used when none is given on the command line
    #[serde(default)]
    pub journal: Option<String>,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub remote: RemoteSettings,

    #[serde(default = "default_cache")]
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteSettings {
    /// Document store base URL; no URL means remote sync is disabled
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            url: None,
            poll_interval_ms: default_poll_interval_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteSettings {
    /// Client configuration, `None` when remote sync is disabled
    pub fn to_remote_config(&self) -> Option<RemoteConfig> {
        let url = self.url.as_deref().map(str::trim).filter(|url| !url.is_empty())?;
        Some(RemoteConfig {
            url: url.to_string(),
            poll_interval_ms: self.poll_interval_ms,
            timeout_secs: self.timeout_secs,
        })
    }
}

impl ChorusConfig {
    /// Load configuration from `chorus.toml` (or `path`) and `CHORUS_*`
    /// environment variables
    ///
    /// Nested keys use a double underscore, e.g. `CHORUS_REMOTE__URL` or
    /// `CHORUS_SYNC__ECHO_WINDOW_MS`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, environment())
    }

    /// Load with an explicit environment source
    pub fn load_with(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder()
            // A CLI process is short-lived, so give the store a moment to
            // deliver the current document before seeding from the cache
            .set_default("sync.seed_wait_ms", 1500_i64)
            .map_err(|e| CliError::Config(e.to_string()))?;

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(env);

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.sync.drift_threshold_secs.is_nan() || self.sync.drift_threshold_secs < 0.0 {
            return Err(CliError::Config(
                "sync.drift_threshold_secs must be a non-negative number".to_string(),
            ));
        }

        if self.remote.poll_interval_ms == 0 {
            return Err(CliError::Config(
                "remote.poll_interval_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// `CHORUS_`-prefixed environment source
pub fn environment() -> config::Environment {
    config::Environment::with_prefix("CHORUS")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

// Default values
fn default_cache() -> CacheSettings {
    CacheSettings {
        dir: default_cache_dir(),
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("chorus").join("cache"))
        .unwrap_or_else(|| PathBuf::from(".chorus-cache"))
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    10
}
