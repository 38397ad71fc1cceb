//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default listen address for kitchen-finder
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5730";

/// TheMealDB public API (v1, test key)
pub const DEFAULT_MEALDB_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Site hosting the human-readable recipe pages
pub const DEFAULT_SITE_URL: &str = "https://www.themealdb.com";

/// Connect timeout applied by the HTTP client
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const ENV_BIND_ADDRESS: &str = "KITCHEN_BIND_ADDRESS";
pub const ENV_MEALDB_URL: &str = "KITCHEN_MEALDB_URL";
pub const ENV_SITE_URL: &str = "KITCHEN_SITE_URL";
pub const ENV_LOG_LEVEL: &str = "KITCHEN_LOG_LEVEL";

/// Logging section of the TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// On-disk TOML configuration
///
/// Every field is optional; absent fields fall through to compiled defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mealdb_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
    /// Overall per-request deadline. Unset means no deadline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Fully resolved runtime configuration for kitchen-finder
#[derive(Debug, Clone, PartialEq)]
pub struct FinderConfig {
    pub bind_address: String,
    /// Recipe database API base, without trailing slash
    pub mealdb_base_url: String,
    /// Recipe page site base, without trailing slash
    pub site_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Option<Duration>,
    pub log_level: String,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            mealdb_base_url: DEFAULT_MEALDB_BASE_URL.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: None,
            log_level: default_log_level(),
        }
    }
}

impl From<&FinderConfig> for TomlConfig {
    fn from(config: &FinderConfig) -> Self {
        Self {
            bind_address: Some(config.bind_address.clone()),
            mealdb_base_url: Some(config.mealdb_base_url.clone()),
            site_url: Some(config.site_url.clone()),
            connect_timeout_secs: Some(config.connect_timeout.as_secs()),
            request_timeout_secs: config.request_timeout.map(|t| t.as_secs()),
            logging: LoggingConfig {
                level: config.log_level.clone(),
            },
        }
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind_address: Option<String>,
    pub mealdb_base_url: Option<String>,
    pub site_url: Option<String>,
    pub log_level: Option<String>,
    /// Explicit TOML path; when absent the platform default path is tried
    pub config_path: Option<PathBuf>,
}

/// Resolves a [`FinderConfig`] from CLI, environment, TOML and defaults
pub struct ConfigResolver {
    overrides: ConfigOverrides,
}

impl ConfigResolver {
    pub fn new(overrides: ConfigOverrides) -> Self {
        Self { overrides }
    }

    /// Resolve the final configuration
    ///
    /// A missing TOML file is not an error. A TOML file that exists but
    /// cannot be parsed is.
    pub fn resolve(&self) -> Result<FinderConfig> {
        let toml_path = self
            .overrides
            .config_path
            .clone()
            .or_else(default_config_path);

        let file = match &toml_path {
            Some(path) => load_toml_config(path)?.unwrap_or_default(),
            None => TomlConfig::default(),
        };

        let bind_address = pick(
            self.overrides.bind_address.as_deref(),
            ENV_BIND_ADDRESS,
            file.bind_address.as_deref(),
            DEFAULT_BIND_ADDRESS,
        );
        let mealdb_base_url = pick(
            self.overrides.mealdb_base_url.as_deref(),
            ENV_MEALDB_URL,
            file.mealdb_base_url.as_deref(),
            DEFAULT_MEALDB_BASE_URL,
        );
        let site_url = pick(
            self.overrides.site_url.as_deref(),
            ENV_SITE_URL,
            file.site_url.as_deref(),
            DEFAULT_SITE_URL,
        );
        let log_level = pick(
            self.overrides.log_level.as_deref(),
            ENV_LOG_LEVEL,
            Some(file.logging.level.as_str()),
            "info",
        );

        let connect_secs = file
            .connect_timeout_secs
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);
        if connect_secs == 0 {
            return Err(Error::Config(
                "connect_timeout_secs must be greater than zero".to_string(),
            ));
        }

        let request_timeout = match file.request_timeout_secs {
            Some(0) => {
                return Err(Error::Config(
                    "request_timeout_secs must be greater than zero (omit it to disable)"
                        .to_string(),
                ))
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        let config = FinderConfig {
            bind_address,
            mealdb_base_url: normalize_base_url(&mealdb_base_url)?,
            site_url: normalize_base_url(&site_url)?,
            connect_timeout: Duration::from_secs(connect_secs),
            request_timeout,
            log_level,
        };

        debug!(?config, "Resolved configuration");
        Ok(config)
    }
}

/// First non-blank value among CLI, environment and TOML, else the default
fn pick(cli: Option<&str>, env_name: &str, toml: Option<&str>, default: &str) -> String {
    if let Some(value) = cli.filter(|v| !v.trim().is_empty()) {
        return value.trim().to_string();
    }

    if let Ok(value) = std::env::var(env_name) {
        if !value.trim().is_empty() {
            return value.trim().to_string();
        }
    }

    if let Some(value) = toml.filter(|v| !v.trim().is_empty()) {
        return value.trim().to_string();
    }

    default.to_string()
}

/// Strip trailing slashes and reject anything that is not http(s)
pub fn normalize_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Error::Config(format!(
            "URL must start with http:// or https://: {}",
            url
        )));
    }
    Ok(trimmed.to_string())
}

/// Platform config path: `<config_dir>/kitchen-helper/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("kitchen-helper").join("config.toml"))
}

/// Load a TOML config file
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_toml_config(path: &Path) -> Result<Option<TomlConfig>> {
    if !path.exists() {
        warn!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;

    info!("Loaded config file: {}", path.display());
    Ok(Some(config))
}

/// Write a TOML config atomically (temp file + rename)
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, content)?;
    std::fs::rename(&temp_path, path)?;

    Ok(())
}

/// Save a resolved configuration as a TOML file that reproduces it
///
/// Used to bootstrap a config file from the current CLI/ENV/default values.
pub fn save_resolved_config(config: &FinderConfig, path: &Path) -> Result<()> {
    write_toml_config(&TomlConfig::from(config), path)?;
    info!("Wrote config file: {}", path.display());
    Ok(())
}
