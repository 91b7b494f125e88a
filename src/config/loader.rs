//! Configuration file loading with precedence handling.

use crate::client::{ApiConfig, DEFAULT_API_HOST, DEFAULT_TIMEOUT};
use crate::model::FlagStyle;
use crate::state::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CITYSEARCH_CONFIG";

/// Environment variable overriding the API host.
pub const API_HOST_ENV: &str = "CITYSEARCH_API_HOST";

/// Environment variable overriding the API key.
pub const API_KEY_ENV: &str = "CITYSEARCH_API_KEY";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// No API key in the config file, environment or CLI.
    #[error("No API key configured: set api_key, {API_KEY_ENV} or --api-key")]
    MissingApiKey,

    /// A setting is present but unusable.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Setting name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/citysearch/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// RapidAPI host (e.g., "wft-geo-db.p.rapidapi.com").
    #[serde(default)]
    pub api_host: Option<String>,

    /// RapidAPI key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL override (scheme + authority), mainly for testing.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Initial result limit.
    #[serde(default)]
    pub default_limit: Option<u32>,

    /// Transport timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// How to render country flags.
    #[serde(default)]
    pub flag_style: Option<FlagStyle>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// RapidAPI host.
    pub api_host: String,
    /// RapidAPI key. Required before the client can be built.
    pub api_key: Option<String>,
    /// Base URL override.
    pub base_url: Option<String>,
    /// Initial result limit.
    pub default_limit: u32,
    /// Transport timeout in seconds.
    pub timeout_secs: u64,
    /// Flag rendering.
    pub flag_style: FlagStyle,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_host: DEFAULT_API_HOST.to_string(),
            api_key: None,
            base_url: None,
            default_limit: DEFAULT_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            flag_style: FlagStyle::default(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Check values that the precedence chain cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a limit outside `1..=10` or a
    /// zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&self.default_limit) {
            return Err(ConfigError::InvalidValue {
                field: "default_limit",
                reason: format!(
                    "{} is outside {MIN_LIMIT}..={MAX_LIMIT}",
                    self.default_limit
                ),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Connection settings for the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingApiKey` if no non-blank key was
    /// configured anywhere.
    pub fn api_config(&self) -> Result<ApiConfig, ConfigError> {
        let key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(ApiConfig {
            host: self.api_host.clone(),
            key: key.to_string(),
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/citysearch/citysearch.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("citysearch").join("citysearch.log")
    } else {
        PathBuf::from("citysearch.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/citysearch/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("citysearch").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CITYSEARCH_CONFIG` environment variable
/// 3. Default path `~/.config/citysearch/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed,
/// or if `CITYSEARCH_CONFIG` is not valid unicode.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    match std::env::var(CONFIG_ENV) {
        Ok(env_path) => return load_config_file(PathBuf::from(env_path)),
        Err(std::env::VarError::NotUnicode(raw)) => {
            return Err(ConfigError::InvalidPath(raw.to_string_lossy().into_owned()));
        }
        Err(std::env::VarError::NotPresent) => {}
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        api_host: config.api_host.unwrap_or(defaults.api_host),
        api_key: config.api_key.or(defaults.api_key),
        base_url: config.base_url.or(defaults.base_url),
        default_limit: config.default_limit.unwrap_or(defaults.default_limit),
        timeout_secs: config.timeout_secs.unwrap_or(defaults.timeout_secs),
        flag_style: config.flag_style.unwrap_or(defaults.flag_style),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CITYSEARCH_API_HOST`: Override API host
/// - `CITYSEARCH_API_KEY`: Override API key
///
/// Empty values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(host) = non_empty_env(API_HOST_ENV) {
        config.api_host = host;
    }

    if let Some(key) = non_empty_env(API_KEY_ENV) {
        config.api_key = Some(key);
    }

    config
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Overrides taken from the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--api-host`
    pub api_host: Option<String>,
    /// `--api-key`
    pub api_key: Option<String>,
    /// `--limit`
    pub limit: Option<u32>,
    /// `--flags`
    pub flag_style: Option<FlagStyle>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(host) = cli.api_host {
        config.api_host = host;
    }

    if let Some(key) = cli.api_key {
        config.api_key = Some(key);
    }

    if let Some(limit) = cli.limit {
        config.default_limit = limit;
    }

    if let Some(style) = cli.flag_style {
        config.flag_style = style;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
