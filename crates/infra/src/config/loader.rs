//! Configuration loader
//!
//! Loads portal configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the tenant variables are missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PORTALWATCH_TENANT`: Tenant portal hostname (required)
//! - `PORTALWATCH_TOKEN`: 64-hex API token (required)
//! - `PORTALWATCH_RETRY_INTERVAL`: Seconds to wait after an HTTP 429
//! - `PORTALWATCH_MAX_RETRIES`: Rate-limit retries before giving up
//! - `PORTALWATCH_TIMEOUT`: Per-request timeout in seconds
//! - `PORTALWATCH_EXPONENTIAL_BACKOFF`: Double the wait on each retry
//!   (true/false)
//! - `PORTALWATCH_ENDPOINT`: Base URL used instead of `https://{tenant}`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./portalwatch.json` or `./portalwatch.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../portalwatch.json` or `../portalwatch.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use portalwatch_domain::{Config, HttpConfig, PortalwatchError, Result, TenantConfig};

pub const ENV_TENANT: &str = "PORTALWATCH_TENANT";
pub const ENV_TOKEN: &str = "PORTALWATCH_TOKEN";
pub const ENV_RETRY_INTERVAL: &str = "PORTALWATCH_RETRY_INTERVAL";
pub const ENV_MAX_RETRIES: &str = "PORTALWATCH_MAX_RETRIES";
pub const ENV_TIMEOUT: &str = "PORTALWATCH_TIMEOUT";
pub const ENV_EXPONENTIAL_BACKOFF: &str = "PORTALWATCH_EXPONENTIAL_BACKOFF";
pub const ENV_ENDPOINT: &str = "PORTALWATCH_ENDPOINT";

const FILE_STEMS: [&str; 2] = ["portalwatch", "config"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the tenant
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `PortalwatchError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<Config> {
    load_optional()?.ok_or_else(|| {
        PortalwatchError::Config(
            "No config file found in any of the standard locations".to_string(),
        )
    })
}

/// Like [`load`], but `Ok(None)` when neither the environment nor any
/// standard location provides a configuration.
///
/// # Errors
/// Returns `PortalwatchError::Config` if a probed file exists but cannot be
/// read or parsed.
pub fn load_optional() -> Result<Option<Config>> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            return Ok(Some(config));
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
        }
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)).map(Some),
        None => Ok(None),
    }
}

/// Load configuration from environment variables
///
/// `PORTALWATCH_TENANT` and `PORTALWATCH_TOKEN` must be present; the
/// transport settings fall back to their defaults.
///
/// # Errors
/// Returns `PortalwatchError::Config` if required variables are missing
/// or numeric values do not parse.
pub fn load_from_env() -> Result<Config> {
    let hostname = env_var(ENV_TENANT)?;
    let token = env_var(ENV_TOKEN)?;

    let defaults = HttpConfig::default();
    let http = HttpConfig {
        timeout_seconds: env_parse(ENV_TIMEOUT, defaults.timeout_seconds)?,
        retry_interval_seconds: env_parse(ENV_RETRY_INTERVAL, defaults.retry_interval_seconds)?,
        max_rate_limit_retries: env_parse(ENV_MAX_RETRIES, defaults.max_rate_limit_retries)?,
        exponential_backoff: env_bool(ENV_EXPONENTIAL_BACKOFF, defaults.exponential_backoff),
        endpoint_override: std::env::var(ENV_ENDPOINT).ok().filter(|v| !v.trim().is_empty()),
        ..defaults
    };

    Ok(Config { tenant: Some(TenantConfig { hostname, token }), http, allow_list: None })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PortalwatchError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PortalwatchError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PortalwatchError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PortalwatchError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, choosing the format by the
/// file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PortalwatchError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PortalwatchError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PortalwatchError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
        candidates.extend(candidates_in(&cwd.join("..")).take(2));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    FILE_STEMS.iter().flat_map(move |stem| {
        ["json", "toml"].into_iter().map(move |ext| dir.join(format!("{stem}.{ext}")))
    })
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            PortalwatchError::Config(format!("Missing required environment variable: {key}"))
        })
}

/// Parse an optional numeric environment variable, using `default` when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| PortalwatchError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
