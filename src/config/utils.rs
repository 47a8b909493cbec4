use super::schemas::Config;
/// Configuration utilities - loading and access helpers
///
/// - Loading configuration from a TOML file (defaults when absent)
/// - Thread-safe read access through `with_config`
use once_cell::sync::OnceCell;
use std::sync::RwLock;

use crate::logger::{self, LogTag};

/// Global configuration instance
///
/// Read it through `with_config` / `get_config_clone`. If nothing was loaded
/// the first read installs the defaults.
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

/// Load configuration from the default path
pub fn load_config() -> Result<(), String> {
    load_config_from_path(CONFIG_FILE_PATH)
}

/// Load configuration from a specific file path and install it globally
///
/// A missing file is not an error: defaults are used and a warning is logged.
/// The loaded configuration is validated before it is installed.
pub fn load_config_from_path(path: &str) -> Result<(), String> {
    let config = if std::path::Path::new(path).exists() {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;

        parse_config(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path, e))?
    } else {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path),
        );
        Config::default()
    };

    config.validate()?;

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())?;

    logger::debug(LogTag::Config, &format!("Configuration loaded from '{}'", path));

    Ok(())
}

/// Parse a TOML document into a `Config`; omitted fields take defaults,
/// unknown keys are rejected
pub fn parse_config(contents: &str) -> Result<Config, String> {
    toml::from_str::<Config>(contents).map_err(|e| e.to_string())
}

/// Execute a function with read access to the configuration
///
/// # Example
/// ```
/// use wallhub::config::with_config;
///
/// let capacity = with_config(|cfg| cfg.hub.outbox_capacity);
/// assert!(capacity > 0);
/// ```
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    let config_lock = CONFIG.get_or_init(|| RwLock::new(Config::default()));

    let config = config_lock
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    f(&config)
}

/// Get a clone of the entire configuration
///
/// Useful when values must be held across await points.
pub fn get_config_clone() -> Config {
    with_config(|cfg| cfg.clone())
}
