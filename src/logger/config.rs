/// Logger configuration derived from command-line flags
///
/// Holds the minimum level and the per-tag debug/verbose sets consulted by
/// `core::should_log` on every call.
use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Most detailed level that may be printed
    pub min_level: LogLevel,

    /// Tags with --debug-<key> enabled ("all" enables every tag)
    pub debug_tags: HashSet<String>,

    /// Tags with --verbose-<key> enabled
    pub verbose_tags: HashSet<String>,

    /// If non-empty, only these tags are printed (errors always are)
    pub enabled_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Get a copy of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    with_logger_config(|config| config.clone())
}

/// Replace the logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    update_logger_config(|current| *current = config);
}

/// Modify the logger configuration in place
pub fn update_logger_config<F>(f: F)
where
    F: FnOnce(&mut LoggerConfig),
{
    let mut guard = LOGGER_CONFIG
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut guard);
}

pub(crate) fn with_logger_config<F, R>(f: F) -> R
where
    F: FnOnce(&LoggerConfig) -> R,
{
    let guard = LOGGER_CONFIG
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&guard)
}

/// Build the logger configuration from the process arguments
pub fn init_from_args() {
    set_logger_config(config_from_args(&arguments::get_cmd_args()));
}

fn config_from_args(args: &[String]) -> LoggerConfig {
    let mut config = LoggerConfig::default();

    for arg in args {
        if let Some(key) = arg.strip_prefix("--debug-") {
            config.debug_tags.insert(key.to_lowercase());
        } else if let Some(key) = arg.strip_prefix("--verbose-") {
            config.verbose_tags.insert(key.to_lowercase());
        } else if let Some(keys) = arg.strip_prefix("--log-tags=") {
            config
                .enabled_tags
                .extend(keys.split(',').map(|k| k.trim().to_lowercase()));
        }
    }

    if args.iter().any(|a| a == "--verbose") || !config.verbose_tags.is_empty() {
        config.min_level = LogLevel::Verbose;
    } else if !config.debug_tags.is_empty() {
        config.min_level = LogLevel::Debug;
    } else if args.iter().any(|a| a == "--quiet") {
        config.min_level = LogLevel::Warning;
    }

    config
}

pub(crate) fn is_debug_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.debug_tags.contains("all") || config.debug_tags.contains(&tag.to_debug_key())
}

pub(crate) fn is_verbose_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.verbose_tags.contains("all") || config.verbose_tags.contains(&tag.to_debug_key())
}
