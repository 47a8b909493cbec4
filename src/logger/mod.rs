//! Structured, tag-based logging for wallhub
//!
//! This module provides a small logging API with:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-module debug control via --debug-<module> flags
//! - Colored console output with aligned tag and level columns
//!
//! ## Usage
//!
//! ```rust
//! use wallhub::logger::{self, LogTag};
//!
//! logger::error(LogTag::Hub, "Poorly formatted message");
//! logger::warning(LogTag::Webserver, "Client sent an oversized frame");
//! logger::info(LogTag::System, "Hub started");
//! logger::debug(LogTag::Hub, "Socket msgtype: addCard"); // Only if --debug-hub
//! logger::verbose(LogTag::Hub, "Raw payload: ..."); // Only if --verbose
//! ```
//!
//! ## Initialization
//!
//! Call once at startup, before the hub or the webserver is started:
//! ```rust
//! wallhub::logger::init();
//! ```

mod config;
mod core;
mod format;
mod levels;
mod special;
mod tags;

pub use config::{
    get_logger_config, init_from_args, set_logger_config, update_logger_config, LoggerConfig,
};
pub use levels::LogLevel;
pub use special::log_delivery;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Scans command-line arguments for --debug-<module>, --verbose and --quiet
/// flags and installs the resulting filtering rules.
pub fn init() {
    config::init_from_args();
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (shown unless --quiet is used)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Debug logs are ONLY shown when the --debug-<module> flag for the tag is
/// provided, e.g. `--debug-hub` for `LogTag::Hub`.
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (only with --verbose or --verbose-<module>)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}
