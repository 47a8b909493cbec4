/// Centralized argument handling for wallhub
///
/// Features:
/// - Process-wide CMD_ARGS storage with thread-safe access
/// - Debug flag checking functions for each module
/// - Value lookup for flags such as --config <path>
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

use crate::config::CONFIG_FILE_PATH;
use crate::logger::{self, LogTag};

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// =============================================================================

/// Hub coordination loop debug mode (logs every routed envelope)
pub fn is_debug_hub_enabled() -> bool {
    has_arg("--debug-hub") || has_arg("--debug-all")
}

/// Domain handler debug mode
pub fn is_debug_handler_enabled() -> bool {
    has_arg("--debug-handler") || has_arg("--debug-all")
}

/// Webserver / websocket transport debug mode
pub fn is_debug_webserver_enabled() -> bool {
    has_arg("--debug-webserver") || has_arg("--debug-all")
}

pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

/// Path of the TOML configuration file (--config <path>)
pub fn get_config_path() -> String {
    get_arg_value("--config").unwrap_or_else(|| CONFIG_FILE_PATH.to_string())
}

pub fn print_help() {
    println!("wallhub - real-time coordination hub for collaborative card walls");
    println!();
    println!("USAGE:");
    println!("    wallhub [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --config <path>        Configuration file (default: {})", CONFIG_FILE_PATH);
    println!("    --debug-hub            Log every routed envelope");
    println!("    --debug-handler        Log domain handler decisions");
    println!("    --debug-webserver      Log websocket connection lifecycle");
    println!("    --debug-all            Enable every debug mode");
    println!("    --verbose              Enable verbose logging for all modules");
    println!("    --quiet                Only show warnings and errors");
    println!("    --log-tags=<a,b>       Only show logs for the listed tags");
    println!("    -h, --help             Print this help");
}

/// Log which debug modes are active
pub fn print_debug_info() {
    let modes: Vec<String> = get_cmd_args()
        .into_iter()
        .filter(|a| a.starts_with("--debug-") || a.starts_with("--verbose"))
        .collect();

    if !modes.is_empty() {
        logger::info(
            LogTag::System,
            &format!("Debug modes enabled: {}", modes.join(" ")),
        );
    }
}
