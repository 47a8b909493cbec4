use anyhow::{Context, Result};
use wallhub::{
    arguments::{get_config_path, is_help_requested, print_debug_info, print_help},
    config,
    logger::{self as logger, LogTag},
    run,
};

/// Main entry point for wallhub
#[tokio::main]
async fn main() {
    logger::init();

    if is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    logger::info(LogTag::System, "wallhub starting up...");

    print_debug_info();

    if let Err(e) = start().await {
        logger::error(LogTag::System, &format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn start() -> Result<()> {
    let path = get_config_path();
    config::load_config_from_path(&path)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Failed to load configuration from {}", path))?;

    run::run_server().await.context("wallhub stopped with an error")?;

    Ok(())
}
