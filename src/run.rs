/// Service startup
///
/// Spawns the coordination loop, installs the Ctrl+C handler and serves the
/// WebSocket transport until shutdown.
use crate::{
    config,
    errors::WallHubError,
    handlers::RelayHandler,
    hub::Hub,
    logger::{self, LogTag},
    webserver,
};

/// Run the hub and its webserver until shutdown
pub async fn run_server() -> Result<(), WallHubError> {
    let config = config::get_config_clone();
    config.validate().map_err(WallHubError::Configuration)?;

    logger::info(
        LogTag::System,
        &format!(
            "Hub configured (outbox_capacity={}, bind={})",
            config.hub.outbox_capacity,
            config.webserver.bind_address()
        ),
    );

    let (hub, handle) = Hub::new(RelayHandler::new(), &config.hub);
    let hub_task = tokio::spawn(hub.run());

    ctrlc::set_handler(|| {
        logger::info(LogTag::System, "Ctrl+C received, shutting down...");
        webserver::shutdown();
    })
    .map_err(|e| WallHubError::Configuration(format!("Failed to install Ctrl+C handler: {}", e)))?;

    let served = webserver::start_server(handle, config.webserver)
        .await
        .map_err(WallHubError::Webserver);

    // The webserver owned the last HubHandle; the loop drains and exits.
    if let Err(e) = hub_task.await {
        logger::error(LogTag::Hub, &format!("Coordination loop panicked: {}", e));
    }

    logger::info(LogTag::System, "Shutdown complete");
    served
}
