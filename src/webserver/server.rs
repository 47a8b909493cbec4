/// Axum webserver implementation
///
/// Server lifecycle: bind, serve, graceful shutdown.
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::{
    config::WebserverConfig,
    hub::HubHandle,
    logger::{self, LogTag},
    webserver::{routes, state::AppState},
};

/// Global shutdown notifier
static SHUTDOWN_NOTIFY: once_cell::sync::Lazy<Arc<Notify>> =
    once_cell::sync::Lazy::new(|| Arc::new(Notify::new()));

/// Start the webserver
///
/// Blocks until the server is shut down through `shutdown()`.
pub async fn start_server(hub: HubHandle, config: WebserverConfig) -> Result<(), String> {
    config.validate()?;

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| format!("Invalid bind address: {}", e))?;

    let listener = TcpListener::bind(&addr).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::AddrInUse => format!(
            "Failed to bind to {}: Address already in use\n\
             \n\
             Another wallhub instance is probably running on this port.",
            addr
        ),
        std::io::ErrorKind::PermissionDenied => format!(
            "Failed to bind to {}: Permission denied\n\
             \n\
             Port {} requires elevated privileges on this system.\n\
             Consider using a port above 1024.",
            addr, config.port
        ),
        _ => format!("Failed to bind to {}: {}", addr, e),
    })?;

    logger::info(
        LogTag::Webserver,
        &format!(
            "Listening for wall clients on ws://{}{}/<wall_id>",
            addr,
            config.websocket.path.trim_end_matches('/')
        ),
    );

    let state = Arc::new(AppState::new(hub, config));

    let shutdown_signal = async {
        SHUTDOWN_NOTIFY.notified().await;
        logger::info(
            LogTag::Webserver,
            "Received shutdown signal, stopping webserver...",
        );
    };

    serve(listener, state, shutdown_signal).await?;

    logger::info(LogTag::Webserver, "Webserver stopped gracefully");

    Ok(())
}

/// Serve the router on an already bound listener until `shutdown` resolves
///
/// Upgraded WebSocket connections are not tracked by axum, so they are told to
/// close through the state once `shutdown` resolves. Each one drops its hub
/// handle on the way out, which lets the coordination loop finish.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> Result<(), String>
where
    F: Future<Output = ()> + Send + 'static,
{
    let connections = state.clone();
    let shutdown = async move {
        shutdown.await;
        connections.close_connections();
    };

    axum::serve(listener, routes::create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| format!("Server error: {}", e))
}

/// Trigger webserver shutdown
pub fn shutdown() {
    logger::debug(LogTag::Webserver, "Triggering webserver shutdown...");
    SHUTDOWN_NOTIFY.notify_one();
}
