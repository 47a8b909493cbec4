/// Shared application state for the webserver
use crate::config::WebserverConfig;
use crate::hub::HubHandle;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared application state passed to all route handlers
pub struct AppState {
    /// Producer handle for the coordination hub
    pub hub: HubHandle,

    /// Webserver configuration
    pub config: Arc<WebserverConfig>,

    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,

    /// Flipped to `true` once the server is shutting down
    closing: watch::Sender<bool>,
}

impl AppState {
    pub fn new(hub: HubHandle, config: WebserverConfig) -> Self {
        let (closing, _) = watch::channel(false);

        Self {
            hub,
            config: Arc::new(config),
            startup_time: chrono::Utc::now(),
            closing,
        }
    }

    pub fn uptime_seconds(&self) -> i64 {
        (chrono::Utc::now() - self.startup_time).num_seconds()
    }

    /// Receiver each WebSocket connection watches to end its loop on shutdown
    pub fn closing(&self) -> watch::Receiver<bool> {
        self.closing.subscribe()
    }

    /// Tell every open connection to close
    pub fn close_connections(&self) {
        self.closing.send_replace(true);
    }
}
