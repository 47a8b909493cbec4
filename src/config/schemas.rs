/// Configuration schemas - all config structures defined once with defaults
use crate::config_struct;

// ============================================================================
// HUB CONFIGURATION
// ============================================================================

config_struct! {
    /// Coordination hub configuration
    pub struct HubConfig {
        /// Capacity of each client's outbox; a full outbox evicts the client
        outbox_capacity: usize = 256,
    }
}

// ============================================================================
// WEBSERVER CONFIGURATION
// ============================================================================

config_struct! {
    /// WebSocket transport configuration
    pub struct WebSocketConfig {
        /// Route prefix; clients connect to `<path>/<wall_id>`
        path: String = "/ws".to_string(),

        /// Largest accepted inbound frame
        max_message_bytes: usize = 64 * 1024,
    }

    /// Webserver configuration
    pub struct WebserverConfig {
        host: String = "127.0.0.1".to_string(),
        port: u16 = 8080,
        websocket: WebSocketConfig = WebSocketConfig::default(),
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sub-configurations
    pub struct Config {
        hub: HubConfig = HubConfig::default(),
        webserver: WebserverConfig = WebserverConfig::default(),
    }
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl Config {
    /// Validate the whole configuration tree
    pub fn validate(&self) -> Result<(), String> {
        self.hub.validate()?;
        self.webserver.validate()
    }
}

impl HubConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.outbox_capacity == 0 {
            return Err("Hub outbox_capacity must be > 0".to_string());
        }
        Ok(())
    }
}

impl WebserverConfig {
    /// Validate webserver configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }

        if !self.websocket.path.starts_with('/') {
            return Err(format!(
                "WebSocket path must start with '/', got '{}'",
                self.websocket.path
            ));
        }

        if self.websocket.max_message_bytes == 0 {
            return Err("WebSocket max_message_bytes must be > 0".to_string());
        }

        Ok(())
    }

    /// Get the full bind address (host:port)
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Route pattern for wall connections, e.g. `/ws/:wall_id`
    pub fn wall_route(&self) -> String {
        format!("{}/:wall_id", self.websocket.path.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.hub.outbox_capacity, 256);
        assert_eq!(config.webserver.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.webserver.wall_route(), "/ws/:wall_id");
    }

    #[test]
    fn test_validation_failures() {
        let mut config = Config::default();
        config.hub.outbox_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.webserver.websocket.path = "ws".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.webserver.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_trailing_slash_route() {
        let mut config = WebserverConfig::default();
        config.websocket.path = "/walls/".to_string();
        assert_eq!(config.wall_route(), "/walls/:wall_id");
    }
}
