/// Coordination loop - the single owner of the client registry
///
/// Producers (one per connection) talk to the hub only through three queues
/// held by a cloneable `HubHandle`:
/// - register: newly accepted clients
/// - unregister: closed or failed clients
/// - inbound: received payloads to route
///
/// `Hub::run` drains all three with an unbiased `tokio::select!`, so no queue
/// starves and the loop only suspends while every queue is empty or while a
/// handler is running. Registry mutations never happen concurrently.
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use super::client::{ClientHandle, ClientId, Outbox};
use super::envelope::{Action, Envelope};
use super::handler::{ActionHandler, Fanout, Origin};
use super::metrics::HubMetrics;
use super::registry::Registry;
use crate::{
    arguments::is_debug_hub_enabled,
    config::HubConfig,
    errors::HubError,
    logger::{self, LogTag},
};

// ============================================================================
// HUB TYPES
// ============================================================================

/// One received payload and the client it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub payload: Vec<u8>,
    pub origin: ClientId,
}

/// A client waiting to be registered, acknowledged once it is in the registry
struct Registration {
    handle: ClientHandle,
    ack: oneshot::Sender<()>,
}

/// Producer side of the hub's queues
///
/// Cheap to clone; every connection task holds one. The loop stops once all
/// handles are dropped and the queues are drained.
#[derive(Clone)]
pub struct HubHandle {
    register_tx: mpsc::UnboundedSender<Registration>,
    unregister_tx: mpsc::UnboundedSender<ClientId>,
    inbound_tx: mpsc::UnboundedSender<Inbound>,
    outbox_capacity: usize,
    metrics: Arc<HubMetrics>,
}

impl HubHandle {
    /// Create a client on `wall_id` with the configured outbox capacity
    ///
    /// The client is not registered until it is passed to `register`.
    pub fn new_client(&self, wall_id: impl Into<String>) -> (ClientHandle, Outbox) {
        ClientHandle::new(wall_id, self.outbox_capacity)
    }

    /// Register a client and wait until the hub has taken it
    ///
    /// Anything the caller queues after this returns is routed with the
    /// client already in the registry.
    pub async fn register(&self, handle: ClientHandle) -> Result<(), HubError> {
        let (ack, registered) = oneshot::channel();
        self.register_tx
            .send(Registration { handle, ack })
            .map_err(|_| HubError::Closed { queue: "register" })?;

        registered
            .await
            .map_err(|_| HubError::Closed { queue: "register" })
    }

    /// Queue a client for removal; unknown ids are ignored by the hub
    pub fn unregister(&self, id: ClientId) -> Result<(), HubError> {
        self.unregister_tx
            .send(id)
            .map_err(|_| HubError::Closed { queue: "unregister" })
    }

    /// Queue a received payload for routing
    pub fn inbound(&self, payload: Vec<u8>, origin: ClientId) -> Result<(), HubError> {
        self.inbound_tx
            .send(Inbound { payload, origin })
            .map_err(|_| HubError::Closed { queue: "inbound" })
    }

    pub fn metrics(&self) -> Arc<HubMetrics> {
        self.metrics.clone()
    }
}

// ============================================================================
// HUB
// ============================================================================

pub struct Hub {
    registry: Registry,
    handler: Box<dyn ActionHandler>,
    register_rx: mpsc::UnboundedReceiver<Registration>,
    unregister_rx: mpsc::UnboundedReceiver<ClientId>,
    inbound_rx: mpsc::UnboundedReceiver<Inbound>,
    metrics: Arc<HubMetrics>,
    /// `--debug-hub`, resolved once at construction
    trace_messages: bool,
}

impl Hub {
    /// Build a hub and the handle producers use to reach it
    pub fn new<H>(handler: H, config: &HubConfig) -> (Self, HubHandle)
    where
        H: ActionHandler + 'static,
    {
        let (register_tx, register_rx) = mpsc::unbounded_channel();
        let (unregister_tx, unregister_rx) = mpsc::unbounded_channel();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let metrics = HubMetrics::new();

        let hub = Self {
            registry: Registry::new(metrics.clone()),
            handler: Box::new(handler),
            register_rx,
            unregister_rx,
            inbound_rx,
            metrics: metrics.clone(),
            trace_messages: is_debug_hub_enabled(),
        };

        let handle = HubHandle {
            register_tx,
            unregister_tx,
            inbound_tx,
            outbox_capacity: config.outbox_capacity,
            metrics,
        };

        (hub, handle)
    }

    /// Run the coordination loop
    ///
    /// Returns only after every `HubHandle` has been dropped and all queued
    /// work has been processed.
    pub async fn run(mut self) {
        logger::info(LogTag::Hub, "Coordination loop started");

        loop {
            tokio::select! {
                Some(registration) = self.register_rx.recv() => {
                    self.register(registration.handle);
                    // The producer may have given up waiting
                    let _ = registration.ack.send(());
                }
                Some(id) = self.unregister_rx.recv() => self.unregister(id),
                Some(inbound) = self.inbound_rx.recv() => self.route(inbound).await,
                else => break,
            }
        }

        logger::info(
            LogTag::Hub,
            &format!(
                "Coordination loop stopped (clients={})",
                self.registry.len()
            ),
        );
    }

    /// Add a client to the registry, replacing any entry with the same id
    pub fn register(&mut self, handle: ClientHandle) {
        let id = handle.id();
        let wall_id = handle.wall_id().to_string();
        let replaced = self.registry.insert(handle);

        logger::debug(
            LogTag::Hub,
            &format!(
                "Client {} registered on wall '{}' (active={}{})",
                id,
                wall_id,
                self.registry.len(),
                if replaced { ", replaced" } else { "" }
            ),
        );
    }

    /// Remove a client and close its outbox; absent clients are a no-op
    pub fn unregister(&mut self, id: ClientId) {
        if self.registry.remove(id) {
            logger::debug(
                LogTag::Hub,
                &format!(
                    "Client {} unregistered (active={})",
                    id,
                    self.registry.len()
                ),
            );
        }
    }

    /// Parse one inbound payload and dispatch it to the handler
    ///
    /// Malformed payloads are logged and dropped; unknown kinds are dropped
    /// silently. Neither touches the registry.
    pub async fn route(&mut self, inbound: Inbound) {
        self.metrics.message_routed();

        let envelope = match Envelope::parse(&inbound.payload) {
            Ok(envelope) => envelope,
            Err(e) => {
                self.metrics.message_malformed();
                logger::error(
                    LogTag::Hub,
                    &format!("Socket error from client {}: {}", inbound.origin, e),
                );
                return;
            }
        };

        if self.trace_messages {
            logger::debug(LogTag::Hub, &format!("Socket msgtype: {}", envelope.kind));
            logger::debug(LogTag::Hub, &format!("Socket msg: {}", envelope.body));
        }

        let Some(action) = envelope.action() else {
            return;
        };

        match action {
            Action::Connection(action) => {
                let mut origin = Origin::new(inbound.origin, &mut self.registry);
                self.handler
                    .on_connection_action(action, envelope.body, &mut origin)
                    .await;
            }
            Action::Wall(action) => {
                let mut fanout = Fanout::new(&mut self.registry);
                self.handler
                    .on_wall_action(action, envelope.body, &mut fanout)
                    .await;
            }
        }
    }

    /// Read-only view of the registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn metrics(&self) -> Arc<HubMetrics> {
        self.metrics.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::set_cmd_args;
    use crate::handlers::RelayHandler;

    #[test]
    fn test_message_trace_follows_debug_flag() {
        // Same argument set as the arguments tests, which share CMD_ARGS
        set_cmd_args(
            ["wallhub", "--config", "walls.toml", "--debug-hub"]
                .iter()
                .map(|a| a.to_string())
                .collect(),
        );
        let (hub, _handle) = Hub::new(RelayHandler::new(), &HubConfig::default());

        assert!(hub.trace_messages);
    }
}
