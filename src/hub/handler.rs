/// Domain handler boundary
///
/// The hub parses an envelope and hands its body to an `ActionHandler`
/// together with a context that matches the action's scope:
/// - connection actions get an `Origin` that can reply to the sender
/// - wall actions get a `Fanout` that can broadcast to walls
///
/// Handlers return nothing; they perform their side effect, fan out if
/// needed, and log their own failures.
use async_trait::async_trait;

use super::client::ClientId;
use super::envelope::{ConnectionAction, WallAction};
use super::registry::{DeliveryReport, Registry};

#[async_trait]
pub trait ActionHandler: Send {
    /// Handle `init` / `addWall`, scoped to the connection that sent them
    async fn on_connection_action(
        &mut self,
        action: ConnectionAction,
        body: &str,
        origin: &mut Origin<'_>,
    );

    /// Handle a wall-scoped action; broadcasting is up to the handler
    async fn on_wall_action(&mut self, action: WallAction, body: &str, fanout: &mut Fanout<'_>);
}

/// The client an inbound message came from
pub struct Origin<'a> {
    id: ClientId,
    registry: &'a mut Registry,
}

impl<'a> Origin<'a> {
    pub(crate) fn new(id: ClientId, registry: &'a mut Registry) -> Self {
        Self { id, registry }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Wall the sender registered on; `None` once it has been removed
    pub fn wall_id(&self) -> Option<&str> {
        self.registry.wall_of(self.id)
    }

    pub fn is_registered(&self) -> bool {
        self.registry.contains(self.id)
    }

    /// Reply to the sender with the usual delivery policy
    ///
    /// A sender that is no longer registered receives nothing.
    pub fn send(&mut self, message: &[u8]) -> DeliveryReport {
        self.registry.send_to(self.id, message)
    }
}

/// Broadcast primitives handed to wall-scoped handlers
pub struct Fanout<'a> {
    registry: &'a mut Registry,
}

impl<'a> Fanout<'a> {
    pub(crate) fn new(registry: &'a mut Registry) -> Self {
        Self { registry }
    }

    /// Deliver to every registered client
    pub fn broadcast_all(&mut self, message: &[u8]) -> DeliveryReport {
        self.registry.broadcast_all(message)
    }

    /// Deliver to every client registered on `wall_id`
    pub fn broadcast_channel(&mut self, wall_id: &str, message: &[u8]) -> DeliveryReport {
        self.registry.broadcast_channel(wall_id, message)
    }

    /// Number of clients currently registered on `wall_id`
    pub fn subscribers(&self, wall_id: &str) -> usize {
        self.registry.subscribers(wall_id)
    }
}
