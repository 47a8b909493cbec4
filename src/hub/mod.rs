/// Coordination hub for wall clients
///
/// The hub tracks which client connections are alive, the wall each one is
/// subscribed to, and routes inbound envelopes to domain handlers which fan
/// results out to walls.
///
/// ## Key Components
/// - `client`: client handles and their bounded outboxes
/// - `envelope`: `<kind> ~ ~ <body>` parsing and the action set
/// - `registry`: client registry and the eviction-on-backpressure fan-out
/// - `handler`: the `ActionHandler` trait and its `Origin` / `Fanout` contexts
/// - `coordinator`: the single-owner loop and the `HubHandle` producers use
/// - `metrics`: counters readable without touching the registry
pub mod client;
pub mod coordinator;
pub mod envelope;
pub mod handler;
pub mod metrics;
pub mod registry;

#[cfg(test)]
mod tests;

pub use client::{ClientHandle, ClientId, Outbox, OutboundMessage};
pub use coordinator::{Hub, HubHandle, Inbound};
pub use envelope::{Action, ConnectionAction, Envelope, WallAction, DELIMITER};
pub use handler::{ActionHandler, Fanout, Origin};
pub use metrics::{HubMetrics, HubMetricsSnapshot};
pub use registry::{DeliveryReport, Registry};
