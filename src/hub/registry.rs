/// Client registry and fan-out delivery
///
/// The registry maps each live client to its wall and outbox sender. It is
/// owned by the coordination loop and never shared, so it needs no lock.
///
/// Delivery policy: every recipient gets a non-blocking `try_send`. A full or
/// closed outbox marks the recipient as dead; it is removed in the same pass,
/// which drops the last sender and closes its outbox. Iteration order is that
/// of the underlying `HashMap` and carries no guarantee.
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};

use super::client::{ClientHandle, ClientId, OutboundMessage};
use super::metrics::HubMetrics;
use crate::logger::{self, LogTag};

struct RegistryEntry {
    wall_id: String,
    outbox: mpsc::Sender<OutboundMessage>,
}

/// Outcome of one fan-out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Recipients whose outbox accepted the message
    pub delivered: usize,

    /// Recipients evicted during this fan-out
    pub evicted: Vec<ClientId>,
}

impl DeliveryReport {
    /// Number of clients the fan-out targeted
    pub fn recipients(&self) -> usize {
        self.delivered + self.evicted.len()
    }
}

pub struct Registry {
    clients: HashMap<ClientId, RegistryEntry>,
    metrics: Arc<HubMetrics>,
}

impl Registry {
    pub(crate) fn new(metrics: Arc<HubMetrics>) -> Self {
        Self {
            clients: HashMap::new(),
            metrics,
        }
    }

    /// Insert a client; re-registering the same id replaces the old entry
    ///
    /// Returns true if an entry was replaced.
    pub(crate) fn insert(&mut self, handle: ClientHandle) -> bool {
        let (id, wall_id, outbox) = handle.into_parts();
        let replaced = self
            .clients
            .insert(id, RegistryEntry { wall_id, outbox })
            .is_some();

        self.metrics.registration();
        self.metrics.set_active_clients(self.clients.len());
        replaced
    }

    /// Remove a client and close its outbox; absent ids are a no-op
    ///
    /// Returns true if the client was registered.
    pub(crate) fn remove(&mut self, id: ClientId) -> bool {
        let removed = self.clients.remove(&id).is_some();
        if removed {
            self.metrics.set_active_clients(self.clients.len());
        }
        removed
    }

    pub fn contains(&self, id: ClientId) -> bool {
        self.clients.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Wall the client was registered on
    pub fn wall_of(&self, id: ClientId) -> Option<&str> {
        self.clients.get(&id).map(|entry| entry.wall_id.as_str())
    }

    /// Number of clients registered on `wall_id`
    pub fn subscribers(&self, wall_id: &str) -> usize {
        self.clients
            .values()
            .filter(|entry| entry.wall_id == wall_id)
            .count()
    }

    /// Deliver to every registered client regardless of wall
    pub(crate) fn broadcast_all(&mut self, message: &[u8]) -> DeliveryReport {
        self.deliver(message, |_, _| true)
    }

    /// Deliver to every client registered on `wall_id`
    pub(crate) fn broadcast_channel(&mut self, wall_id: &str, message: &[u8]) -> DeliveryReport {
        self.deliver(message, |_, entry_wall| entry_wall == wall_id)
    }

    /// Deliver to a single client, if it is registered
    pub(crate) fn send_to(&mut self, id: ClientId, message: &[u8]) -> DeliveryReport {
        self.deliver(message, |client, _| client == id)
    }

    fn deliver<F>(&mut self, message: &[u8], matches: F) -> DeliveryReport
    where
        F: Fn(ClientId, &str) -> bool,
    {
        let mut report = DeliveryReport::default();

        self.clients.retain(|&id, entry| {
            if !matches(id, entry.wall_id.as_str()) {
                return true;
            }

            match entry.outbox.try_send(message.to_vec()) {
                Ok(()) => {
                    report.delivered += 1;
                    true
                }
                Err(TrySendError::Full(_)) | Err(TrySendError::Closed(_)) => {
                    report.evicted.push(id);
                    false
                }
            }
        });

        self.metrics.messages_delivered(report.delivered as u64);
        if !report.evicted.is_empty() {
            self.metrics.clients_evicted(report.evicted.len() as u64);
            self.metrics.set_active_clients(self.clients.len());
            logger::debug(
                LogTag::Hub,
                &format!(
                    "Evicted {} unresponsive client(s): {:?} (active={})",
                    report.evicted.len(),
                    report.evicted,
                    self.clients.len()
                ),
            );
        }

        report
    }
}
