use serde::Serialize;
/// Hub metrics collection
///
/// Counters written only by the coordination loop and readable from anywhere
/// without going through the registry.
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Hub-level metrics (aggregate across all clients)
#[derive(Debug, Default)]
pub struct HubMetrics {
    /// Registrations processed (lifetime)
    total_registrations: AtomicU64,

    /// Current registry size
    active_clients: AtomicUsize,

    /// Inbound payloads taken off the queue
    messages_routed: AtomicU64,

    /// Inbound payloads dropped as malformed
    messages_malformed: AtomicU64,

    /// Outbox enqueues that succeeded
    messages_delivered: AtomicU64,

    /// Clients evicted because their outbox was full or closed
    evictions: AtomicU64,
}

impl HubMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn registration(&self) {
        self.total_registrations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn set_active_clients(&self, count: usize) {
        self.active_clients.store(count, Ordering::Relaxed);
    }

    pub fn message_routed(&self) {
        self.messages_routed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn message_malformed(&self) {
        self.messages_malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn messages_delivered(&self, count: u64) {
        self.messages_delivered.fetch_add(count, Ordering::Relaxed);
    }

    pub fn clients_evicted(&self, count: u64) {
        self.evictions.fetch_add(count, Ordering::Relaxed);
    }

    pub fn active_clients(&self) -> usize {
        self.active_clients.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> HubMetricsSnapshot {
        HubMetricsSnapshot {
            total_registrations: self.total_registrations.load(Ordering::Relaxed),
            active_clients: self.active_clients.load(Ordering::Relaxed),
            messages_routed: self.messages_routed.load(Ordering::Relaxed),
            messages_malformed: self.messages_malformed.load(Ordering::Relaxed),
            messages_delivered: self.messages_delivered.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

/// Hub metrics snapshot (serializable)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HubMetricsSnapshot {
    pub total_registrations: u64,
    pub active_clients: usize,
    pub messages_routed: u64,
    pub messages_malformed: u64,
    pub messages_delivered: u64,
    pub evictions: u64,
}
