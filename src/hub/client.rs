/// Client connection handles and their outboxes
///
/// A `ClientHandle` carries the sending half of a bounded queue; the matching
/// `Outbox` (receiving half) goes to the transport writer. Once the handle is
/// registered the hub holds the only sender, so removing the registry entry is
/// what closes the outbox.
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

/// Client ID (unique per connection for the lifetime of the process)
pub type ClientId = u64;

/// Raw outbound message as written to the network
pub type OutboundMessage = Vec<u8>;

static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

/// The hub's representation of one live connection
#[derive(Debug)]
pub struct ClientHandle {
    id: ClientId,
    wall_id: String,
    outbox: mpsc::Sender<OutboundMessage>,
}

impl ClientHandle {
    /// Create a handle subscribed to `wall_id` and the outbox it feeds
    ///
    /// `capacity` is clamped to at least 1.
    pub fn new(wall_id: impl Into<String>, capacity: usize) -> (Self, Outbox) {
        let id = NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(capacity.max(1));

        let handle = Self {
            id,
            wall_id: wall_id.into(),
            outbox: tx,
        };

        (handle, Outbox { id, rx })
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn wall_id(&self) -> &str {
        &self.wall_id
    }

    pub(crate) fn into_parts(self) -> (ClientId, String, mpsc::Sender<OutboundMessage>) {
        (self.id, self.wall_id, self.outbox)
    }
}

/// Receiving half of a client's outbound queue
///
/// `recv` returning `None` means the hub closed the outbox (disconnect or
/// eviction) and the writer must stop.
#[derive(Debug)]
pub struct Outbox {
    id: ClientId,
    rx: mpsc::Receiver<OutboundMessage>,
}

impl Outbox {
    pub fn client_id(&self) -> ClientId {
        self.id
    }

    pub async fn recv(&mut self) -> Option<OutboundMessage> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Result<OutboundMessage, mpsc::error::TryRecvError> {
        self.rx.try_recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let (a, outbox_a) = ClientHandle::new("wall1", 4);
        let (b, _outbox_b) = ClientHandle::new("wall1", 4);

        assert_ne!(a.id(), b.id());
        assert_eq!(outbox_a.client_id(), a.id());
        assert_eq!(a.wall_id(), "wall1");
    }

    #[test]
    fn test_dropping_handle_closes_outbox() {
        let (handle, mut outbox) = ClientHandle::new("wall1", 4);
        let (_, _, tx) = handle.into_parts();
        tx.try_send(b"hello".to_vec()).unwrap();
        drop(tx);

        assert_eq!(outbox.try_recv().unwrap(), b"hello".to_vec());
        assert_eq!(
            outbox.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        );
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let (handle, _outbox) = ClientHandle::new("wall1", 0);
        let (_, _, tx) = handle.into_parts();
        assert!(tx.try_send(Vec::new()).is_ok());
        assert!(tx.try_send(Vec::new()).is_err());
    }
}
