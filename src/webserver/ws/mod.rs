/// Per-connection WebSocket bridge
///
/// Each upgraded socket becomes one hub client: frames read from the socket
/// are queued as inbound payloads, and the client's outbox is drained back
/// onto the socket until the hub closes it.
pub mod connection;

pub use connection::handle_connection;
