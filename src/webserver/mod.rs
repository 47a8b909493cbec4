/// WebSocket transport for the hub
///
/// - `server`: listener lifecycle and graceful shutdown
/// - `state`: shared state handed to every route
/// - `routes`: `/<ws path>/:wall_id` upgrade plus JSON status endpoints
/// - `ws`: per-connection reader/writer loops bridging a socket to the hub
mod server;

pub mod routes;
pub mod state;
pub mod ws;

pub use server::{serve, shutdown, start_server};
