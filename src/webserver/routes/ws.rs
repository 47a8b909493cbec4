/// WebSocket upgrade endpoint
///
/// Clients connect to `<path>/:wall_id`; the wall in the path is the one the
/// connection is registered on for its whole lifetime.
use std::sync::Arc;

use axum::{
    extract::{ws::WebSocketUpgrade, Path, State},
    response::Response,
};

use crate::{
    logger::{self, LogTag},
    webserver::{state::AppState, ws::connection},
};

/// GET <path>/:wall_id
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(wall_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    logger::debug(
        LogTag::Webserver,
        &format!("WebSocket upgrade requested for wall '{}'", wall_id),
    );

    let hub = state.hub.clone();
    let closing = state.closing();
    ws.max_message_size(state.config.websocket.max_message_bytes)
        .on_upgrade(move |socket| connection::handle_connection(socket, hub, wall_id, closing))
}
