/// WebSocket connection lifecycle
///
/// Register with the hub, pump frames both ways, unregister on exit. The hub
/// closing the outbox (eviction) or the server shutting down ends the
/// connection the same way a client close does.
use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::sync::watch;

use crate::{
    arguments::is_debug_webserver_enabled,
    hub::{HubHandle, OutboundMessage},
    logger::{self, LogTag},
};

/// Handle a WebSocket connection subscribed to `wall_id`
///
/// `closing` flipping to `true` closes the socket; the hub handle is dropped
/// when this returns.
pub async fn handle_connection(
    socket: WebSocket,
    hub: HubHandle,
    wall_id: String,
    mut closing: watch::Receiver<bool>,
) {
    let (client, mut outbox) = hub.new_client(wall_id.as_str());
    let client_id = client.id();

    // Registration completes before the first frame is read
    if let Err(e) = hub.register(client).await {
        logger::warning(
            LogTag::Webserver,
            &format!("Client {} rejected on wall '{}': {}", client_id, wall_id, e),
        );
        return;
    }

    logger::debug(
        LogTag::Webserver,
        &format!("Client {} connected to wall '{}'", client_id, wall_id),
    );

    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut sent: u64 = 0;
    let mut received: u64 = 0;

    if *closing.borrow() {
        let _ = ws_tx.send(Message::Close(None)).await;
    }

    while !*closing.borrow() {
        tokio::select! {
            // Server shutdown
            _ = closing.changed() => {
                logger::debug(
                    LogTag::Webserver,
                    &format!("Client {}: closing for shutdown", client_id),
                );
                let _ = ws_tx.send(Message::Close(None)).await;
                break;
            }

            // Messages from the hub
            outbound = outbox.recv() => {
                match outbound {
                    Some(bytes) => {
                        if let Err(e) = ws_tx.send(to_frame(bytes)).await {
                            logger::warning(
                                LogTag::Webserver,
                                &format!("Client {}: failed to send message: {}", client_id, e),
                            );
                            break;
                        }
                        sent += 1;
                    }
                    None => {
                        logger::debug(
                            LogTag::Webserver,
                            &format!("Client {}: outbox closed by hub", client_id),
                        );
                        let _ = ws_tx.send(Message::Close(None)).await;
                        break;
                    }
                }
            }

            // Messages from the client
            msg = ws_rx.next() => {
                let payload = match msg {
                    Some(Ok(Message::Text(text))) => text.into_bytes(),
                    Some(Ok(Message::Binary(bytes))) => bytes,
                    Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
                    Some(Ok(Message::Close(_))) | None => {
                        logger::debug(
                            LogTag::Webserver,
                            &format!("Client {}: client closed", client_id),
                        );
                        break;
                    }
                    Some(Err(e)) => {
                        logger::warning(
                            LogTag::Webserver,
                            &format!("Client {}: websocket error: {}", client_id, e),
                        );
                        break;
                    }
                };

                received += 1;
                if let Err(e) = hub.inbound(payload, client_id) {
                    logger::warning(
                        LogTag::Webserver,
                        &format!("Client {}: {}", client_id, e),
                    );
                    break;
                }
            }
        }
    }

    if let Err(e) = hub.unregister(client_id) {
        logger::debug(
            LogTag::Webserver,
            &format!("Client {}: unregister skipped: {}", client_id, e),
        );
    }

    if is_debug_webserver_enabled() {
        logger::debug(
            LogTag::Webserver,
            &format!(
                "Client {} closed (wall='{}', sent={}, received={})",
                client_id, wall_id, sent, received
            ),
        );
    }
}

/// Text when the payload is valid UTF-8, binary otherwise
fn to_frame(bytes: OutboundMessage) -> Message {
    match String::from_utf8(bytes) {
        Ok(text) => Message::Text(text),
        Err(e) => Message::Binary(e.into_bytes()),
    }
}
