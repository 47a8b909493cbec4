/// Stateless relay handler
///
/// Default `ActionHandler` for the binary when no persistence layer is
/// plugged in. It performs no domain side effect and only echoes:
/// - `init` replies to the sender with `init ~ ~ <wall_id>`
/// - `addWall` replies to the sender with the original payload
/// - wall actions are re-broadcast to the wall named by the body's `wallID`
use async_trait::async_trait;
use serde::Deserialize;

use crate::arguments::is_debug_handler_enabled;
use crate::hub::{ActionHandler, ConnectionAction, Envelope, Fanout, Origin, WallAction};
use crate::logger::{self, LogTag};

/// Routing field every wall action body must carry
#[derive(Debug, Deserialize)]
struct WallTarget {
    #[serde(rename = "wallID")]
    wall_id: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RelayHandler;

impl RelayHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ActionHandler for RelayHandler {
    async fn on_connection_action(
        &mut self,
        action: ConnectionAction,
        body: &str,
        origin: &mut Origin<'_>,
    ) {
        let reply = match action {
            ConnectionAction::Init => match origin.wall_id() {
                Some(wall_id) => Envelope::to_wire(action.kind(), wall_id),
                None => return,
            },
            ConnectionAction::AddWall => Envelope::to_wire(action.kind(), body),
        };

        let report = origin.send(&reply);
        if is_debug_handler_enabled() {
            logger::log_delivery(
                LogTag::Handler,
                action.kind(),
                &format!("client {}", origin.id()),
                &report,
            );
        }
    }

    async fn on_wall_action(&mut self, action: WallAction, body: &str, fanout: &mut Fanout<'_>) {
        let target = match serde_json::from_str::<WallTarget>(body) {
            Ok(target) => target,
            Err(e) => {
                logger::warning(
                    LogTag::Handler,
                    &format!("Dropping {}: body has no usable wallID ({})", action, e),
                );
                return;
            }
        };

        let report = fanout.broadcast_channel(&target.wall_id, &Envelope::to_wire(action.kind(), body));
        if is_debug_handler_enabled() {
            logger::log_delivery(LogTag::Handler, action.kind(), &target.wall_id, &report);
        }
    }
}
