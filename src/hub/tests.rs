/// Hub test suite
///
/// The first half drives `Hub` methods directly so results are deterministic;
/// the second half spawns the coordination loop and talks to it only through
/// `HubHandle`, the way the transport does.
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::timeout;

use super::*;
use crate::config::HubConfig;
use crate::errors::HubError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Connection(ConnectionAction, String, ClientId),
    Wall(WallAction, String),
}

/// Records every dispatch; wall actions are re-broadcast to `target_wall`
#[derive(Clone, Default)]
struct RecordingHandler {
    calls: Arc<Mutex<Vec<Call>>>,
    target_wall: Arc<Mutex<Option<String>>>,
}

impl RecordingHandler {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn fan_out_to(&self, wall: &str) {
        *self.target_wall.lock().unwrap() = Some(wall.to_string());
    }
}

#[async_trait]
impl ActionHandler for RecordingHandler {
    async fn on_connection_action(
        &mut self,
        action: ConnectionAction,
        body: &str,
        origin: &mut Origin<'_>,
    ) {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Connection(action, body.to_string(), origin.id()));
        origin.send(&Envelope::to_wire(action.kind(), body));
    }

    async fn on_wall_action(&mut self, action: WallAction, body: &str, fanout: &mut Fanout<'_>) {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Wall(action, body.to_string()));

        let target = self.target_wall.lock().unwrap().clone();
        if let Some(wall) = target {
            fanout.broadcast_channel(&wall, &Envelope::to_wire(action.kind(), body));
        }
    }
}

fn hub_with(handler: &RecordingHandler, outbox_capacity: usize) -> (Hub, HubHandle) {
    Hub::new(handler.clone(), &HubConfig { outbox_capacity })
}

fn inbound(payload: &str, origin: ClientId) -> Inbound {
    Inbound {
        payload: payload.as_bytes().to_vec(),
        origin,
    }
}

// ============================================================================
// DIRECT HUB TESTS
// ============================================================================

#[tokio::test]
async fn test_registry_reflects_net_effect() {
    let handler = RecordingHandler::default();
    let (mut hub, handle) = hub_with(&handler, 4);

    let (a, _oa) = handle.new_client("wall1");
    let (b, _ob) = handle.new_client("wall1");
    let (c, _oc) = handle.new_client("wall2");
    let (a_id, b_id, c_id) = (a.id(), b.id(), c.id());

    hub.register(a);
    hub.register(b);
    hub.unregister(a_id);
    hub.register(c);
    hub.unregister(c_id);

    assert_eq!(hub.registry().len(), 1);
    assert!(hub.registry().contains(b_id));
    assert!(!hub.registry().contains(a_id));
    assert!(!hub.registry().contains(c_id));
    assert_eq!(hub.metrics().snapshot().total_registrations, 3);
}

#[tokio::test]
async fn test_unregister_absent_is_noop() {
    let handler = RecordingHandler::default();
    let (mut hub, handle) = hub_with(&handler, 4);

    let (a, _oa) = handle.new_client("wall1");
    let a_id = a.id();
    hub.register(a);

    hub.unregister(a_id);
    hub.unregister(a_id);
    hub.unregister(123_456_789);

    assert!(hub.registry().is_empty());
}

#[tokio::test]
async fn test_add_card_reaches_only_the_target_wall() {
    let handler = RecordingHandler::default();
    let (mut hub, handle) = hub_with(&handler, 4);

    let (a, mut outbox_a) = handle.new_client("wall1");
    let (b, mut outbox_b) = handle.new_client("wall2");
    let a_id = a.id();
    hub.register(a);
    hub.register(b);

    handler.fan_out_to("wall1");
    hub.route(inbound("addCard ~ ~ {\"title\":\"x\"}", a_id)).await;

    assert_eq!(
        outbox_a.try_recv().unwrap(),
        b"addCard ~ ~ {\"title\":\"x\"}".to_vec()
    );
    assert_eq!(outbox_b.try_recv(), Err(TryRecvError::Empty));

    handler.fan_out_to("wall2");
    hub.route(inbound("addCard ~ ~ {\"title\":\"x\"}", a_id)).await;

    assert_eq!(outbox_a.try_recv(), Err(TryRecvError::Empty));
    assert_eq!(
        outbox_b.try_recv().unwrap(),
        b"addCard ~ ~ {\"title\":\"x\"}".to_vec()
    );

    assert_eq!(
        handler.calls(),
        vec![
            Call::Wall(WallAction::AddCard, "{\"title\":\"x\"}".to_string()),
            Call::Wall(WallAction::AddCard, "{\"title\":\"x\"}".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_malformed_payload_has_no_effect() {
    let handler = RecordingHandler::default();
    handler.fan_out_to("wall1");
    let (mut hub, handle) = hub_with(&handler, 4);

    let (a, mut outbox_a) = handle.new_client("wall1");
    let a_id = a.id();
    hub.register(a);

    hub.route(inbound("bogus", a_id)).await;
    hub.route(inbound("moveCard ~ ~ a ~ ~ b", a_id)).await;

    assert!(handler.calls().is_empty());
    assert!(hub.registry().contains(a_id));
    assert_eq!(outbox_a.try_recv(), Err(TryRecvError::Empty));
    assert_eq!(hub.metrics().snapshot().messages_malformed, 2);

    // The next well-formed message is processed normally
    hub.route(inbound("moveCard ~ ~ {}", a_id)).await;
    assert_eq!(
        handler.calls(),
        vec![Call::Wall(WallAction::MoveCard, "{}".to_string())]
    );
    assert_eq!(outbox_a.try_recv().unwrap(), b"moveCard ~ ~ {}".to_vec());
}

#[tokio::test]
async fn test_unknown_kind_is_ignored() {
    let handler = RecordingHandler::default();
    handler.fan_out_to("wall1");
    let (mut hub, handle) = hub_with(&handler, 4);

    let (a, mut outbox_a) = handle.new_client("wall1");
    let a_id = a.id();
    hub.register(a);

    hub.route(inbound("archiveWall ~ ~ {}", a_id)).await;

    assert!(handler.calls().is_empty());
    assert_eq!(outbox_a.try_recv(), Err(TryRecvError::Empty));
    assert_eq!(hub.metrics().snapshot().messages_malformed, 0);
}

#[tokio::test]
async fn test_connection_actions_get_the_origin() {
    let handler = RecordingHandler::default();
    let (mut hub, handle) = hub_with(&handler, 4);

    let (a, mut outbox_a) = handle.new_client("wall1");
    let (b, mut outbox_b) = handle.new_client("wall1");
    let a_id = a.id();
    hub.register(a);
    hub.register(b);

    hub.route(inbound("init ~ ~ wall1", a_id)).await;
    hub.route(inbound("addWall ~ ~ Roadmap", a_id)).await;

    assert_eq!(
        handler.calls(),
        vec![
            Call::Connection(ConnectionAction::Init, "wall1".to_string(), a_id),
            Call::Connection(ConnectionAction::AddWall, "Roadmap".to_string(), a_id),
        ]
    );
    assert_eq!(outbox_a.try_recv().unwrap(), b"init ~ ~ wall1".to_vec());
    assert_eq!(outbox_a.try_recv().unwrap(), b"addWall ~ ~ Roadmap".to_vec());
    assert_eq!(outbox_b.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn test_reply_to_unregistered_origin_is_dropped() {
    let handler = RecordingHandler::default();
    let (mut hub, handle) = hub_with(&handler, 4);

    let (a, mut outbox_a) = handle.new_client("wall1");
    let a_id = a.id();
    hub.register(a);
    hub.unregister(a_id);

    hub.route(inbound("init ~ ~ wall1", a_id)).await;

    assert_eq!(handler.calls().len(), 1);
    assert_eq!(outbox_a.try_recv(), Err(TryRecvError::Disconnected));
    assert!(hub.registry().is_empty());
}

#[tokio::test]
async fn test_saturated_client_is_evicted_during_fanout() {
    let handler = RecordingHandler::default();
    handler.fan_out_to("wall1");
    let (mut hub, handle) = hub_with(&handler, 1);

    let (slow, mut slow_outbox) = handle.new_client("wall1");
    let (fast, mut fast_outbox) = handle.new_client("wall1");
    let (slow_id, fast_id) = (slow.id(), fast.id());
    hub.register(slow);
    hub.register(fast);

    hub.route(inbound("addBoard ~ ~ 1", fast_id)).await;
    assert_eq!(fast_outbox.try_recv().unwrap(), b"addBoard ~ ~ 1".to_vec());

    // slow never drained its single slot
    hub.route(inbound("addBoard ~ ~ 2", fast_id)).await;
    assert!(!hub.registry().contains(slow_id));
    assert!(hub.registry().contains(fast_id));
    assert_eq!(fast_outbox.try_recv().unwrap(), b"addBoard ~ ~ 2".to_vec());

    assert_eq!(slow_outbox.try_recv().unwrap(), b"addBoard ~ ~ 1".to_vec());
    assert_eq!(slow_outbox.try_recv(), Err(TryRecvError::Disconnected));

    hub.route(inbound("addBoard ~ ~ 3", fast_id)).await;
    assert_eq!(fast_outbox.try_recv().unwrap(), b"addBoard ~ ~ 3".to_vec());
    assert_eq!(hub.metrics().snapshot().evictions, 1);
}

// ============================================================================
// SPAWNED LOOP TESTS
// ============================================================================

async fn wait_for_active(metrics: &HubMetrics, expected: usize) {
    timeout(Duration::from_secs(2), async {
        while metrics.active_clients() != expected {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("registry never reached the expected size");
}

#[tokio::test]
async fn test_loop_routes_through_handle() {
    let handler = RecordingHandler::default();
    handler.fan_out_to("wall1");
    let (hub, handle) = hub_with(&handler, 8);
    let task = tokio::spawn(hub.run());

    let (a, mut outbox_a) = handle.new_client("wall1");
    let (b, mut outbox_b) = handle.new_client("wall2");
    let a_id = a.id();
    handle.register(a).await.unwrap();
    handle.register(b).await.unwrap();

    handle
        .inbound(b"changeCardTitle ~ ~ {\"id\":1}".to_vec(), a_id)
        .unwrap();

    let received = timeout(Duration::from_secs(2), outbox_a.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(received, b"changeCardTitle ~ ~ {\"id\":1}".to_vec());
    assert_eq!(outbox_b.try_recv(), Err(TryRecvError::Empty));

    drop(handle);
    timeout(Duration::from_secs(2), task).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_loop_survives_bogus_payload() {
    let handler = RecordingHandler::default();
    handler.fan_out_to("wall1");
    let (hub, handle) = hub_with(&handler, 8);
    tokio::spawn(hub.run());

    let (a, mut outbox_a) = handle.new_client("wall1");
    let a_id = a.id();
    handle.register(a).await.unwrap();
    assert_eq!(handle.metrics().active_clients(), 1);

    handle.inbound(b"bogus".to_vec(), a_id).unwrap();
    handle.inbound(b"deleteCard ~ ~ 7".to_vec(), a_id).unwrap();

    let received = timeout(Duration::from_secs(2), outbox_a.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(received, b"deleteCard ~ ~ 7".to_vec());
    assert_eq!(
        handler.calls(),
        vec![Call::Wall(WallAction::DeleteCard, "7".to_string())]
    );
    assert_eq!(handle.metrics().snapshot().messages_malformed, 1);
}

#[tokio::test]
async fn test_unregister_closes_outbox() {
    let handler = RecordingHandler::default();
    let (hub, handle) = hub_with(&handler, 8);
    tokio::spawn(hub.run());

    let (a, mut outbox_a) = handle.new_client("wall1");
    let a_id = a.id();
    handle.register(a).await.unwrap();
    assert_eq!(handle.metrics().active_clients(), 1);

    handle.unregister(a_id).unwrap();
    // Redundant unregister is harmless
    handle.unregister(a_id).unwrap();

    let closed = timeout(Duration::from_secs(2), outbox_a.recv()).await.unwrap();
    assert_eq!(closed, None);
    wait_for_active(&handle.metrics(), 0).await;
}

#[tokio::test]
async fn test_handle_reports_stopped_hub() {
    let handler = RecordingHandler::default();
    let (hub, handle) = hub_with(&handler, 8);
    drop(hub);

    let (a, _outbox_a) = handle.new_client("wall1");
    let a_id = a.id();
    assert_eq!(
        handle.register(a).await,
        Err(HubError::Closed { queue: "register" })
    );
    assert_eq!(
        handle.inbound(b"init ~ ~ wall1".to_vec(), a_id),
        Err(HubError::Closed { queue: "inbound" })
    );
    assert_eq!(
        handle.unregister(a_id),
        Err(HubError::Closed { queue: "unregister" })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_first_message_sees_registration() {
    let handler = RecordingHandler::default();
    let (hub, handle) = hub_with(&handler, 8);
    let task = tokio::spawn(hub.run());

    for _ in 0..200 {
        let (a, mut outbox_a) = handle.new_client("wall1");
        let a_id = a.id();
        handle.register(a).await.unwrap();
        handle.inbound(b"init ~ ~ ".to_vec(), a_id).unwrap();

        let reply = timeout(Duration::from_secs(2), outbox_a.recv())
            .await
            .expect("init reply was dropped");
        assert_eq!(reply, Some(b"init ~ ~ ".to_vec()));

        handle.unregister(a_id).unwrap();
    }

    drop(handle);
    timeout(Duration::from_secs(2), task).await.unwrap().unwrap();
    assert_eq!(handler.calls().len(), 200);
}
