//! Auth flow and subscription bootstrap ordering.

use super::harness::{
    self, run_session, spawn_session, test_config, wait_until, LedOp, MockHass, Step,
};
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn auth_ok_triggers_subscribe_then_get_states() {
    let server = MockHass::start(vec![harness::handshake()]).await;
    let (handle, _ops) = spawn_session(test_config(server.url()));

    wait_until("the handshake frames", || server.received().len() >= 3).await;

    let frames = server.received();
    assert_eq!(frames[0].frame["type"], "auth");
    assert_eq!(frames[0].frame["access_token"], "test-token");
    // The auth frame is the one client message sent without an id.
    assert!(frames[0].frame.get("id").is_none());

    assert_eq!(frames[1].frame["type"], "subscribe_events");
    assert_eq!(frames[1].frame["id"], 1);
    assert_eq!(frames[1].frame["event_type"], "state_changed");

    assert_eq!(frames[2].frame["type"], "get_states");
    assert_eq!(frames[2].frame["id"], 2);

    handle.abort();
}

#[tokio::test]
async fn rejected_credentials_leave_the_session_inert() {
    // After auth_invalid the server pokes the client twice; a rejected
    // session must answer neither.
    let server = MockHass::start(vec![vec![
        Step::Send(json!({"type": "auth_required", "ha_version": "2024.6.1"})),
        Step::AwaitFrame,
        Step::Send(json!({"type": "auth_invalid", "message": "Invalid access token"})),
        Step::Send(json!({"type": "auth_required", "ha_version": "2024.6.1"})),
        Step::Send(json!({"type": "auth_ok", "ha_version": "2024.6.1"})),
    ]])
    .await;

    let (handle, ops) = spawn_session(test_config(server.url()));

    wait_until("the auth frame", || !server.received().is_empty()).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let frames = server.received();
    assert_eq!(frames.len(), 1, "a rejected session must send nothing more");
    assert_eq!(frames[0].frame["type"], "auth");

    // The task is still alive: rejection parks the session, the transport
    // decides when it ends.
    assert!(!handle.is_finished());
    assert_eq!(*ops.lock().unwrap(), vec![LedOp::Shutdown]);

    handle.abort();
}

#[tokio::test]
async fn rejected_session_ends_with_the_transport() {
    let server = MockHass::start(vec![vec![
        Step::Send(json!({"type": "auth_required", "ha_version": "2024.6.1"})),
        Step::AwaitFrame,
        Step::Send(json!({"type": "auth_invalid", "message": "Invalid access token"})),
        Step::Close,
    ]])
    .await;

    let (result, ops) = run_session(&test_config(server.url())).await;

    let err = result.unwrap_err();
    assert!(err.is_recoverable(), "server close is a transport ending");
    // Baseline reset at connect is the only LED activity.
    assert_eq!(*ops.lock().unwrap(), vec![LedOp::Shutdown]);
}
