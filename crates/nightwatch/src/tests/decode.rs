//! Frame decode taxonomy at the session boundary.
//!
//! Frames that never identify themselves are dropped; frames that claim a
//! known type and then fail to deliver its payload kill the session.

use super::harness::{
    self, run_session, spawn_session, state_event, test_config, wait_until, LedOp, MockHass, Step,
};
use crate::error::NightwatchError;
use serde_json::json;

#[tokio::test]
async fn undecodable_frames_are_dropped_without_ending_the_session() {
    let mut script = harness::handshake();
    script.push(Step::SendRaw("this is not json"));
    script.push(Step::SendRaw("[1, 2, 3]"));
    script.push(Step::SendRaw(r#"{"no_type": true}"#));
    script.push(Step::SendRaw(r#"{"type": 42}"#));
    // Sentinel: the session survived all of the above.
    script.push(Step::Send(state_event("switch.monitor", "off")));
    let server = MockHass::start(vec![script]).await;

    let (handle, ops) = spawn_session(test_config(server.url()));

    wait_until("the sentinel event", || ops.lock().unwrap().len() >= 3).await;
    assert_eq!(
        *ops.lock().unwrap(),
        vec![LedOp::Shutdown, LedOp::Init, LedOp::Set(0, 0, 0)]
    );
    assert!(!handle.is_finished());

    handle.abort();
}

#[tokio::test]
async fn unknown_message_types_are_tolerated() {
    let mut script = harness::handshake();
    script.push(Step::SendRaw(r#"{"type": "pong", "id": 7}"#));
    script.push(Step::SendRaw(r#"{"type": "zone_updated"}"#));
    script.push(Step::Send(state_event("switch.monitor", "off")));
    let server = MockHass::start(vec![script]).await;

    let (handle, ops) = spawn_session(test_config(server.url()));

    wait_until("the sentinel event", || ops.lock().unwrap().len() >= 3).await;
    assert_eq!(
        *ops.lock().unwrap(),
        vec![LedOp::Shutdown, LedOp::Init, LedOp::Set(0, 0, 0)]
    );

    handle.abort();
}

#[tokio::test]
async fn malformed_known_frames_kill_the_session() {
    let mut script = harness::handshake();
    script.push(Step::SendRaw(
        r#"{"type": "result", "id": "not-a-number", "success": true}"#,
    ));
    let server = MockHass::start(vec![script]).await;

    let (result, _ops) = run_session(&test_config(server.url())).await;

    let err = result.unwrap_err();
    assert!(matches!(err, NightwatchError::Protocol(_)));
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn auth_invalid_without_a_message_is_fatal() {
    let server = MockHass::start(vec![vec![
        Step::Send(json!({"type": "auth_required", "ha_version": "2024.6.1"})),
        Step::AwaitFrame,
        Step::SendRaw(r#"{"type": "auth_invalid"}"#),
    ]])
    .await;

    let (result, _ops) = run_session(&test_config(server.url())).await;

    let err = result.unwrap_err();
    assert!(matches!(err, NightwatchError::Protocol(_)));
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn matched_event_missing_its_envelope_is_fatal() {
    let mut script = harness::handshake();
    script.push(Step::SendRaw(r#"{"type": "event", "id": 1}"#));
    let server = MockHass::start(vec![script]).await;

    let (result, _ops) = run_session(&test_config(server.url())).await;

    let err = result.unwrap_err();
    assert!(matches!(err, NightwatchError::Protocol(_)));
}
