// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn request_serializes_with_type_tag() {
    let req = Request::MachineAction {
        action: MachineAction::Start,
        location: "Modan".into(),
        machine_id: "M1".into(),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["type"], "machine_action");
    assert_eq!(json["action"], "start");
    assert_eq!(json["machine_id"], "M1");
}

#[parameterized(
    start = { MachineAction::Start, "start" },
    pause = { MachineAction::Pause, "pause" },
    stop = { MachineAction::Stop, "stop" },
)]
fn action_display_matches_wire_form(action: MachineAction, expected: &str) {
    assert_eq!(action.to_string(), expected);
}

#[test]
fn action_reply_defaults_to_failure() {
    let reply: ActionReply = serde_json::from_str("{}").unwrap();
    assert!(!reply.ok);
    assert!(reply.machine.is_none());
}

#[test]
fn action_reply_carries_the_updated_machine() {
    let reply: ActionReply = serde_json::from_str(
        r#"{"ok": true, "machine": {"id": "M1", "name": "Extruder 1", "status": "running"}}"#,
    )
    .unwrap();
    assert!(reply.ok);
    assert_eq!(reply.machine.unwrap().id, "M1");
}

#[test]
fn push_message_tolerates_missing_fields() {
    let msg = PushMessage::parse("{}").unwrap();
    assert!(msg.locations.is_empty());
    assert!(msg.new_job.is_none());
}

#[test]
fn push_message_carries_new_job() {
    let msg = PushMessage::parse(
        r#"{"locations": [], "new_job": {"machine_id": "M2", "work_order": "WO-9", "qty": 5, "pipe_size": "4in", "eta": 120}}"#,
    )
    .unwrap();
    let update = msg.into_update();
    assert_eq!(update.new_job.unwrap().work_order, "WO-9");
}

#[test]
fn malformed_push_is_an_error_not_a_panic() {
    assert!(PushMessage::parse("not json").is_err());
}

#[tokio::test]
async fn frames_round_trip_over_a_duplex_pipe() {
    let (mut a, mut b) = tokio::io::duplex(1024);
    write_message(&mut a, &Request::Dashboard).await.unwrap();
    let got: Request = read_message(&mut b).await.unwrap();
    assert_eq!(got, Request::Dashboard);
}

#[test]
fn oversized_payload_is_an_encode_error_not_a_bad_prefix() {
    let blob = "x".repeat(MAX_FRAME_BYTES as usize + 1);
    let err = encode(&blob).unwrap_err();
    match err {
        ProtocolError::FrameTooLarge(len) => assert!(len > u64::from(MAX_FRAME_BYTES)),
        other => panic!("expected FrameTooLarge, got {other:?}"),
    }
}

#[tokio::test]
async fn oversized_length_prefix_is_rejected() {
    let (mut a, mut b) = tokio::io::duplex(64);
    a.write_all(&u32::MAX.to_be_bytes()).await.unwrap();
    let err = read_message::<_, Request>(&mut b).await.unwrap_err();
    assert!(matches!(err, ProtocolError::FrameTooLarge(_)));
}
