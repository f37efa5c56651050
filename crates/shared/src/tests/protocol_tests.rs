use super::*;
use crate::domain::{Direction, LightStates, QueueCounts};
use serde_json::json;

fn step_frame() -> serde_json::Value {
    json!({
        "event": "update_ui",
        "data": {
            "episode": 3,
            "step": 12,
            "waiting_time": 45,
            "reward": -2,
            "epsilon": 0.3,
            "cars_passed": 7,
            "lights": {"North": 1, "South": 0, "East": 0, "West": 0},
            "queues": {"North": 0, "South": 2, "East": 1, "West": 0},
            "action": "NS_GREEN"
        }
    })
}

#[test]
fn start_request_is_tagged_with_event_name_and_data() {
    let encoded = encode_request(&ClientRequest::StartSimulation { training: true }).expect("encode");
    let value: serde_json::Value = serde_json::from_str(&encoded).expect("json");
    assert_eq!(
        value,
        json!({"event": "start_simulation", "data": {"training": true}})
    );
}

#[test]
fn payload_less_requests_omit_data() {
    let encoded = encode_request(&ClientRequest::StopSimulation).expect("encode");
    let value: serde_json::Value = serde_json::from_str(&encoded).expect("json");
    assert_eq!(value, json!({"event": "stop_simulation"}));
    assert_eq!(ClientRequest::ResetSimulation.event_name(), "reset_simulation");
}

#[test]
fn decodes_step_update_with_all_directions() {
    let event = decode_server_event(&step_frame().to_string()).expect("decode");
    let ServerEvent::UpdateUi(update) = event else {
        panic!("expected update_ui, got {event:?}");
    };
    assert_eq!(update.step.to_string(), "12");
    assert_eq!(update.reward.to_string(), "-2");
    assert_eq!(update.epsilon.to_string(), "0.3");
    assert_eq!(update.lights.get(Direction::North), 1);
    assert_eq!(update.queues.get(Direction::South), 2);
    assert_eq!(update.training, None);
}

#[test]
fn decodes_payload_less_and_training_events() {
    let reset = decode_server_event(r#"{"event":"simulation_reset"}"#).expect("reset");
    assert_eq!(reset, ServerEvent::SimulationReset);

    let status =
        decode_server_event(r#"{"event":"training_status","data":{"training":true}}"#)
            .expect("status");
    assert_eq!(status, ServerEvent::TrainingStatus { training: true });
}

#[test]
fn decodes_episode_summary() {
    let frame = json!({
        "event": "episode_summary",
        "data": {
            "episode": 4,
            "avg_reward": -3.5,
            "total_waiting_time": 120,
            "cars_passed": 33,
            "action_history": ["Keep", "Switch"]
        }
    });
    let event = decode_server_event(&frame.to_string()).expect("decode");
    let ServerEvent::EpisodeSummary(summary) = event else {
        panic!("expected episode_summary");
    };
    assert_eq!(summary.avg_reward.to_string(), "-3.5");
    assert_eq!(summary.action_history, vec!["Keep", "Switch"]);
}

#[test]
fn rejects_unknown_event_names() {
    let err = decode_server_event(r#"{"event":"lights_changed","data":{}}"#).unwrap_err();
    assert!(matches!(err, ProtocolError::UnknownEvent(ref name) if name == "lights_changed"));
    assert_eq!(err.event(), Some("lights_changed"));
}

#[test]
fn rejects_frames_without_event_name() {
    let err = decode_server_event(r#"{"data":{}}"#).unwrap_err();
    assert!(matches!(err, ProtocolError::MissingEventName));

    let err = decode_server_event("not json").unwrap_err();
    assert!(matches!(err, ProtocolError::InvalidJson(_)));
}

#[test]
fn rejects_step_update_missing_a_direction() {
    let mut frame = step_frame();
    frame["data"]["queues"]
        .as_object_mut()
        .expect("queues")
        .remove("West");
    let err = decode_server_event(&frame.to_string()).unwrap_err();
    assert!(matches!(err, ProtocolError::InvalidPayload { ref event, .. } if event == "update_ui"));
}

#[test]
fn rejects_negative_or_fractional_queue_counts() {
    let mut frame = step_frame();
    frame["data"]["queues"]["North"] = json!(-1);
    assert!(decode_server_event(&frame.to_string()).is_err());

    let mut frame = step_frame();
    frame["data"]["queues"]["East"] = json!(1.5);
    assert!(decode_server_event(&frame.to_string()).is_err());
}

#[test]
fn rejects_non_numeric_stats() {
    let mut frame = step_frame();
    frame["data"]["reward"] = json!("-2");
    assert!(decode_server_event(&frame.to_string()).is_err());
}

#[test]
fn out_of_range_light_values_pass_the_boundary() {
    let mut frame = step_frame();
    frame["data"]["lights"]["East"] = json!(2);
    let ServerEvent::UpdateUi(update) = decode_server_event(&frame.to_string()).expect("decode")
    else {
        panic!("expected update_ui");
    };
    assert_eq!(update.lights.get(Direction::East), 2);
}

#[test]
fn per_direction_helpers_cover_every_approach() {
    let lights = LightStates::splat(0);
    assert!(lights.iter().all(|(_, v)| v == 0));
    let queues = QueueCounts {
        north: 1,
        south: 2,
        east: 3,
        west: 4,
    };
    let order: Vec<_> = queues.iter().collect();
    assert_eq!(
        order,
        vec![
            (Direction::North, 1),
            (Direction::South, 2),
            (Direction::East, 3),
            (Direction::West, 4)
        ]
    );
}
