use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{EpisodeSummary, StepUpdate},
    error::ProtocolError,
};

/// Events the dashboard sends to the simulation server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientRequest {
    StartSimulation { training: bool },
    StopSimulation,
    ResetSimulation,
    ToggleTraining { training: bool },
}

impl ClientRequest {
    pub fn event_name(&self) -> &'static str {
        match self {
            ClientRequest::StartSimulation { .. } => "start_simulation",
            ClientRequest::StopSimulation => "stop_simulation",
            ClientRequest::ResetSimulation => "reset_simulation",
            ClientRequest::ToggleTraining { .. } => "toggle_training",
        }
    }
}

/// Events pushed by the simulation server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    UpdateUi(StepUpdate),
    EpisodeSummary(EpisodeSummary),
    SimulationReset,
    TrainingStatus { training: bool },
}

impl ServerEvent {
    pub const NAMES: [&'static str; 4] = [
        "update_ui",
        "episode_summary",
        "simulation_reset",
        "training_status",
    ];

    pub fn event_name(&self) -> &'static str {
        match self {
            ServerEvent::UpdateUi(_) => "update_ui",
            ServerEvent::EpisodeSummary(_) => "episode_summary",
            ServerEvent::SimulationReset => "simulation_reset",
            ServerEvent::TrainingStatus { .. } => "training_status",
        }
    }
}

pub fn encode_request(request: &ClientRequest) -> Result<String, ProtocolError> {
    serde_json::to_string(request).map_err(ProtocolError::InvalidJson)
}

/// Validates one inbound text frame into a typed event.
///
/// Unknown event names and payloads that do not match their event's shape
/// are rejected here so nothing undefined reaches the view.
pub fn decode_server_event(text: &str) -> Result<ServerEvent, ProtocolError> {
    let value: Value = serde_json::from_str(text).map_err(ProtocolError::InvalidJson)?;
    let event = value
        .get("event")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(ProtocolError::MissingEventName)?;

    if !ServerEvent::NAMES.contains(&event.as_str()) {
        return Err(ProtocolError::UnknownEvent(event));
    }

    serde_json::from_value(value).map_err(|source| ProtocolError::InvalidPayload { event, source })
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
