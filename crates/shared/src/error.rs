use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("frame is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("frame has no event name")]
    MissingEventName,
    #[error("unknown event `{0}`")]
    UnknownEvent(String),
    #[error("invalid payload for `{event}`: {source}")]
    InvalidPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ProtocolError {
    /// Event name carried by the rejected frame, when one could be read.
    pub fn event(&self) -> Option<&str> {
        match self {
            ProtocolError::UnknownEvent(event) | ProtocolError::InvalidPayload { event, .. } => {
                Some(event)
            }
            ProtocolError::InvalidJson(_) | ProtocolError::MissingEventName => None,
        }
    }
}
