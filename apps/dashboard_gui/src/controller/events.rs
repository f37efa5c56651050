//! UI/backend events and error modeling for the dashboard GUI.

use client_core::ChannelEvent;

pub enum UiEvent {
    Channel(ChannelEvent),
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Connect,
    SendRequest,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("must start with")
            || message_lower.contains("invalid")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("connect")
            || message_lower.contains("refused")
            || message_lower.contains("timed out")
            || message_lower.contains("dns")
            || message_lower.contains("websocket")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_text(&self) -> String {
        let prefix = match self.context {
            UiErrorContext::BackendStartup => "Backend",
            UiErrorContext::Connect => "Connection",
            UiErrorContext::SendRequest => "Request",
        };
        let hint = match self.category {
            UiErrorCategory::Validation => " (check the server URL)",
            UiErrorCategory::Transport => " (is the simulation server running?)",
            UiErrorCategory::Unknown => "",
        };
        format!("{prefix} error: {}{hint}", self.message)
    }
}
