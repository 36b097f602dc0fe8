use std::fmt;

use mcq_core::McqResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The six lifecycle events the MCQ view listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTopic {
    Start,
    Status,
    Success,
    Error,
    Reset,
    NoScreenshots,
}

impl EventTopic {
    pub const ALL: [EventTopic; 6] = [
        EventTopic::Start,
        EventTopic::Status,
        EventTopic::Success,
        EventTopic::Error,
        EventTopic::Reset,
        EventTopic::NoScreenshots,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EventTopic::Start => "start",
            EventTopic::Status => "status",
            EventTopic::Success => "success",
            EventTopic::Error => "error",
            EventTopic::Reset => "reset",
            EventTopic::NoScreenshots => "no-screenshots",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|topic| topic.name() == name)
    }
}

impl fmt::Display for EventTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    Start,
    /// `progress` is informational only.
    Status { message: String, progress: f64 },
    Success(McqResponse),
    Error(String),
    Reset,
    NoScreenshots,
}

#[derive(Deserialize)]
struct StatusPayload {
    message: String,
    #[serde(default)]
    progress: f64,
}

impl PlatformEvent {
    pub fn topic(&self) -> EventTopic {
        match self {
            PlatformEvent::Start => EventTopic::Start,
            PlatformEvent::Status { .. } => EventTopic::Status,
            PlatformEvent::Success(_) => EventTopic::Success,
            PlatformEvent::Error(_) => EventTopic::Error,
            PlatformEvent::Reset => EventTopic::Reset,
            PlatformEvent::NoScreenshots => EventTopic::NoScreenshots,
        }
    }

    /// Decodes a JSON payload delivered on `topic`. Payloads of topics that
    /// carry none are ignored.
    pub fn from_wire(topic: EventTopic, payload: serde_json::Value) -> Result<Self, BridgeError> {
        let event = match topic {
            EventTopic::Start => PlatformEvent::Start,
            EventTopic::Reset => PlatformEvent::Reset,
            EventTopic::NoScreenshots => PlatformEvent::NoScreenshots,
            EventTopic::Status => {
                let status: StatusPayload = serde_json::from_value(payload)
                    .map_err(|err| BridgeError::Malformed(format!("{topic}: {err}")))?;
                PlatformEvent::Status {
                    message: status.message,
                    progress: status.progress,
                }
            }
            EventTopic::Success => {
                let result: McqResponse = serde_json::from_value(payload)
                    .map_err(|err| BridgeError::Malformed(format!("{topic}: {err}")))?;
                PlatformEvent::Success(result)
            }
            EventTopic::Error => match payload {
                serde_json::Value::String(message) => PlatformEvent::Error(message),
                other => {
                    return Err(BridgeError::Malformed(format!(
                        "{topic}: expected a string, got {other}"
                    )))
                }
            },
        };
        Ok(event)
    }
}

/// Size of the rendered content, reported to the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("platform rejected the request: {0}")]
    Rejected(String),
    #[error("platform bridge disconnected")]
    Disconnected,
    #[error("malformed platform payload: {0}")]
    Malformed(String),
}
