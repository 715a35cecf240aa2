//! IPC wire messages (JSON lines).
//!
//! Requests: `{"id": .., "channel": "..", "payload": {..}}`.
//! Replies:  `{"id": .., "ok": true, "data": ..}` or `{"id": .., "ok": false, "error": ".."}`.
//! Events:   `{"event": "py:output" | "py:error", "id": .., "data": "line"}`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IpcError {
    #[error("Malformed request: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    #[error("Invalid payload for {channel}: {source}")]
    BadPayload {
        channel: String,
        source: serde_json::Error,
    },
}

/// A request as read off the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRequest {
    /// Echoed back on every reply and event.
    #[serde(default)]
    pub id: Value,
    pub channel: String,
    #[serde(default)]
    pub payload: Value,
}

impl RawRequest {
    pub fn parse(line: &str) -> Result<Self, IpcError> {
        serde_json::from_str(line).map_err(IpcError::Malformed)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolvePayload {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectPayload {
    #[serde(default)]
    pub paths: Vec<PathBuf>,
    /// Overrides `selection.multi_select`.
    pub multi: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessPayload {
    pub file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourcePayload {
    pub uri: String,
}

/// A request with its payload decoded.
#[derive(Debug, Clone)]
pub enum Command {
    Routes,
    Resolve(ResolvePayload),
    SelectFiles(SelectPayload),
    Process(ProcessPayload),
    Resource(ResourcePayload),
}

impl Command {
    pub const ROUTES: &'static str = "routes";
    pub const RESOLVE: &'static str = "resolve";
    pub const SELECT_FILES: &'static str = "select-files";
    pub const PROCESS: &'static str = "py:process";
    pub const RESOURCE: &'static str = "resource";

    pub fn from_request(request: &RawRequest) -> Result<Self, IpcError> {
        fn payload<T: for<'de> Deserialize<'de>>(request: &RawRequest) -> Result<T, IpcError> {
            serde_json::from_value(request.payload.clone()).map_err(|source| IpcError::BadPayload {
                channel: request.channel.clone(),
                source,
            })
        }

        match request.channel.as_str() {
            Self::ROUTES => Ok(Command::Routes),
            Self::RESOLVE => payload(request).map(Command::Resolve),
            Self::SELECT_FILES => payload(request).map(Command::SelectFiles),
            Self::PROCESS => payload(request).map(Command::Process),
            Self::RESOURCE => payload(request).map(Command::Resource),
            other => Err(IpcError::UnknownChannel(other.to_string())),
        }
    }
}

/// Anything written back to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum IpcMessage {
    Reply {
        id: Value,
        ok: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Event {
        event: &'static str,
        id: Value,
        data: String,
    },
}

impl IpcMessage {
    pub fn ok(id: Value, data: Value) -> Self {
        IpcMessage::Reply {
            id,
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(id: Value, error: impl ToString) -> Self {
        IpcMessage::Reply {
            id,
            ok: false,
            data: None,
            error: Some(error.to_string()),
        }
    }
}
