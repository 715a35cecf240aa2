//! Events streamed from a running script.

use serde::Serialize;
use uuid::Uuid;

/// Channel name for script stdout.
pub const OUTPUT_CHANNEL: &str = "py:output";
/// Channel name for script stderr.
pub const ERROR_CHANNEL: &str = "py:error";

/// One line of script output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stream", content = "line", rename_all = "lowercase")]
pub enum ProcessEvent {
    /// A line written to stdout.
    Output(String),
    /// A line written to stderr.
    Error(String),
}

impl ProcessEvent {
    /// IPC channel this event is delivered on.
    pub fn channel(&self) -> &'static str {
        match self {
            ProcessEvent::Output(_) => OUTPUT_CHANNEL,
            ProcessEvent::Error(_) => ERROR_CHANNEL,
        }
    }

    pub fn line(&self) -> &str {
        match self {
            ProcessEvent::Output(line) | ProcessEvent::Error(line) => line,
        }
    }
}

/// Event tagged with the job that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct JobEvent {
    pub job_id: Uuid,
    pub event: ProcessEvent,
}
