//! Host-facing response envelope
//!
//! The plugin host expects every invocation to resolve to either
//! `{output, sources}` or `{error, sources}`, where each source carries a
//! human-readable description of the call that produced the data.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Reference describing where a tool result came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Human-readable description of the tool call
    #[serde(rename = "toolCallDescription")]
    pub tool_call_description: String,
}

impl SourceRef {
    /// Create a source reference from a call description
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            tool_call_description: description.into(),
        }
    }
}

/// Successful tool response: an opaque output plus its sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Tool output payload
    pub output: Value,
    /// Source references for the host's citation UI
    pub sources: Vec<SourceRef>,
}

impl ToolResponse {
    /// Create a response with a single source description
    pub fn new(output: Value, description: impl Into<String>) -> Self {
        Self {
            output,
            sources: vec![SourceRef::new(description)],
        }
    }
}

impl From<ToolResponse> for Value {
    fn from(response: ToolResponse) -> Self {
        json!({
            "output": response.output,
            "sources": response.sources,
        })
    }
}

/// Build the host's error envelope
///
/// Failures are reported to the host as a result value, not a transport
/// error, so the agent can read the message and recover.
pub fn error_response(message: impl Into<String>, description: impl Into<String>) -> Value {
    json!({
        "error": message.into(),
        "sources": [SourceRef::new(description)],
    })
}
