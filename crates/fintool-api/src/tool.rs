//! Tool trait definition

use crate::Result;
use async_trait::async_trait;
use serde_json::{Value, json};

/// Trait for tools that an agent host can invoke
///
/// Tools are functions an LLM-driven agent can call to interact with the
/// world. Each tool must provide a name, description, and JSON schema for
/// its input; the host advertises the descriptor to the model and routes
/// tool calls to `execute`.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output as JSON value
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the LLM understand when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// Describes the parameters this tool expects. The LLM uses this schema
    /// to generate valid tool calls.
    fn input_schema(&self) -> Value;

    /// Get the host-facing descriptor for this tool
    ///
    /// The host expects a `{description, inputSchema}` object; the default
    /// implementation assembles it from `description` and `input_schema`.
    fn descriptor(&self) -> Value {
        json!({
            "description": self.description(),
            "inputSchema": self.input_schema(),
        })
    }
}
