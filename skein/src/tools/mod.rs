//! Tool capability interface and invoker.
//!
//! Each external capability implements `Tool`: a unique name, a `ToolSpec`
//! (description + JSON schema advertised to the LLM), and the call logic.
//! Tools are registered with `ToolInvoker`, whose `call` contract never
//! errors: unknown names, failures and timeouts come back as `Error:` text so
//! the run can continue to the next routing decision.

mod builtin;
mod invoker;

pub use builtin::{CurrentDatetimeTool, EchoTool, TOOL_CURRENT_DATETIME, TOOL_ECHO};
pub use invoker::ToolInvoker;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Tool specification: the shape advertised to the LLM.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    /// Tool name, unique within an invoker.
    pub name: String,
    /// Human-readable description for the LLM.
    pub description: Option<String>,
    /// JSON Schema for the arguments mapping.
    pub input_schema: Value,
}

/// Errors from a tool's own call logic.
///
/// **Interaction**: returned by `Tool::invoke`; rendered as result text by
/// `ToolInvoker::call`, never propagated past the invoker.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Arguments did not match the tool's schema.
    #[error("invalid arguments: {0}")]
    InvalidInput(String),

    /// The capability itself failed.
    #[error("execution failed: {0}")]
    Execution(String),
}

/// A single named capability callable by the engine.
///
/// # Interaction
///
/// - `ToolInvoker` stores tools by name and dispatches `call`s to them.
/// - `ToolNode` drives the invoker once per `ToolCall` of the last message.
/// - `spec()` feeds the tool list handed to `ChatRequest::tools`.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name of this tool.
    fn name(&self) -> &str;

    /// Specification advertised to the LLM.
    fn spec(&self) -> ToolSpec;

    /// Executes the tool with the given JSON arguments.
    async fn invoke(&self, args: Value) -> Result<String, ToolError>;
}
