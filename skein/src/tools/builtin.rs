//! Built-in tools: current datetime and echo.
//!
//! Small local capabilities for demos and tests; real deployments register
//! their own `Tool` implementations next to these.

use async_trait::async_trait;
use serde_json::Value;

use super::{Tool, ToolError, ToolSpec};

/// Name of the datetime tool.
pub const TOOL_CURRENT_DATETIME: &str = "current_datetime";

/// Name of the echo tool.
pub const TOOL_ECHO: &str = "echo";

/// Returns the current local date and time.
pub struct CurrentDatetimeTool;

#[async_trait]
impl Tool for CurrentDatetimeTool {
    fn name(&self) -> &str {
        TOOL_CURRENT_DATETIME
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_CURRENT_DATETIME.to_string(),
            description: Some("Get the current local date and time.".to_string()),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
            }),
        }
    }

    async fn invoke(&self, _args: Value) -> Result<String, ToolError> {
        Ok(chrono::Local::now()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string())
    }
}

/// Echoes the `text` argument back. Demo and test capability.
pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        TOOL_ECHO
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_ECHO.to_string(),
            description: Some("Echo the given text back.".to_string()),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string", "description": "Text to echo." }
                },
                "required": ["text"],
            }),
        }
    }

    async fn invoke(&self, args: Value) -> Result<String, ToolError> {
        let text = args
            .get("text")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidInput("missing field: text".to_string()))?;
        Ok(text.to_string())
    }
}
