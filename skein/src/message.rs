//! Message and tool-call types for run history.
//!
//! Message variants: Human (user input), Agent (model reply, optionally carrying
//! tool calls), ToolResult (output of one executed tool call). Used by
//! `AgentState::messages` and appended by nodes through `StateDelta`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix of message content produced from a recovered failure (agent call
/// failed, tool unknown, tool failed). Callers and the router can detect
/// recovered errors by checking `content.starts_with(ERROR_MARKER)`.
pub const ERROR_MARKER: &str = "Error:";

/// A single tool invocation requested by an agent message.
///
/// Produced by an Agent message, consumed exactly once by the tool invoker.
/// Optional `id` correlates the call with its `ToolResult` when a provider
/// assigns call ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name as registered in the invoker.
    pub name: String,
    /// Arguments as a JSON mapping.
    #[serde(default)]
    pub arguments: Value,
    /// Optional provider-assigned call id.
    #[serde(default)]
    pub id: Option<String>,
}

impl ToolCall {
    /// Creates a tool call with the given name and JSON arguments.
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
            id: None,
        }
    }
}

/// A single message in the run history.
///
/// **Interaction**: created by the caller (Human), `AgentNode` (Agent) and
/// `ToolNode` (ToolResult); read by routers and by the CLI display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Message {
    /// User input; first message of every run.
    Human(String),
    /// Model reply with an optional ordered list of requested tool calls.
    Agent {
        content: String,
        tool_calls: Vec<ToolCall>,
    },
    /// Text outcome of one executed tool call.
    ToolResult { name: String, content: String },
}

impl Message {
    /// Creates a human message.
    pub fn human(content: impl Into<String>) -> Self {
        Self::Human(content.into())
    }

    /// Creates an agent message without tool calls.
    pub fn agent(content: impl Into<String>) -> Self {
        Self::Agent {
            content: content.into(),
            tool_calls: vec![],
        }
    }

    /// Creates an agent message carrying tool calls.
    pub fn agent_with_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::Agent {
            content: content.into(),
            tool_calls,
        }
    }

    /// Creates a tool-result message for the named tool.
    pub fn tool_result(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::ToolResult {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Text content of the message, for any variant.
    pub fn content(&self) -> &str {
        match self {
            Self::Human(c) => c,
            Self::Agent { content, .. } => content,
            Self::ToolResult { content, .. } => content,
        }
    }

    /// Tool calls carried by the message; empty for non-agent variants.
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Self::Agent { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: human/agent/tool_result constructors produce the correct variant with content.
    #[test]
    fn message_constructors() {
        let h = Message::human("h");
        assert!(matches!(&h, Message::Human(c) if c == "h"));
        let a = Message::agent("a");
        assert!(matches!(&a, Message::Agent { content, tool_calls } if content == "a" && tool_calls.is_empty()));
        let t = Message::tool_result("clock", "noon");
        assert!(
            matches!(&t, Message::ToolResult { name, content } if name == "clock" && content == "noon")
        );
    }

    /// **Scenario**: content() and tool_calls() accessors cover all variants.
    #[test]
    fn message_accessors() {
        let call = ToolCall::new("echo", serde_json::json!({"text": "hi"}));
        let msg = Message::agent_with_calls("calling", vec![call]);
        assert_eq!(msg.content(), "calling");
        assert_eq!(msg.tool_calls().len(), 1);
        assert_eq!(msg.tool_calls()[0].name, "echo");
        assert!(Message::human("x").tool_calls().is_empty());
        assert_eq!(Message::tool_result("t", "out").content(), "out");
    }

    /// **Scenario**: Each Message variant round-trips through serde.
    #[test]
    fn message_serde_roundtrip() {
        for msg in [
            Message::human("usr"),
            Message::agent_with_calls("ast", vec![ToolCall::new("t", serde_json::json!({}))]),
            Message::tool_result("t", "res"),
        ] {
            let json = serde_json::to_string(&msg).expect("serialize");
            let back: Message = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(msg.content(), back.content());
            assert_eq!(msg.tool_calls().len(), back.tool_calls().len());
        }
    }
}
