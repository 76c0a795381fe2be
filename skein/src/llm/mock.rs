//! Mock LLM clients for tests, examples and the CLI `--mock` mode.
//!
//! `MockLlm` returns a fixed reply, or a scripted two-phase sequence (first
//! reply carries tool calls, second ends the turn). `FailingLlm` always errors
//! so the agent-node recovery path can be exercised without a network.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::message::ToolCall;

use super::{AgentReply, ChatRequest, LlmClient, LlmError};

/// Mock LLM: fixed content, tool calls and optional routing.
///
/// Optional stateful mode: the first `complete` returns the configured reply,
/// every later call returns the second content with no tool calls, so a
/// tool-looping graph runs one round and then terminates.
pub struct MockLlm {
    content: String,
    tool_calls: Vec<ToolCall>,
    routing: Option<String>,
    /// When Some, counts calls for the two-phase script.
    call_count: Option<AtomicUsize>,
    second_content: Option<String>,
}

impl MockLlm {
    /// Mock that returns plain text and no tool calls.
    pub fn with_reply(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: vec![],
            routing: None,
            call_count: None,
            second_content: None,
        }
    }

    /// Mock that returns one fixed tool call on every completion.
    pub fn with_tool_call(content: impl Into<String>, call: ToolCall) -> Self {
        Self {
            content: content.into(),
            tool_calls: vec![call],
            routing: None,
            call_count: None,
            second_content: None,
        }
    }

    /// Two-phase mock: first call requests the current datetime tool, second
    /// call replies with the given closing text and no tool calls.
    pub fn first_tools_then_reply(second_content: impl Into<String>) -> Self {
        Self {
            content: "I'll check the current time.".to_string(),
            tool_calls: vec![ToolCall {
                name: "current_datetime".to_string(),
                arguments: serde_json::json!({}),
                id: Some("call-1".to_string()),
            }],
            routing: None,
            call_count: Some(AtomicUsize::new(0)),
            second_content: Some(second_content.into()),
        }
    }

    /// Set the routing hand-off target returned with every reply (builder).
    pub fn with_routing(mut self, routing: impl Into<String>) -> Self {
        self.routing = Some(routing.into());
        self
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, _request: ChatRequest<'_>) -> Result<AgentReply, LlmError> {
        let (content, tool_calls) = match &self.call_count {
            Some(counter) => {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                if n == 0 {
                    (self.content.clone(), self.tool_calls.clone())
                } else {
                    (
                        self.second_content
                            .as_deref()
                            .unwrap_or(&self.content)
                            .to_string(),
                        vec![],
                    )
                }
            }
            None => (self.content.clone(), self.tool_calls.clone()),
        };
        Ok(AgentReply {
            content,
            tool_calls,
            routing: self.routing.clone(),
        })
    }
}

/// LLM stub that fails every completion with the configured message.
///
/// Used to verify that agent nodes convert boundary faults into error-marker
/// messages with a self routing hint instead of crashing the run.
pub struct FailingLlm {
    message: String,
}

impl FailingLlm {
    /// Stub failing with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl LlmClient for FailingLlm {
    async fn complete(&self, _request: ChatRequest<'_>) -> Result<AgentReply, LlmError> {
        Err(LlmError::Api(self.message.clone()))
    }
}
