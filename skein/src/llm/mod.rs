//! LLM client abstraction for agent nodes.
//!
//! An `AgentNode` depends on a callable that takes a system instruction, the
//! message history and an optional tool-schema list, and returns one agent
//! reply (text and/or tool calls). This module defines that boundary and its
//! implementations: `ChatOpenAI` (real API), `MockLlm` (scripted) and
//! `FailingLlm` (always errors, for recovery tests).
//!
//! Transport and quota errors surface as `LlmError`; the node folds them into
//! state, so they never unwind past the engine.

mod mock;
mod openai;

pub use mock::{FailingLlm, MockLlm};
pub use openai::ChatOpenAI;

use async_trait::async_trait;
use thiserror::Error;

use crate::message::{Message, ToolCall};
use crate::tools::ToolSpec;

/// One completion request: fixed system instruction, accumulated history,
/// and the tool schemas advertised to the model.
pub struct ChatRequest<'a> {
    /// System instruction of the calling agent node.
    pub system: &'a str,
    /// Message history of the run so far.
    pub history: &'a [Message],
    /// Tool schemas the model may call; empty disables tool calling.
    pub tools: &'a [ToolSpec],
}

/// One agent reply: content plus requested tool calls.
///
/// `routing` optionally names the node the model wants to act next (the
/// structured hand-off field of collaborating agents); `None` for providers
/// that only produce text.
#[derive(Debug, Clone, Default)]
pub struct AgentReply {
    /// Reply text (may be empty when the model only calls tools).
    pub content: String,
    /// Tool calls requested this turn, in order.
    pub tool_calls: Vec<ToolCall>,
    /// Optional hand-off target extracted by the provider.
    pub routing: Option<String>,
}

/// Errors from the LLM boundary.
///
/// **Interaction**: returned by `LlmClient::complete`; converted into an
/// error-marker agent message by `AgentNode`.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The request could not be built or sent.
    #[error("request failed: {0}")]
    Request(String),

    /// The provider returned an error (transport, auth, quota).
    #[error("api error: {0}")]
    Api(String),

    /// The provider returned no usable choice.
    #[error("empty response: {0}")]
    EmptyResponse(String),
}

/// LLM client: given a request, returns one agent reply.
///
/// **Interaction**: used by `AgentNode`; implementations must be `Send + Sync`
/// so one client can be shared across nodes and runs.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One completion turn.
    async fn complete(&self, request: ChatRequest<'_>) -> Result<AgentReply, LlmError>;
}
