//! Agent node: call the LLM boundary, append one agent message.
//!
//! Holds an `LlmClient`, a fixed system instruction and the tool specs it
//! advertises. A successful completion becomes one Agent message (content plus
//! requested tool calls, plus the provider's hand-off as routing hint). A
//! failed completion becomes an Agent message starting with `ERROR_MARKER`
//! whose routing hint is the node's own name, so the standard router resubmits
//! the same node on the next step, bounded by the engine's step ceiling.

use std::sync::Arc;

use async_trait::async_trait;

use crate::llm::{ChatRequest, LlmClient};
use crate::message::{Message, ERROR_MARKER};
use crate::state::{AgentState, StateDelta};
use crate::tools::ToolSpec;

use super::Node;

/// LLM-backed node with a fixed system instruction and capability list.
///
/// **Interaction**: implements `Node`; typically paired with an `AgentRouter`
/// on its outgoing wiring and a `ToolNode` consuming its tool calls.
pub struct AgentNode {
    name: String,
    llm: Arc<dyn LlmClient>,
    system_instruction: String,
    tools: Vec<ToolSpec>,
}

impl AgentNode {
    /// Creates an agent node with no advertised tools.
    pub fn new(
        name: impl Into<String>,
        llm: Arc<dyn LlmClient>,
        system_instruction: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            llm,
            system_instruction: system_instruction.into(),
            tools: vec![],
        }
    }

    /// Sets the tool specs advertised to the LLM (builder).
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = tools;
        self
    }
}

#[async_trait]
impl Node for AgentNode {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, state: &AgentState) -> StateDelta {
        let request = ChatRequest {
            system: &self.system_instruction,
            history: &state.messages,
            tools: &self.tools,
        };

        match self.llm.complete(request).await {
            Ok(reply) => {
                let mut delta = StateDelta::from_node(&self.name).with_message(
                    Message::agent_with_calls(reply.content, reply.tool_calls),
                );
                if let Some(routing) = reply.routing {
                    delta = delta.with_routing_hint(routing);
                }
                delta
            }
            Err(e) => {
                tracing::warn!(node = %self.name, error = %e, "agent call failed, recorded in state");
                StateDelta::from_node(&self.name)
                    .with_message(Message::agent(format!(
                        "{} agent '{}' failed: {}",
                        ERROR_MARKER, self.name, e
                    )))
                    .with_routing_hint(&self.name)
            }
        }
    }
}
