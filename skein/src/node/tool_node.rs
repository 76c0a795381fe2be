//! Tool node: execute the last message's tool calls, append their results.
//!
//! Reads the tool calls of the last message and drives the invoker once per
//! call, in order, producing one `ToolResult` message each. The invoker's
//! never-throws contract means unknown tools and failures arrive here already
//! rendered as error text; nothing in this node can abort the run.

use std::sync::Arc;

use async_trait::async_trait;

use crate::message::Message;
use crate::state::{AgentState, StateDelta};
use crate::tools::ToolInvoker;

use super::Node;

/// Default name of the tool node.
pub const TOOL_NODE: &str = "tools";

/// Node that executes the pending tool calls of the last agent message.
///
/// Sets the routing hint to the previous `sender`, so one tool node shared by
/// several agents hands control back to whichever agent requested the calls.
///
/// **Interaction**: implements `Node`; the `AgentRouter`'s rule 1 targets it.
pub struct ToolNode {
    name: String,
    invoker: Arc<ToolInvoker>,
}

impl ToolNode {
    /// Tool node with the default name (`"tools"`).
    pub fn new(invoker: Arc<ToolInvoker>) -> Self {
        Self::with_name(TOOL_NODE, invoker)
    }

    /// Tool node with an explicit name.
    pub fn with_name(name: impl Into<String>, invoker: Arc<ToolInvoker>) -> Self {
        Self {
            name: name.into(),
            invoker,
        }
    }
}

#[async_trait]
impl Node for ToolNode {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, state: &AgentState) -> StateDelta {
        let calls = state
            .last_message()
            .map(|m| m.tool_calls().to_vec())
            .unwrap_or_default();

        let mut delta = StateDelta::from_node(&self.name);
        for call in &calls {
            let content = self.invoker.call(&call.name, call.arguments.clone()).await;
            delta = delta.with_message(Message::tool_result(&call.name, content));
        }

        if calls.is_empty() {
            tracing::warn!(node = %self.name, "tool node ran with no pending tool calls");
            return delta;
        }

        // Hand control back to the agent that requested the calls.
        delta.with_routing_hint(state.sender.clone())
    }
}
