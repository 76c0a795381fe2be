//! Graph nodes: one unit of work per step.
//!
//! A node receives the accumulated state and returns a `StateDelta`; the
//! engine merges the delta (messages appended, sender/routing_hint
//! overwritten) and consults the wiring for the next step. Faults at the LLM
//! and tool boundaries are folded into the delta by the node variants here,
//! so `invoke` itself is infallible: an error is data, not control flow.

mod agent_node;
mod tool_node;

pub use agent_node::AgentNode;
pub use tool_node::{ToolNode, TOOL_NODE};

use async_trait::async_trait;

use crate::state::{AgentState, StateDelta};

/// One step in a graph: state in, delta out.
///
/// **Interaction**: registered with `GraphBuilder::add_node`; driven by the
/// `GraphEngine` run loop.
#[async_trait]
pub trait Node: Send + Sync {
    /// Node name; must match the name it is registered under.
    fn name(&self) -> &str;

    /// One step: read the accumulated state, return the update to merge.
    async fn invoke(&self, state: &AgentState) -> StateDelta;
}

/// A node that does nothing except expose a name.
///
/// Leaves history untouched, records itself as sender and clears the routing
/// hint. Placeholder for wiring tests and pass-through positions.
pub struct NameNode {
    name: String,
}

impl NameNode {
    /// Creates a pass-through node with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Node for NameNode {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, _state: &AgentState) -> StateDelta {
        StateDelta::from_node(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: NameNode appends nothing and records itself as sender.
    #[tokio::test]
    async fn name_node_is_pass_through() {
        let node = NameNode::new("placeholder");
        let state = AgentState::new("hi");
        let delta = node.invoke(&state).await;
        assert!(delta.messages.is_empty());
        assert_eq!(delta.sender, "placeholder");
        assert!(delta.routing_hint.is_none());
    }
}
