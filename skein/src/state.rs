//! Run state and the delta merged after each node execution.
//!
//! `AgentState` holds the append-only message history plus routing metadata
//! (`sender`, `routing_hint`). Nodes return a `StateDelta`; the engine merges
//! it with `AgentState::apply`: messages are appended, sender and routing_hint
//! are overwritten. History is never truncated or reordered within a run.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Sender recorded on the initial state of a user turn.
pub const USER_SENDER: &str = "user";

/// State threaded through one run of the graph engine.
///
/// Created once per user turn, updated via `apply` after every node, and
/// dropped when the run terminates. Satisfies `Clone + Send + Sync` so
/// snapshots can be streamed to the caller while the run continues.
///
/// **Interaction**: consumed by `Node::invoke` and `Router::decide`; produced
/// step by step by `GraphEngine`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentState {
    /// Append-only message history.
    pub messages: Vec<Message>,
    /// Name of the last-acting node (initially `"user"`).
    pub sender: String,
    /// Optional name of the node the last actor wants to run next.
    pub routing_hint: Option<String>,
}

impl AgentState {
    /// Initial state for a user turn: one Human message, sender `"user"`, no hint.
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::human(user_input)],
            sender: USER_SENDER.to_string(),
            routing_hint: None,
        }
    }

    /// The chronologically last message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Content of the last Agent message, if any.
    ///
    /// Used by callers (e.g. the CLI) to get the final reply without scanning
    /// `messages`.
    pub fn last_agent_reply(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::Agent { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    /// Merges a node's delta: appends messages, overwrites sender and routing_hint.
    pub fn apply(&mut self, delta: StateDelta) {
        self.messages.extend(delta.messages);
        self.sender = delta.sender;
        self.routing_hint = delta.routing_hint;
    }
}

/// Partial state update returned by a node.
///
/// `messages` are appended to the history; `sender` and `routing_hint` replace
/// the current values (a delta without a hint clears the previous one).
#[derive(Debug, Clone, Default)]
pub struct StateDelta {
    /// Messages to append to the history.
    pub messages: Vec<Message>,
    /// The node that produced this delta.
    pub sender: String,
    /// Routing hint for the next router decision, if any.
    pub routing_hint: Option<String>,
}

impl StateDelta {
    /// Empty delta attributed to the given node.
    pub fn from_node(sender: impl Into<String>) -> Self {
        Self {
            messages: vec![],
            sender: sender.into(),
            routing_hint: None,
        }
    }

    /// Appends one message (builder).
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Sets the routing hint (builder).
    pub fn with_routing_hint(mut self, hint: impl Into<String>) -> Self {
        self.routing_hint = Some(hint.into());
        self
    }
}
