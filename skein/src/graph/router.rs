//! Routers: pure decisions mapping the current state to the next node.
//!
//! A router is attached to a source node with `GraphBuilder::add_router`; after
//! that node runs, `decide(&state)` picks the next node or terminates the run.
//! `AgentRouter` implements the standard agent-graph precedence; `EdgeRouter`
//! always advances to a fixed successor.

use std::collections::HashSet;

use crate::message::Message;
use crate::state::AgentState;

use super::builder::END;

/// Routing decision: run the named node next, or stop the run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Route {
    /// Run the node with the given name next.
    ToNode(String),
    /// Stop; the current state is the final result.
    Terminal,
}

/// Pure routing policy consulted after its source node runs.
///
/// `decide` must be side-effect-free: same state, same decision. The engine
/// treats a decision naming an unregistered node as `Terminal` (fail-closed),
/// so a router never crashes a run.
///
/// **Interaction**: attached via `GraphBuilder::add_router`; called by the
/// `GraphEngine` run loop.
pub trait Router: Send + Sync {
    /// Picks the next node from the current state.
    fn decide(&self, state: &AgentState) -> Route;
}

/// Standard agent-graph router. Precedence, first match wins:
///
/// 1. last message is an Agent message with tool calls → the tool node;
/// 2. last message content contains the done token → terminal;
/// 3. `routing_hint` names a registered node → that node;
/// 4. otherwise → terminal.
///
/// Rule 4 is the fail-closed default: an empty history or a hint naming an
/// unknown node is logged and ends the run instead of raising.
pub struct AgentRouter {
    /// Node that executes tool calls (rule 1 target).
    tool_node: String,
    /// Content sentinel ending the run (rule 2).
    done_token: String,
    /// Registered node names, checked by rule 3.
    known: HashSet<String>,
}

impl AgentRouter {
    /// Default done token, matching the stop word of classic supervisor graphs.
    pub const DEFAULT_DONE_TOKEN: &'static str = "FINISH";

    /// Builds a router targeting `tool_node` for tool calls, with the default
    /// done token. `known` is the set of node names rule 3 may route to.
    pub fn new<I, T>(tool_node: impl Into<String>, known: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            tool_node: tool_node.into(),
            done_token: Self::DEFAULT_DONE_TOKEN.to_string(),
            known: known.into_iter().map(Into::into).collect(),
        }
    }

    /// Replaces the done token (builder).
    pub fn with_done_token(mut self, token: impl Into<String>) -> Self {
        self.done_token = token.into();
        self
    }
}

impl Router for AgentRouter {
    fn decide(&self, state: &AgentState) -> Route {
        let Some(last) = state.last_message() else {
            tracing::warn!("routing over empty history, terminating");
            return Route::Terminal;
        };

        if let Message::Agent { tool_calls, .. } = last {
            if !tool_calls.is_empty() {
                return Route::ToNode(self.tool_node.clone());
            }
        }

        if last.content().contains(&self.done_token) {
            return Route::Terminal;
        }

        if let Some(hint) = &state.routing_hint {
            if self.known.contains(hint) {
                return Route::ToNode(hint.clone());
            }
            tracing::warn!(hint = %hint, "routing hint names unknown node, terminating");
        }

        Route::Terminal
    }
}

/// Router that always advances to a fixed successor (or terminates when the
/// successor is END). Useful where a declared-successor policy is wanted in
/// router position, e.g. an unconditional loop bounded by the step ceiling.
pub struct EdgeRouter {
    to: String,
}

impl EdgeRouter {
    /// Builds a router that always returns the given successor.
    pub fn new(to: impl Into<String>) -> Self {
        Self { to: to.into() }
    }
}

impl Router for EdgeRouter {
    fn decide(&self, _state: &AgentState) -> Route {
        if self.to == END {
            Route::Terminal
        } else {
            Route::ToNode(self.to.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ToolCall;
    use crate::state::StateDelta;

    fn router() -> AgentRouter {
        AgentRouter::new("tools", ["writer", "tools"])
    }

    fn state_with(message: Message) -> AgentState {
        let mut state = AgentState::new("question");
        state.apply(StateDelta::from_node("writer").with_message(message));
        state
    }

    /// **Scenario**: Agent message with tool calls routes to the tool node even
    /// when the content also contains the done token (rule 1 beats rule 2).
    #[test]
    fn tool_calls_win_over_done_token() {
        let msg = Message::agent_with_calls(
            "FINISH after checking",
            vec![ToolCall::new("echo", serde_json::json!({}))],
        );
        assert_eq!(
            router().decide(&state_with(msg)),
            Route::ToNode("tools".to_string())
        );
    }

    /// **Scenario**: Done token in the last content terminates the run.
    #[test]
    fn done_token_terminates() {
        let state = state_with(Message::agent("all set, FINISH"));
        assert_eq!(router().decide(&state), Route::Terminal);
    }

    /// **Scenario**: A hint naming a registered node wins over the terminal default.
    #[test]
    fn known_hint_routes() {
        let mut state = state_with(Message::agent("still working"));
        state.routing_hint = Some("writer".to_string());
        assert_eq!(
            router().decide(&state),
            Route::ToNode("writer".to_string())
        );
    }

    /// **Scenario**: A hint naming an unknown node falls through to terminal.
    #[test]
    fn unknown_hint_terminates() {
        let mut state = state_with(Message::agent("still working"));
        state.routing_hint = Some("ghost_node".to_string());
        assert_eq!(router().decide(&state), Route::Terminal);
    }

    /// **Scenario**: Empty history is treated as terminal, not a panic.
    #[test]
    fn empty_history_terminates() {
        let state = AgentState {
            messages: vec![],
            sender: "user".to_string(),
            routing_hint: None,
        };
        assert_eq!(router().decide(&state), Route::Terminal);
    }

    /// **Scenario**: EdgeRouter returns its successor, and Terminal for END.
    #[test]
    fn edge_router_fixed_successor() {
        let state = AgentState::new("x");
        assert_eq!(
            EdgeRouter::new("next").decide(&state),
            Route::ToNode("next".to_string())
        );
        assert_eq!(EdgeRouter::new(END).decide(&state), Route::Terminal);
    }
}
