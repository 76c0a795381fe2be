//! Graph construction and run errors.
//!
//! `ConstructionError` is returned by `GraphBuilder::build` when the wiring
//! references unknown nodes or is not a runnable graph. `RunError` is the only
//! error a run itself can surface; node and tool faults are folded into state.

use thiserror::Error;

use crate::state::AgentState;

/// Error when building a graph (bad wiring). Fatal at startup, before any run.
///
/// Returned by `GraphBuilder::build()`. Validation ensures every name in the
/// wiring (except START/END) is a registered node, exactly one edge leaves
/// START, every node has exactly one outgoing wiring, and termination is
/// reachable.
#[derive(Debug, Error)]
pub enum ConstructionError {
    /// A name in an edge or router source was not registered via `add_node`
    /// (and is not START/END).
    #[error("unknown node referenced in wiring: {0}")]
    UnknownNode(String),

    /// No edge has START as its source.
    #[error("graph must have exactly one edge from START")]
    MissingEntry,

    /// A node (or START) has more than one outgoing wiring, or an edge and a
    /// router at once.
    #[error("node has more than one outgoing wiring: {0}")]
    DuplicateWiring(String),

    /// A node has no outgoing edge and no router; the run could never leave it.
    #[error("node has no outgoing wiring: {0}")]
    MissingSuccessor(String),

    /// No edge targets END and no router exists; the run could never terminate.
    #[error("graph has no path to END")]
    MissingTerminal,
}

/// Error surfaced by a run. Everything else is recovered into state.
#[derive(Debug, Error)]
pub enum RunError {
    /// The run reached the configured step ceiling without terminating.
    /// `state` carries the full history produced up to the ceiling.
    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded { limit: usize, state: AgentState },
}

impl RunError {
    /// The state at the point of failure, with partial history intact.
    pub fn into_state(self) -> AgentState {
        match self {
            Self::StepLimitExceeded { state, .. } => state,
        }
    }
}
