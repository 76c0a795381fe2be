//! Structured logging for graph execution events.
//!
//! Thin wrappers over `tracing` so the engine logs with consistent fields.
//! Recovered faults are logged at warn where they are folded (nodes, invoker).

use crate::state::AgentState;

/// Log the start of a run.
pub fn log_run_start(entry: &str) {
    tracing::info!(entry = %entry, "starting graph run");
}

/// Log that a node is about to execute.
pub fn log_node_start(node_id: &str) {
    tracing::debug!(node_id = %node_id, "node start");
}

/// Log that a node finished and its delta was merged.
pub fn log_node_complete(node_id: &str, state: &AgentState) {
    tracing::debug!(
        node_id = %node_id,
        message_count = state.messages.len(),
        routing_hint = ?state.routing_hint,
        "node complete"
    );
}

/// Log a routing decision.
pub fn log_route(from: &str, to: &str) {
    tracing::debug!(from = %from, to = %to, "routing");
}

/// Log normal run completion.
pub fn log_run_complete(steps: usize) {
    tracing::info!(steps, "graph run complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_functions_do_not_panic() {
        log_run_start("a");
        log_node_start("a");
        log_node_complete("a", &AgentState::new("x"));
        log_route("a", "b");
        log_run_complete(2);
    }
}
