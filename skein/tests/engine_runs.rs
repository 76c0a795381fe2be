//! Integration tests for the engine step loop: termination, snapshot stream,
//! append-only history and the step ceiling.


use std::sync::Arc;

use async_trait::async_trait;
use tokio_stream::StreamExt;

use skein::{
    AgentState, ConstructionError, EdgeRouter, GraphBuilder, Message, NameNode, Node, RunError,
    RunEvent, StateDelta, END, START,
};

/// Node that appends one agent message per invocation.
struct SpeakNode {
    name: &'static str,
    text: &'static str,
}

#[async_trait]
impl Node for SpeakNode {
    fn name(&self) -> &str {
        self.name
    }
    async fn invoke(&self, _state: &AgentState) -> StateDelta {
        StateDelta::from_node(self.name).with_message(Message::agent(self.text))
    }
}

/// **Scenario**: Round-trip: nodes {A, B} with A → B and B → END terminate in
/// exactly 2 steps from an initial state entering at A.
#[tokio::test]
async fn round_trip_two_nodes_two_steps() {
    let mut graph = GraphBuilder::new();
    graph.add_node("a", Arc::new(NameNode::new("a")));
    graph.add_node("b", Arc::new(NameNode::new("b")));
    graph.add_edge(START, "a");
    graph.add_edge("a", "b");
    graph.add_edge("b", END);
    let engine = graph.build().expect("graph builds");

    let events: Vec<_> = engine.run(AgentState::new("go")).collect().await;
    let steps: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            RunEvent::Step { node_id, .. } => Some(node_id.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(steps, vec!["a".to_string(), "b".to_string()]);
    assert!(matches!(events.last(), Some(RunEvent::Done { .. })));
}

/// **Scenario**: History length is monotonically non-decreasing across the
/// emitted snapshots (append-only invariant).
#[tokio::test]
async fn history_is_append_only_across_snapshots() {
    let mut graph = GraphBuilder::new();
    graph.add_node("a", Arc::new(SpeakNode { name: "a", text: "one" }));
    graph.add_node("b", Arc::new(NameNode::new("b")));
    graph.add_node("c", Arc::new(SpeakNode { name: "c", text: "three" }));
    graph.add_edge(START, "a");
    graph.add_edge("a", "b");
    graph.add_edge("b", "c");
    graph.add_edge("c", END);
    let engine = graph.build().expect("graph builds");

    let events: Vec<_> = engine.run(AgentState::new("go")).collect().await;
    let mut last_len = 0usize;
    for event in &events {
        let state = match event {
            RunEvent::Step { state, .. } => state,
            RunEvent::Done { state } => state,
            RunEvent::StepLimit { state, .. } => state,
        };
        assert!(
            state.messages.len() >= last_len,
            "history shrank: {} -> {}",
            last_len,
            state.messages.len()
        );
        last_len = state.messages.len();
    }
    assert_eq!(last_len, 3, "human + two appended agent messages");
}

/// **Scenario**: A run exceeding the step ceiling yields StepLimitExceeded and
/// the emitted history is exactly the history produced up to the ceiling.
#[tokio::test]
async fn step_ceiling_preserves_partial_history() {
    let mut graph = GraphBuilder::new().with_step_limit(4);
    graph.add_node(
        "loop",
        Arc::new(SpeakNode {
            name: "loop",
            text: "again",
        }),
    );
    graph.add_edge(START, "loop");
    graph.add_router("loop", Arc::new(EdgeRouter::new("loop")));
    let engine = graph.build().expect("graph builds");

    // Stream form: exactly `limit` Step events, then the StepLimit terminator.
    let events: Vec<_> = engine.run(AgentState::new("go")).collect().await;
    let step_count = events
        .iter()
        .filter(|e| matches!(e, RunEvent::Step { .. }))
        .count();
    assert_eq!(step_count, 4);
    match events.last() {
        Some(RunEvent::StepLimit { limit, state }) => {
            assert_eq!(*limit, 4);
            assert_eq!(state.messages.len(), 5, "human + one message per step");
        }
        other => panic!("expected StepLimit terminator, got {:?}", other),
    }

    // Invoke form: same partial state inside the error.
    match engine.invoke(AgentState::new("go")).await {
        Err(RunError::StepLimitExceeded { limit, state }) => {
            assert_eq!(limit, 4);
            assert_eq!(state.messages.len(), 5);
        }
        other => panic!("expected StepLimitExceeded, got {:?}", other),
    }
}

/// **Scenario**: A declared successor with no matching registration fails at
/// construction, before any run starts.
#[tokio::test]
async fn unknown_successor_fails_at_construction() {
    let mut graph = GraphBuilder::new();
    graph.add_node("a", Arc::new(NameNode::new("a")));
    graph.add_edge(START, "a");
    graph.add_edge("a", "ghost_node");
    match graph.build() {
        Err(ConstructionError::UnknownNode(name)) => assert_eq!(name, "ghost_node"),
        other => panic!("expected UnknownNode(ghost_node), got {:?}", other.err()),
    }
}
