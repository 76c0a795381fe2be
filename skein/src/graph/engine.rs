//! Graph engine: immutable wiring, drives the step loop until termination.
//!
//! Built by `GraphBuilder::build`. Runs from the entry node; after each node,
//! merges the returned delta and resolves the next node from the wiring
//! (fixed edge or router decision). `invoke` drives the loop to completion;
//! `run` yields a lazy snapshot stream, one event per executed node.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::node::Node;
use crate::state::AgentState;

use super::builder::END;
use super::error::RunError;
use super::logging::{
    log_node_complete, log_node_start, log_route, log_run_complete, log_run_start,
};
use super::router::{Route, Router};

/// Outgoing wiring of one node: a fixed successor or a router.
#[derive(Clone)]
pub(super) enum Wiring {
    /// Single fixed next node (or END).
    Edge(String),
    /// Next node decided by the router from the updated state.
    Router(Arc<dyn Router>),
}

/// One event of a run stream: a snapshot after each node, then a terminator.
///
/// The stream is finite and not restartable; `Done` or `StepLimit` is always
/// the last event.
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// Snapshot after one node executed and its delta was merged.
    Step { node_id: String, state: AgentState },
    /// The run terminated normally; `state` is the final state.
    Done { state: AgentState },
    /// The run hit the step ceiling; `state` carries the partial history.
    StepLimit { limit: usize, state: AgentState },
}

/// Immutable, runnable graph: node registry plus frozen wiring.
///
/// Created by `GraphBuilder::build()`. Nodes execute strictly sequentially
/// within a run; independent runs share nothing mutable (nodes and routers
/// are held behind `Arc` and must be `Send + Sync`).
#[derive(Clone)]
pub struct GraphEngine {
    pub(super) nodes: HashMap<String, Arc<dyn Node>>,
    /// First node to run (the single edge out of START).
    pub(super) entry: String,
    /// Outgoing wiring per node, validated at build time.
    pub(super) wiring: HashMap<String, Wiring>,
    pub(super) step_limit: usize,
}

impl GraphEngine {
    pub(super) fn new(
        nodes: HashMap<String, Arc<dyn Node>>,
        entry: String,
        wiring: HashMap<String, Wiring>,
        step_limit: usize,
    ) -> Self {
        Self {
            nodes,
            entry,
            wiring,
            step_limit,
        }
    }

    /// The configured step ceiling.
    pub fn step_limit(&self) -> usize {
        self.step_limit
    }

    /// Runs the graph to completion and returns the final state.
    ///
    /// Node and tool faults never surface here; they are folded into state by
    /// the nodes themselves. The only failure is `RunError::StepLimitExceeded`,
    /// which carries the state with the partial history intact.
    pub async fn invoke(&self, state: AgentState) -> Result<AgentState, RunError> {
        self.run_loop(state, None).await
    }

    /// Runs the graph as a lazy event stream: one `RunEvent::Step` snapshot
    /// after every node execution, terminated by `Done` or `StepLimit`.
    ///
    /// The loop is spawned on the runtime and suspends on the channel after
    /// each step, so a slow consumer inspects intermediate states without
    /// racing the run. The stream is finite and not restartable.
    pub fn run(&self, state: AgentState) -> ReceiverStream<RunEvent> {
        let (tx, rx) = mpsc::channel(32);
        let engine = self.clone();
        tokio::spawn(async move {
            match engine.run_loop(state, Some(&tx)).await {
                Ok(state) => {
                    let _ = tx.send(RunEvent::Done { state }).await;
                }
                Err(RunError::StepLimitExceeded { limit, state }) => {
                    let _ = tx.send(RunEvent::StepLimit { limit, state }).await;
                }
            }
        });
        ReceiverStream::new(rx)
    }

    /// Shared run loop for `invoke` and `run`.
    async fn run_loop(
        &self,
        mut state: AgentState,
        tx: Option<&mpsc::Sender<RunEvent>>,
    ) -> Result<AgentState, RunError> {
        log_run_start(&self.entry);
        let mut current = self.entry.clone();
        let mut steps = 0usize;

        loop {
            if steps >= self.step_limit {
                tracing::warn!(limit = self.step_limit, "step limit exceeded, aborting run");
                return Err(RunError::StepLimitExceeded {
                    limit: self.step_limit,
                    state,
                });
            }

            let node = self
                .nodes
                .get(&current)
                .expect("built graph has all wired nodes")
                .clone();
            log_node_start(&current);
            let delta = node.invoke(&state).await;
            state.apply(delta);
            steps += 1;
            log_node_complete(&current, &state);

            if let Some(tx) = tx {
                let _ = tx
                    .send(RunEvent::Step {
                        node_id: current.clone(),
                        state: state.clone(),
                    })
                    .await;
            }

            let next = match self
                .wiring
                .get(&current)
                .expect("built graph wires every node")
            {
                Wiring::Edge(to) => {
                    if to == END {
                        None
                    } else {
                        Some(to.clone())
                    }
                }
                Wiring::Router(router) => match router.decide(&state) {
                    Route::Terminal => None,
                    Route::ToNode(id) if id == END => None,
                    Route::ToNode(id) => {
                        if self.nodes.contains_key(&id) {
                            Some(id)
                        } else {
                            tracing::warn!(node = %id, "router chose unregistered node, terminating");
                            None
                        }
                    }
                },
            };

            match next {
                Some(id) => {
                    log_route(&current, &id);
                    current = id;
                }
                None => {
                    log_run_complete(steps);
                    return Ok(state);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio_stream::StreamExt;

    use crate::graph::{EdgeRouter, GraphBuilder, START};
    use crate::message::Message;
    use crate::node::NameNode;
    use crate::state::StateDelta;

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

    fn two_step_engine() -> GraphEngine {
        let mut graph = GraphBuilder::new();
        graph.add_node("a", Arc::new(SpeakNode { name: "a", text: "one" }));
        graph.add_node("b", Arc::new(SpeakNode { name: "b", text: "two" }));
        graph.add_edge(START, "a");
        graph.add_edge("a", "b");
        graph.add_edge("b", END);
        graph.build().expect("graph builds")
    }

    /// **Scenario**: A → B with B → END terminates in exactly 2 steps and the
    /// final history holds both appended messages in order.
    #[tokio::test]
    async fn invoke_two_node_chain_terminates_in_two_steps() {
        let engine = two_step_engine();
        let out = engine.invoke(AgentState::new("go")).await.unwrap();
        assert_eq!(out.messages.len(), 3, "human + two agent messages");
        assert_eq!(out.messages[1].content(), "one");
        assert_eq!(out.messages[2].content(), "two");
        assert_eq!(out.sender, "b");
    }

    /// **Scenario**: run() emits one Step per node in order, then Done with the
    /// final state.
    #[tokio::test]
    async fn run_emits_step_per_node_then_done() {
        let engine = two_step_engine();
        let events: Vec<_> = engine.run(AgentState::new("go")).collect().await;
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], RunEvent::Step { node_id, .. } if node_id == "a"));
        assert!(matches!(&events[1], RunEvent::Step { node_id, .. } if node_id == "b"));
        assert!(matches!(&events[2], RunEvent::Done { state } if state.messages.len() == 3));
    }

    /// **Scenario**: A self-looping router hits the step ceiling; the error
    /// carries exactly the history produced up to the ceiling.
    #[tokio::test]
    async fn invoke_self_loop_hits_step_limit_with_partial_history() {
        let mut graph = GraphBuilder::new().with_step_limit(5);
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

        let result = engine.invoke(AgentState::new("go")).await;
        match result {
            Err(RunError::StepLimitExceeded { limit, state }) => {
                assert_eq!(limit, 5);
                assert_eq!(state.messages.len(), 6, "human + one message per step");
            }
            other => panic!("expected StepLimitExceeded, got {:?}", other),
        }
    }

    /// **Scenario**: A router choosing an unregistered node terminates the run
    /// cleanly instead of panicking.
    #[tokio::test]
    async fn router_to_unregistered_node_terminates() {
        let mut graph = GraphBuilder::new();
        graph.add_node("a", Arc::new(NameNode::new("a")));
        graph.add_edge(START, "a");
        // EdgeRouter target is not validated at build time; the engine must
        // fail closed at runtime.
        graph.add_router("a", Arc::new(EdgeRouter::new("ghost_node")));
        let engine = graph.build().expect("graph builds");
        let out = engine.invoke(AgentState::new("go")).await.unwrap();
        assert_eq!(out.sender, "a");
    }
}
