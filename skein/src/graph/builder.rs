//! Graph builder: nodes plus explicit wiring, validated into a `GraphEngine`.
//!
//! Add nodes with `add_node`, wire them with `add_edge(from, to)` using
//! `START` and `END` for entry/exit, or attach a `Router` with `add_router`
//! for state-based routing. `build()` validates the wiring and returns an
//! immutable, runnable engine.
//!
//! A node must have exactly one outgoing wiring: a single edge or a router,
//! not both. Unknown names fail at `build()` time, not mid-run.

use std::collections::HashMap;
use std::sync::Arc;

use crate::node::Node;

use super::engine::{GraphEngine, Wiring};
use super::error::ConstructionError;
use super::router::Router;

/// Sentinel for graph entry: use as `from` in `add_edge(START, first_node)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to` in `add_edge(last_node, END)`.
pub const END: &str = "__end__";

/// Mutable graph under construction: node registry plus wiring.
///
/// Build with `add_node` / `add_edge` / `add_router`, then `build()` to obtain
/// a `GraphEngine`. After `build()` the configuration is frozen; there is no
/// ambient registry to mutate mid-run.
///
/// **Interaction**: accepts `Arc<dyn Node>` and `Arc<dyn Router>`; produces
/// `GraphEngine`.
pub struct GraphBuilder {
    nodes: HashMap<String, Arc<dyn Node>>,
    /// Edges (from, to). START/END are valid endpoints.
    edges: Vec<(String, String)>,
    /// Routers by source node name.
    routers: HashMap<String, Arc<dyn Router>>,
    step_limit: usize,
}

impl GraphBuilder {
    /// Default step ceiling for a run.
    pub const DEFAULT_STEP_LIMIT: usize = 150;

    /// Creates an empty builder with the default step limit.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            routers: HashMap::new(),
            step_limit: Self::DEFAULT_STEP_LIMIT,
        }
    }

    /// Replaces the step ceiling (builder). Runs exceeding it fail with
    /// `RunError::StepLimitExceeded`.
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = limit;
        self
    }

    /// Adds a node under the given name. Replaces if the name is taken.
    pub fn add_node(&mut self, name: impl Into<String>, node: Arc<dyn Node>) -> &mut Self {
        self.nodes.insert(name.into(), node);
        self
    }

    /// Adds an edge from `from` to `to`. Use `START` and `END` for entry/exit.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.push((from.into(), to.into()));
        self
    }

    /// Attaches a router to `source`: after that node runs, the router picks
    /// the next node from the updated state.
    pub fn add_router(&mut self, source: impl Into<String>, router: Arc<dyn Router>) -> &mut Self {
        self.routers.insert(source.into(), router);
        self
    }

    /// Validates the wiring and freezes it into a runnable engine.
    ///
    /// Fails with `ConstructionError` before any run starts when an edge or
    /// router references an unknown node, the entry is missing or duplicated,
    /// a node has zero or two outgoing wirings, or termination is unreachable.
    pub fn build(self) -> Result<GraphEngine, ConstructionError> {
        for (from, to) in &self.edges {
            if from != START && !self.nodes.contains_key(from) {
                return Err(ConstructionError::UnknownNode(from.clone()));
            }
            if to != END && !self.nodes.contains_key(to) {
                return Err(ConstructionError::UnknownNode(to.clone()));
            }
        }
        for source in self.routers.keys() {
            if !self.nodes.contains_key(source) {
                return Err(ConstructionError::UnknownNode(source.clone()));
            }
        }

        let mut entry: Option<String> = None;
        for (from, to) in &self.edges {
            if from == START {
                if entry.is_some() {
                    return Err(ConstructionError::DuplicateWiring(START.to_string()));
                }
                entry = Some(to.clone());
            }
        }
        let entry = entry.ok_or(ConstructionError::MissingEntry)?;

        let mut wiring: HashMap<String, Wiring> = HashMap::new();
        for (from, to) in &self.edges {
            if from == START {
                continue;
            }
            if wiring.insert(from.clone(), Wiring::Edge(to.clone())).is_some() {
                return Err(ConstructionError::DuplicateWiring(from.clone()));
            }
        }
        for (source, router) in &self.routers {
            if wiring
                .insert(source.clone(), Wiring::Router(router.clone()))
                .is_some()
            {
                return Err(ConstructionError::DuplicateWiring(source.clone()));
            }
        }
        for name in self.nodes.keys() {
            if !wiring.contains_key(name) {
                return Err(ConstructionError::MissingSuccessor(name.clone()));
            }
        }

        // A router can always decide Terminal; without one, some edge must
        // reach END or the run could never stop.
        let no_terminal =
            self.routers.is_empty() && !self.edges.iter().any(|(_, to)| to == END);
        if no_terminal {
            return Err(ConstructionError::MissingTerminal);
        }

        Ok(GraphEngine::new(self.nodes, entry, wiring, self.step_limit))
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
