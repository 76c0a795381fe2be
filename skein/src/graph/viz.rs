//! Graph visualization: render the wiring as Graphviz DOT or plain text.
//!
//! Debug surface only; callers (e.g. the CLI `--show-graph` flag) wrap these
//! so a rendering problem never aborts a run.

use std::fmt::Write;

use super::builder::{END, START};
use super::engine::{GraphEngine, Wiring};

/// Graphviz DOT representation of the wiring.
///
/// Fixed edges render solid; router wirings render as a dashed edge to END,
/// since any router may terminate and its other targets are state-dependent.
pub fn generate_dot(engine: &GraphEngine) -> String {
    let mut dot = String::from("digraph {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=box];\n\n");

    dot.push_str(&format!("  \"{}\" [label=\"START\", style=bold];\n", START));
    dot.push_str(&format!("  \"{}\" [label=\"END\", style=bold];\n", END));
    let mut names: Vec<_> = engine.nodes.keys().collect();
    names.sort();
    for name in &names {
        dot.push_str(&format!("  \"{}\";\n", name));
    }

    dot.push('\n');
    dot.push_str(&format!("  \"{}\" -> \"{}\";\n", START, engine.entry));
    for name in &names {
        match engine.wiring.get(name.as_str()) {
            Some(Wiring::Edge(to)) => {
                dot.push_str(&format!("  \"{}\" -> \"{}\";\n", name, to));
            }
            Some(Wiring::Router(_)) => {
                dot.push_str(&format!(
                    "  \"{}\" -> \"{}\" [style=dashed, label=\"route\"];\n",
                    name, END
                ));
            }
            None => {}
        }
    }

    dot.push_str("}\n");
    dot
}

/// Plain-text summary of the wiring.
pub fn generate_text(engine: &GraphEngine) -> String {
    let mut text = String::new();
    writeln!(text, "Graph:").unwrap();
    writeln!(text, "  nodes: {}", engine.nodes.len()).unwrap();
    writeln!(text, "  entry: {} -> {}", START, engine.entry).unwrap();
    writeln!(text, "  step limit: {}", engine.step_limit).unwrap();
    let mut names: Vec<_> = engine.nodes.keys().collect();
    names.sort();
    for name in names {
        match engine.wiring.get(name.as_str()) {
            Some(Wiring::Edge(to)) => writeln!(text, "  {} -> {}", name, to).unwrap(),
            Some(Wiring::Router(_)) => writeln!(text, "  {} -> (router)", name).unwrap(),
            None => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::graph::{EdgeRouter, GraphBuilder};
    use crate::node::NameNode;

    fn engine() -> GraphEngine {
        let mut graph = GraphBuilder::new();
        graph.add_node("first", Arc::new(NameNode::new("first")));
        graph.add_node("second", Arc::new(NameNode::new("second")));
        graph.add_edge(START, "first");
        graph.add_edge("first", "second");
        graph.add_router("second", Arc::new(EdgeRouter::new(END)));
        graph.build().expect("graph builds")
    }

    #[test]
    fn dot_contains_nodes_and_edges() {
        let dot = generate_dot(&engine());
        assert!(dot.contains("digraph"));
        assert!(dot.contains("START"));
        assert!(dot.contains("\"first\" -> \"second\""));
        assert!(dot.contains("style=dashed"));
    }

    #[test]
    fn text_lists_wiring() {
        let text = generate_text(&engine());
        assert!(text.contains("nodes: 2"));
        assert!(text.contains("first -> second"));
        assert!(text.contains("second -> (router)"));
    }
}
