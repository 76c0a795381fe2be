//! # Skein
//!
//! A minimal agent-graph orchestration engine: one shared, append-only state
//! threaded through named nodes, connected by conditional routing, with a
//! tool-invocation side-channel.
//!
//! ## Design principles
//!
//! - **State in, delta out**: each node reads the accumulated [`AgentState`]
//!   and returns a [`StateDelta`]; the engine appends messages and overwrites
//!   the routing metadata. History is never truncated within a run.
//! - **Explicit configuration**: nodes, edges and routers are registered on a
//!   [`GraphBuilder`] and validated at [`build`](GraphBuilder::build) time;
//!   a typo'd node name is a [`ConstructionError`], not a silent fall-through.
//! - **Faults are data**: LLM and tool failures are folded into messages
//!   (prefixed with [`ERROR_MARKER`]) before the next routing decision; the
//!   only run-level failure is the step ceiling
//!   ([`RunError::StepLimitExceeded`]).
//! - **Sequential steps, streamable snapshots**: nodes run strictly one at a
//!   time; [`GraphEngine::run`] yields a snapshot after every step,
//!   [`GraphEngine::invoke`] returns only the final state.
//!
//! ## Main modules
//!
//! - [`graph`]: [`GraphBuilder`], [`GraphEngine`], [`Router`],
//!   [`AgentRouter`], [`RunEvent`], visualization.
//! - [`node`]: [`Node`] trait, [`AgentNode`], [`ToolNode`], [`NameNode`].
//! - [`state`] / [`message`]: [`AgentState`], [`StateDelta`], [`Message`],
//!   [`ToolCall`].
//! - [`llm`]: [`LlmClient`] trait, [`ChatOpenAI`], [`MockLlm`],
//!   [`FailingLlm`].
//! - [`tools`]: [`Tool`] trait, [`ToolInvoker`], built-in tools.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use skein::{
//!     AgentNode, AgentRouter, AgentState, CurrentDatetimeTool, GraphBuilder, MockLlm,
//!     ToolInvoker, ToolNode, START,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut invoker = ToolInvoker::new();
//! invoker.register(Arc::new(CurrentDatetimeTool));
//! let invoker = Arc::new(invoker);
//!
//! let llm = Arc::new(MockLlm::first_tools_then_reply("All done. FINISH"));
//! let agent = AgentNode::new("analyst", llm, "You are a helpful analyst.")
//!     .with_tools(invoker.specs());
//!
//! let mut graph = GraphBuilder::new();
//! graph.add_node("analyst", Arc::new(agent));
//! graph.add_node("tools", Arc::new(ToolNode::new(invoker)));
//! graph.add_edge(START, "analyst");
//! graph.add_edge("tools", "analyst");
//! graph.add_router("analyst", Arc::new(AgentRouter::new("tools", ["analyst", "tools"])));
//!
//! let engine = graph.build()?;
//! let out = engine.invoke(AgentState::new("What time is it?")).await?;
//! println!("{}", out.last_agent_reply().unwrap_or(""));
//! # Ok(())
//! # }
//! ```

pub mod graph;
pub mod llm;
pub mod message;
pub mod node;
pub mod state;
pub mod tools;

pub use graph::{
    generate_dot, generate_text, AgentRouter, ConstructionError, EdgeRouter, GraphBuilder,
    GraphEngine, Route, Router, RunError, RunEvent, END, START,
};
pub use llm::{AgentReply, ChatOpenAI, ChatRequest, FailingLlm, LlmClient, LlmError, MockLlm};
pub use message::{Message, ToolCall, ERROR_MARKER};
pub use node::{AgentNode, NameNode, Node, ToolNode, TOOL_NODE};
pub use state::{AgentState, StateDelta, USER_SENDER};
pub use tools::{
    CurrentDatetimeTool, EchoTool, Tool, ToolError, ToolInvoker, ToolSpec, TOOL_CURRENT_DATETIME,
    TOOL_ECHO,
};
