//! Graph orchestration: builder, engine, routers, errors, visualization.
//!
//! `GraphBuilder` wires named nodes with edges and routers, validated into an
//! immutable `GraphEngine` that drives the step loop (`invoke` or the `run`
//! snapshot stream) until termination or the step ceiling.

mod builder;
mod engine;
mod error;
mod logging;
mod router;
mod viz;

pub use builder::{GraphBuilder, END, START};
pub use engine::{GraphEngine, RunEvent};
pub use error::{ConstructionError, RunError};
pub use logging::{log_node_complete, log_node_start, log_route, log_run_complete, log_run_start};
pub use router::{AgentRouter, EdgeRouter, Route, Router};
pub use viz::{generate_dot, generate_text};
