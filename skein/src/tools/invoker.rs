//! Tool invoker: named capability registry with a never-throws call boundary.
//!
//! `call(name, args)` always returns text. Unknown tools, tool failures and
//! timeouts are rendered as `Error: ...` results so the router can proceed
//! instead of the run aborting. This is the single load-bearing contract of
//! the tool side-channel.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::message::ERROR_MARKER;

use super::{Tool, ToolSpec};

/// Registry of tools plus the synchronous-looking call boundary.
///
/// Registration happens before the invoker is shared (`Arc`) with tool nodes;
/// after that the set is effectively frozen, like the rest of the graph
/// configuration.
pub struct ToolInvoker {
    tools: HashMap<String, Arc<dyn Tool>>,
    /// Per-call ceiling; an overrunning capability becomes a textual failure.
    timeout: Option<Duration>,
}

impl ToolInvoker {
    /// Empty invoker without a call timeout.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            timeout: None,
        }
    }

    /// Sets the per-call timeout (builder).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Registers a tool. Replaces an existing tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> &mut Self {
        self.tools.insert(tool.name().to_string(), tool);
        self
    }

    /// Specs of all registered tools, for the LLM capability list.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.values().map(|t| t.spec()).collect()
    }

    /// Calls the named tool. Never errors: unknown names, failures and
    /// timeouts come back as `Error: ...` text.
    pub async fn call(&self, name: &str, args: Value) -> String {
        let Some(tool) = self.tools.get(name) else {
            tracing::warn!(tool = %name, "unknown tool requested");
            return format!("{} tool not found: {}", ERROR_MARKER, name);
        };

        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, tool.invoke(args)).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(tool = %name, timeout_ms = limit.as_millis() as u64, "tool call timed out");
                    return format!(
                        "{} tool '{}' timed out after {}ms",
                        ERROR_MARKER,
                        name,
                        limit.as_millis()
                    );
                }
            },
            None => tool.invoke(args).await,
        };

        match result {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(tool = %name, error = %e, "tool call failed");
                format!("{} tool '{}' failed: {}", ERROR_MARKER, name, e)
            }
        }
    }
}

impl Default for ToolInvoker {
    fn default() -> Self {
        Self::new()
    }
}
