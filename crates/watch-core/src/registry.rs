//! Tool registry for managing available tools

use crate::Tool;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Registry for managing tools
///
/// The registry is the dispatch table the agent runtime calls into: tools are
/// keyed by name, and [`ToolRegistry::dispatch`] renders both success and
/// failure as plain strings so the calling agent can read the outcome and
/// decide what to do next instead of crashing the orchestration.
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
        }
    }
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().expect("tool registry lock poisoned");
        tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().expect("tool registry lock poisoned");
        tools.get(name).cloned()
    }

    /// List all registered tools
    ///
    /// Returns a vector of all tools in the registry, sorted by name. This is
    /// useful for building tool definitions to send to the LLM.
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().expect("tool registry lock poisoned");
        let mut all: Vec<_> = tools.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    /// Execute a tool by name and render the outcome as a string
    ///
    /// Failures are returned as human-readable text rather than propagated, so
    /// the calling agent can retry, skip, or escalate on its own.
    pub async fn dispatch(&self, name: &str, params: Value) -> String {
        let Some(tool) = self.get(name) else {
            return format!("Error: tool not found: {name}");
        };

        match tool.execute(params).await {
            Ok(value) => {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            }
            Err(e) => {
                tracing::debug!(tool = name, "tool failed: {e}");
                format!("Error: {e}")
            }
        }
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        let tools = self.tools.read().expect("tool registry lock poisoned");
        tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        let tools = self.tools.read().expect("tool registry lock poisoned");
        tools.is_empty()
    }
}
