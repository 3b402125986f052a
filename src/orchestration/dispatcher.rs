//! Plan validation and routing.
//!
//! A plan reaches an executor only if its agent is registered and its tool
//! is one of that agent's capabilities. Anything else is a [`DispatchError`]
//! before any side effect happens.

use std::sync::Arc;

use crate::error::DispatchError;
use crate::planning::Plan;
use crate::registry::{AgentEntry, AgentRegistry};
use crate::tools::{ToolName, ToolOutcome};

pub struct Dispatcher {
    registry: Arc<AgentRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<AgentRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Resolve a plan to its registered agent and tool without running anything.
    pub fn resolve(&self, plan: &Plan) -> Result<(&AgentEntry, ToolName), DispatchError> {
        let agent_name = plan.agent_name.as_deref().ok_or(DispatchError::MissingAgent)?;

        let entry = self
            .registry
            .lookup(agent_name)
            .ok_or_else(|| DispatchError::UnknownAgent(agent_name.to_string()))?;

        let unsupported = || DispatchError::UnsupportedTool {
            agent: agent_name.to_string(),
            tool: plan.tool.clone(),
        };
        let tool: ToolName = plan.tool.parse().map_err(|_| unsupported())?;
        if !entry.card().can_run(tool) {
            return Err(unsupported());
        }

        Ok((entry, tool))
    }

    /// Run the plan's tool exactly once and return its outcome unchanged.
    pub async fn dispatch(&self, plan: &Plan) -> Result<ToolOutcome, DispatchError> {
        let (entry, tool) = self.resolve(plan)?;
        tracing::info!(agent = %entry.card().name, %tool, "Dispatching plan");
        Ok(entry.executor().execute(tool, &plan.args).await)
    }
}
