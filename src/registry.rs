//! Static catalog of agents, their advertised capabilities and the
//! executor bound to each.
//!
//! The registry is assembled once through [`AgentRegistryBuilder`], which
//! checks that every advertised capability is runnable by the bound executor.
//! After [`AgentRegistryBuilder::build`] it is read-only.

use std::sync::Arc;

use serde::Serialize;

use crate::error::RegistryError;
use crate::tools::{ToolExecutor, ToolName};

/// Name of the stock DevOps agent.
pub const DEVOPS_AGENT: &str = "DevOps_Runner";

/// Identity and capability descriptor of an agent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub capabilities: Vec<ToolName>,
}

impl AgentCard {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        capabilities: Vec<ToolName>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            capabilities,
        }
    }

    pub fn can_run(&self, tool: ToolName) -> bool {
        self.capabilities.contains(&tool)
    }
}

/// A registered agent: its card and the executor serving its capabilities.
pub struct AgentEntry {
    card: AgentCard,
    executor: Arc<dyn ToolExecutor>,
}

impl AgentEntry {
    pub fn card(&self) -> &AgentCard {
        &self.card
    }

    pub fn executor(&self) -> &dyn ToolExecutor {
        self.executor.as_ref()
    }
}

pub struct AgentRegistry {
    entries: Vec<AgentEntry>,
}

impl AgentRegistry {
    pub fn builder() -> AgentRegistryBuilder {
        AgentRegistryBuilder::default()
    }

    /// Exact-name lookup.
    pub fn lookup(&self, agent_name: &str) -> Option<&AgentEntry> {
        self.entries.iter().find(|e| e.card.name == agent_name)
    }

    pub fn cards(&self) -> impl Iterator<Item = &AgentCard> {
        self.entries.iter().map(|e| &e.card)
    }

    /// JSON array of all agent cards, in registration order.
    pub fn render(&self) -> String {
        let cards: Vec<&AgentCard> = self.cards().collect();
        // Serializing plain strings and enums cannot fail.
        serde_json::to_string(&cards).unwrap_or_else(|_| "[]".to_string())
    }
}

#[derive(Default)]
pub struct AgentRegistryBuilder {
    entries: Vec<AgentEntry>,
}

impl AgentRegistryBuilder {
    pub fn register(
        mut self,
        card: AgentCard,
        executor: Arc<dyn ToolExecutor>,
    ) -> Result<Self, RegistryError> {
        if card.capabilities.is_empty() {
            return Err(RegistryError::EmptyCapabilities(card.name));
        }
        if self.entries.iter().any(|e| e.card.name == card.name) {
            return Err(RegistryError::DuplicateAgent(card.name));
        }

        let supported = executor.supported_tools();
        if let Some(tool) = card.capabilities.iter().find(|t| !supported.contains(*t)) {
            return Err(RegistryError::ToolNotExecutable {
                agent: card.name,
                tool: tool.to_string(),
            });
        }

        tracing::debug!(agent = %card.name, capabilities = card.capabilities.len(), "Registered agent");
        self.entries.push(AgentEntry { card, executor });
        Ok(self)
    }

    pub fn build(self) -> AgentRegistry {
        AgentRegistry {
            entries: self.entries,
        }
    }
}

/// The stock registry: a single DevOps agent able to list and create workflows.
pub fn default_registry(executor: Arc<dyn ToolExecutor>) -> Result<AgentRegistry, RegistryError> {
    let card = AgentCard::new(
        DEVOPS_AGENT,
        "Can list, trigger, and CREATE GitHub CI/CD workflows.",
        vec![ToolName::ListWorkflows, ToolName::CreateBasicPipeline],
    );
    Ok(AgentRegistry::builder().register(card, executor)?.build())
}
