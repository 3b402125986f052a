//! Tool vocabulary and the executor seam.
//!
//! Every tool an agent can advertise is a [`ToolName`] variant; the planner's
//! free-form tool string only becomes actionable once it parses into one.
//! Executors implement [`ToolExecutor`] and report a structured
//! [`ToolOutcome`] whose `Display` form is the human-readable outcome.

pub mod devops;
pub mod github;
pub mod mirror;
pub mod pipeline;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Serialize, Serializer};

/// Arguments attached to a plan (`"args"` object in the planner reply).
pub type ToolArgs = serde_json::Map<String, serde_json::Value>;

/// The closed set of tools known to this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolName {
    ListWorkflows,
    CreateBasicPipeline,
}

impl ToolName {
    pub const ALL: &'static [ToolName] = &[ToolName::ListWorkflows, ToolName::CreateBasicPipeline];

    /// Wire name used in prompts and planner replies.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListWorkflows => "list_workflows",
            Self::CreateBasicPipeline => "create_basic_pipeline",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = UnknownToolName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| UnknownToolName(s.to_string()))
    }
}

impl Serialize for ToolName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A tool string that is not a [`ToolName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool name: {0}")]
pub struct UnknownToolName(pub String);

/// Result of one executor call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolOutcome {
    Success {
        message: String,
        /// Number of workflows in the repository, set only by a successful listing.
        #[serde(skip_serializing_if = "Option::is_none")]
        workflow_count: Option<usize>,
    },
    Failure {
        reason: String,
    },
}

impl ToolOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
            workflow_count: None,
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The human-readable outcome text.
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } => message,
            Self::Failure { reason } => reason,
        }
    }

    pub fn workflow_count(&self) -> Option<usize> {
        match self {
            Self::Success { workflow_count, .. } => *workflow_count,
            Self::Failure { .. } => None,
        }
    }
}

impl fmt::Display for ToolOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A component able to run a fixed subset of [`ToolName`]s.
///
/// Executors never return `Err`: remote and local failures are rendered into
/// [`ToolOutcome::Failure`] so the caller always gets a reportable outcome.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Tools this executor can run. Checked when an agent is registered.
    fn supported_tools(&self) -> &'static [ToolName];

    async fn execute(&self, tool: ToolName, args: &ToolArgs) -> ToolOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_names_round_trip_through_wire_form() {
        for tool in ToolName::ALL {
            assert_eq!(tool.as_str().parse::<ToolName>().unwrap(), *tool);
        }
    }

    #[test]
    fn unknown_tool_name_is_rejected() {
        let err = "delete_everything".parse::<ToolName>().unwrap_err();
        assert_eq!(err, UnknownToolName("delete_everything".to_string()));
    }

    #[test]
    fn tool_name_parsing_is_case_sensitive() {
        assert!("List_Workflows".parse::<ToolName>().is_err());
    }

    #[test]
    fn outcome_display_is_message_text() {
        let ok = ToolOutcome::success("all good");
        let bad = ToolOutcome::failure("FAILED: 422 - exists");
        assert_eq!(ok.to_string(), "all good");
        assert_eq!(bad.to_string(), "FAILED: 422 - exists");
        assert!(ok.is_success());
        assert!(!bad.is_success());
    }

    #[test]
    fn workflow_count_only_reported_on_success() {
        let listing = ToolOutcome::Success {
            message: "ID: 1 | Name: CI | State: active".to_string(),
            workflow_count: Some(1),
        };
        assert_eq!(listing.workflow_count(), Some(1));
        assert_eq!(ToolOutcome::failure("Repository not found.").workflow_count(), None);
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(ToolOutcome::failure("nope")).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["reason"], "nope");

        let json = serde_json::to_value(ToolOutcome::success("yes")).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json.get("workflow_count").is_none());
    }
}
