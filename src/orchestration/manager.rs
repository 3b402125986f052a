//! Mission manager: objective in, one dispatched tool call out.
//!
//! [`Manager::run_mission`] is a straight pipeline with no retries:
//! prompt → planner → [`parse_plan`] → [`Dispatcher::dispatch`]. Planner,
//! parse and dispatch failures abort the mission and propagate; executor
//! failures come back as a failed [`ToolOutcome`] inside the report.

use std::sync::Arc;

use uuid::Uuid;

use super::dispatcher::Dispatcher;
use super::types::MissionReport;
use crate::error::MissionError;
use crate::planning::{Planner, build_planning_prompt, parse_plan};
use crate::registry::AgentRegistry;
use crate::tools::ToolOutcome;

/// Objective of the first bootstrap mission.
pub const CHECK_OBJECTIVE: &str = "Check if we have any pipelines.";
/// Follow-up when the check found an empty repository.
pub const CREATE_FIRST_OBJECTIVE: &str = "Create a new pipeline.";
/// Follow-up in every other case.
pub const CREATE_ADDITIONAL_OBJECTIVE: &str = "Create a new additional pipeline.";

/// Longest planner reply prefix written to the tracing log.
const RAW_LOG_PREVIEW: usize = 100;

pub struct Manager {
    planner: Arc<dyn Planner>,
    dispatcher: Dispatcher,
}

impl Manager {
    pub fn new(planner: Arc<dyn Planner>, registry: Arc<AgentRegistry>) -> Self {
        Self {
            planner,
            dispatcher: Dispatcher::new(registry),
        }
    }

    pub async fn run_mission(&self, objective: &str) -> Result<MissionReport, MissionError> {
        let objective = objective.trim();
        if objective.is_empty() {
            return Err(MissionError::EmptyObjective);
        }

        let mission_id = Uuid::new_v4().to_string();
        tracing::info!(%mission_id, objective, "Objective received");

        let prompt = build_planning_prompt(objective, &self.dispatcher.registry().render());
        let raw_response = self.planner.plan(&prompt).await?;
        tracing::info!(
            %mission_id,
            model = self.planner.model(),
            raw = preview(&raw_response),
            "Planner responded"
        );

        let plan = parse_plan(&raw_response).inspect_err(|e| {
            tracing::warn!(%mission_id, reason = %e.reason, "Planner reply is not a plan");
        })?;
        tracing::info!(
            %mission_id,
            agent = plan.agent_name.as_deref().unwrap_or("<none>"),
            tool = %plan.tool,
            "Plan parsed"
        );

        let outcome = self.dispatcher.dispatch(&plan).await?;
        tracing::info!(%mission_id, success = outcome.is_success(), outcome = %outcome, "Mission finished");

        Ok(MissionReport {
            mission_id,
            objective: objective.to_string(),
            raw_response,
            plan,
            outcome,
        })
    }
}

/// Pick the bootstrap follow-up objective from the check mission's outcome.
///
/// Only a successful listing that counted zero workflows leads to
/// [`CREATE_FIRST_OBJECTIVE`]; failed or unknown counts fall through to
/// [`CREATE_ADDITIONAL_OBJECTIVE`].
pub fn follow_up_objective(check: &ToolOutcome) -> &'static str {
    match check.workflow_count() {
        Some(0) => CREATE_FIRST_OBJECTIVE,
        _ => CREATE_ADDITIONAL_OBJECTIVE,
    }
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(RAW_LOG_PREVIEW) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
