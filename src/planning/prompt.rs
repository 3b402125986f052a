//! Planning prompt construction.
//!
//! The prompt is fixed text around three inputs: the user's objective, the
//! rendered agent registry, and the selection rules below. Identical inputs
//! always produce an identical prompt.

use crate::tools::ToolName;

/// Rules disambiguating between the available tools.
pub fn selection_rules() -> String {
    let list = ToolName::ListWorkflows;
    let create = ToolName::CreateBasicPipeline;
    format!(
        "\
1. If the user wants to check/list pipelines, use '{list}'.
2. If the user wants to CREATE a pipeline, or if the goal implies creating one because none exist, use '{create}'.
3. Do NOT just list workflows if the goal is to create one."
    )
}

/// Build the single-turn planning request sent to the planner.
pub fn build_planning_prompt(objective: &str, agents_json: &str) -> String {
    let rules = selection_rules();
    format!(
        "\
You are an Orchestrator.
User Goal: \"{objective}\"

Available Agents: {agents_json}

Rules:
{rules}

Return a JSON object with:
- \"agent_name\": name of agent
- \"tool\": tool function name
- \"args\": dictionary of arguments

IMPORTANT: Return ONLY valid JSON, no other text."
    )
}
