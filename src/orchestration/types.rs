//! Shared vocabulary for mission runs.

use serde::Serialize;

use crate::planning::Plan;
use crate::tools::ToolOutcome;

/// Unique identifier of one `run_mission` call (UUID v4 string).
pub type MissionId = String;

/// Everything a completed mission produced, stage by stage.
#[derive(Clone, Debug, Serialize)]
pub struct MissionReport {
    pub mission_id: MissionId,
    pub objective: String,
    /// Planner reply exactly as received.
    pub raw_response: String,
    pub plan: Plan,
    pub outcome: ToolOutcome,
}
