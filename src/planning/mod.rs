//! Objective-to-plan translation: prompt construction, the planner
//! collaborator, and reply parsing.

pub mod parser;
pub mod planner;
pub mod prompt;

pub use parser::{Plan, extract_object_span, parse_plan};
pub use planner::{GenaiPlanner, Planner};
pub use prompt::build_planning_prompt;
