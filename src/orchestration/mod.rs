//! Mission orchestration.
//!
//! The [`manager::Manager`] drives one objective through planning, parsing
//! and the [`dispatcher::Dispatcher`], returning a [`types::MissionReport`].

pub mod dispatcher;
pub mod manager;
pub mod types;

pub use dispatcher::Dispatcher;
pub use manager::{Manager, follow_up_objective};
pub use types::MissionReport;
