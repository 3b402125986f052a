pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod orchestration;
pub mod planning;
pub mod registry;
pub mod tools;
