use std::path::PathBuf;

/// Errors related to configuration loading and resolution.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config at {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Missing credential: set {0} in the environment")]
    MissingCredential(&'static str),
}

/// Errors raised while building the agent registry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Agent '{0}' declares no capabilities")]
    EmptyCapabilities(String),

    #[error("Agent '{0}' is already registered")]
    DuplicateAgent(String),

    #[error("Agent '{agent}' advertises '{tool}' but its executor cannot run it")]
    ToolNotExecutable { agent: String, tool: String },
}

/// Errors from the planning (language model) collaborator.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("Planner '{model}' unreachable: {message}")]
    Unavailable { model: String, message: String },

    #[error("Planner '{model}' returned no text")]
    EmptyResponse { model: String },
}

/// Planner output that could not be recovered as a plan object.
///
/// `raw` keeps the complete planner text for diagnostics.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Could not parse plan ({reason}) from response: {raw}")]
pub struct PlanParseError {
    pub reason: String,
    pub raw: String,
}

/// A parsed plan that does not resolve against the agent registry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Plan does not name an agent")]
    MissingAgent,

    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    #[error("Agent '{agent}' does not support tool '{tool}'")]
    UnsupportedTool { agent: String, tool: String },
}

/// Errors that abort a mission. Everything here is surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum MissionError {
    #[error("Mission objective is empty")]
    EmptyObjective,

    #[error("Planner unavailable: {0}")]
    PlannerUnavailable(#[from] PlannerError),

    #[error(transparent)]
    PlanParse(#[from] PlanParseError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Errors from the automation (GitHub REST) collaborator.
///
/// These never abort a mission: executors render them into a failed
/// tool outcome.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Repository not found")]
    NotFound,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Transport(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),
}
