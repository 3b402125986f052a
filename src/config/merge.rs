use super::schema::{AppConfig, PartialConfig};
use crate::error::ConfigError;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_PLANNER_ENDPOINT: &str = "https://models.github.ai/inference/";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_REPO_OWNER: &str = "vikashegde21";
pub const DEFAULT_REPO_NAME: &str = "MCP-A2A-github_actions";

impl PartialConfig {
    /// Merge self with a lower-priority fallback.
    /// Self's non-None values take precedence.
    pub fn with_fallback(self, fallback: PartialConfig) -> PartialConfig {
        PartialConfig {
            model: self.model.or(fallback.model),
            planner_endpoint: self.planner_endpoint.or(fallback.planner_endpoint),
            planner_token: self.planner_token.or(fallback.planner_token),
            temperature: self.temperature.or(fallback.temperature),
            top_p: self.top_p.or(fallback.top_p),
            max_tokens: self.max_tokens.or(fallback.max_tokens),
            github_api_url: self.github_api_url.or(fallback.github_api_url),
            github_token: self.github_token.or(fallback.github_token),
            repo_owner: self.repo_owner.or(fallback.repo_owner),
            repo_name: self.repo_name.or(fallback.repo_name),
            github_timeout_secs: self.github_timeout_secs.or(fallback.github_timeout_secs),
            mirror_root: self.mirror_root.or(fallback.mirror_root),
            log_dir: self.log_dir.or(fallback.log_dir),
        }
    }

    /// Convert to AppConfig, filling any remaining gaps with defaults.
    ///
    /// The planner token has no default: a missing one is an error.
    pub fn finalize(self) -> Result<AppConfig, ConfigError> {
        let planner_token = self
            .planner_token
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingCredential("OPENAI_API_KEY"))?;

        Ok(AppConfig {
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            planner_endpoint: self
                .planner_endpoint
                .unwrap_or_else(|| DEFAULT_PLANNER_ENDPOINT.to_string()),
            planner_token,
            temperature: self.temperature.unwrap_or(1.0),
            top_p: self.top_p.unwrap_or(1.0),
            max_tokens: self.max_tokens.unwrap_or(1000),
            github_api_url: self
                .github_api_url
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            github_token: self.github_token.filter(|t| !t.is_empty()),
            repo_owner: self.repo_owner.unwrap_or_else(|| DEFAULT_REPO_OWNER.to_string()),
            repo_name: self.repo_name.unwrap_or_else(|| DEFAULT_REPO_NAME.to_string()),
            github_timeout_secs: self.github_timeout_secs.unwrap_or(30),
            mirror_root: self.mirror_root.unwrap_or_else(|| PathBuf::from(".")),
            log_dir: self
                .log_dir
                .unwrap_or_else(|| PathBuf::from(".pipewright-logs")),
        })
    }
}
