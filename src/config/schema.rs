use serde::Deserialize;
use std::path::PathBuf;

/// The TOML file structure for pipewright.toml.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub planner: Option<PlannerSection>,
    pub github: Option<GithubSection>,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Deserialize)]
pub struct PlannerSection {
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct GithubSection {
    pub api_url: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct OutputSection {
    pub mirror_root: Option<String>,
    pub log_dir: Option<String>,
}

/// Fully-resolved runtime configuration. All fields have values.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model: String,
    pub planner_endpoint: String,
    pub planner_token: String,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
    pub github_api_url: String,
    pub github_token: Option<String>,
    pub repo_owner: String,
    pub repo_name: String,
    pub github_timeout_secs: u64,
    pub mirror_root: PathBuf,
    pub log_dir: PathBuf,
}

/// Partial config used during merge. All fields are Option so that
/// missing fields don't override lower-priority values.
#[derive(Debug, Clone, Default)]
pub struct PartialConfig {
    pub model: Option<String>,
    pub planner_endpoint: Option<String>,
    pub planner_token: Option<String>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub max_tokens: Option<u32>,
    pub github_api_url: Option<String>,
    pub github_token: Option<String>,
    pub repo_owner: Option<String>,
    pub repo_name: Option<String>,
    pub github_timeout_secs: Option<u64>,
    pub mirror_root: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl ConfigFile {
    /// Flatten the TOML sections into a [`PartialConfig`].
    /// Credentials never come from files.
    pub fn into_partial(self) -> PartialConfig {
        let planner = self.planner;
        let github = self.github;
        let output = self.output;

        let (model, planner_endpoint, temperature, top_p, max_tokens) = match planner {
            Some(p) => (p.model, p.endpoint, p.temperature, p.top_p, p.max_tokens),
            None => (None, None, None, None, None),
        };
        let (github_api_url, repo_owner, repo_name, github_timeout_secs) = match github {
            Some(g) => (g.api_url, g.owner, g.repo, g.timeout_secs),
            None => (None, None, None, None),
        };
        let (mirror_root, log_dir) = match output {
            Some(o) => (o.mirror_root.map(PathBuf::from), o.log_dir.map(PathBuf::from)),
            None => (None, None),
        };

        PartialConfig {
            model,
            planner_endpoint,
            temperature,
            top_p,
            max_tokens,
            github_api_url,
            repo_owner,
            repo_name,
            github_timeout_secs,
            mirror_root,
            log_dir,
            ..Default::default()
        }
    }
}
