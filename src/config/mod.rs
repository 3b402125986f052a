pub mod merge;
pub mod schema;

pub use schema::*;

use crate::cli::{Cli, ConfigArgs};
use crate::error::ConfigError;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Workspace config file name, looked up in the current directory.
const CONFIG_FILE_NAME: &str = "pipewright.toml";

/// Load configuration by merging global, workspace, environment and CLI sources.
/// Precedence: CLI > environment > workspace config > global config > defaults.
///
/// Missing implicit config files are handled gracefully (defaults apply), but
/// a file named with `--config` that cannot be read or parsed is an error,
/// so a typo never silently targets the default repository. This is the
/// only place that reads the process environment; everything downstream
/// receives the resolved [`AppConfig`].
pub fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let args = cli.config_args();

    // Layer 1: Global config (~/.config/pipewright/pipewright.toml or platform equivalent)
    let global = load_global_config();

    // Layer 2: Workspace config. An explicit --config path must load;
    // the implicit ./pipewright.toml is optional.
    let workspace = match &args.config {
        Some(path) => load_explicit_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => load_toml_file(Path::new(CONFIG_FILE_NAME)).unwrap_or_default(),
    };

    // Layer 3: Environment (credentials and repository coordinates)
    let env = env_partial(|key| std::env::var(key).ok());

    // Layer 4: CLI args
    let cli_partial = cli_to_partial(args);

    let config = cli_partial
        .with_fallback(env)
        .with_fallback(workspace)
        .with_fallback(global)
        .finalize()
        .context("Failed to resolve configuration")?;

    Ok(config)
}

/// Build the environment layer from a variable lookup.
pub fn env_partial(lookup: impl Fn(&str) -> Option<String>) -> PartialConfig {
    PartialConfig {
        planner_token: lookup("OPENAI_API_KEY"),
        github_token: lookup("GITHUB_TOKEN"),
        repo_owner: lookup("PIPEWRIGHT_OWNER"),
        repo_name: lookup("PIPEWRIGHT_REPO"),
        ..Default::default()
    }
}

/// Load global config from the platform-specific config directory.
/// Returns empty PartialConfig if file not found.
fn load_global_config() -> PartialConfig {
    match global_config_path() {
        Some(p) => load_toml_file(&p).unwrap_or_default(),
        None => {
            tracing::debug!("Could not determine global config directory");
            PartialConfig::default()
        }
    }
}

/// Load a config file the user asked for by path. Read and parse failures
/// are errors.
fn load_explicit_config(path: &Path) -> Result<PartialConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let partial = parse_config(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(partial)
}

/// Load and parse an optional TOML config file into a PartialConfig.
/// Returns None on file-not-found; parse errors are logged and ignored.
fn load_toml_file(path: &Path) -> Option<PartialConfig> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match parse_config(&contents)
            .context(format!("Failed to parse {}", path.display()))
        {
            Ok(partial) => {
                tracing::info!("Loaded config from {}", path.display());
                Some(partial)
            }
            Err(e) => {
                tracing::warn!("Config parse error: {:#}", e);
                None
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            None
        }
        Err(e) => {
            tracing::warn!("Failed to read config at {}: {}", path.display(), e);
            None
        }
    }
}

/// Parse TOML text into a PartialConfig.
pub fn parse_config(contents: &str) -> Result<PartialConfig, toml::de::Error> {
    toml::from_str::<ConfigFile>(contents).map(ConfigFile::into_partial)
}

/// Resolve the platform-specific global config path.
/// Linux: ~/.config/pipewright/pipewright.toml
/// macOS: ~/Library/Application Support/pipewright/pipewright.toml
fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "pipewright")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Convert CLI arguments to a PartialConfig for merging.
fn cli_to_partial(args: &ConfigArgs) -> PartialConfig {
    PartialConfig {
        model: args.model.clone(),
        repo_owner: args.owner.clone(),
        repo_name: args.repo.clone(),
        mirror_root: args.mirror_root.clone(),
        ..Default::default()
    }
}
