use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pipewright",
    version,
    about = "Turn plain-language goals into GitHub Actions workflow operations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the repository for pipelines, then create one
    Bootstrap {
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Run a single mission for the given objective
    Mission {
        /// What you want done, e.g. "List our pipelines"
        objective: String,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

/// Overrides shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// Path to config file (defaults to ./pipewright.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Planner model name (e.g., "gpt-4o-mini")
    #[arg(short, long)]
    pub model: Option<String>,

    /// Repository owner
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long)]
    pub repo: Option<String>,

    /// Directory that receives local copies of created workflows
    #[arg(long)]
    pub mirror_root: Option<PathBuf>,
}

impl Cli {
    pub fn config_args(&self) -> &ConfigArgs {
        match &self.command {
            Commands::Bootstrap { config } => config,
            Commands::Mission { config, .. } => config,
        }
    }
}
