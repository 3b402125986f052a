use std::sync::Arc;

use clap::Parser;

use pipewright::cli::{Cli, Commands};
use pipewright::config;
use pipewright::logging::MissionLogger;
use pipewright::orchestration::manager::CHECK_OBJECTIVE;
use pipewright::orchestration::{Manager, MissionReport, follow_up_objective};
use pipewright::planning::GenaiPlanner;
use pipewright::registry::default_registry;
use pipewright::tools::devops::DevOpsExecutor;
use pipewright::tools::github::GithubClient;
use pipewright::tools::mirror::LocalMirror;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("pipewright starting");

    let config = config::load_config(&cli)?;
    tracing::info!(
        model = %config.model,
        repo = %format!("{}/{}", config.repo_owner, config.repo_name),
        mirror_root = %config.mirror_root.display(),
        "Config loaded"
    );
    if config.github_token.is_none() {
        tracing::warn!("GITHUB_TOKEN not set; GitHub requests will be unauthenticated");
    }

    let api = GithubClient::new(&config)?;
    let executor = Arc::new(DevOpsExecutor::new(api, LocalMirror::new(&config.mirror_root)));
    let registry = Arc::new(default_registry(executor)?);
    let manager = Manager::new(Arc::new(GenaiPlanner::new(&config)), registry);

    let mut logger = MissionLogger::new(&config.log_dir)?;
    tracing::info!(log = %logger.log_path().display(), "Mission log opened");

    match &cli.command {
        Commands::Bootstrap { .. } => {
            println!("--- Step 1: Check ---");
            let check = run_logged(&manager, &mut logger, CHECK_OBJECTIVE).await?;

            println!("\n--- Step 2: Create New Workflow ---");
            match check.outcome.workflow_count() {
                Some(0) => println!("No existing workflows - creating the first one..."),
                Some(_) => println!("Workflows exist - creating an additional one..."),
                None => tracing::warn!("Workflow count unknown; creating an additional pipeline"),
            }
            run_logged(&manager, &mut logger, follow_up_objective(&check.outcome)).await?;
        }
        Commands::Mission { objective, .. } => {
            run_logged(&manager, &mut logger, objective).await?;
        }
    }

    Ok(())
}

/// Run one mission, record it in the mission log and print its outcome.
async fn run_logged(
    manager: &Manager,
    logger: &mut MissionLogger,
    objective: &str,
) -> anyhow::Result<MissionReport> {
    println!("[Manager]: Objective received -> '{objective}'");
    if let Err(e) = logger.log_mission_start(objective) {
        tracing::warn!("Failed to write mission log: {e:#}");
    }

    match manager.run_mission(objective).await {
        Ok(report) => {
            if let Err(e) = logger.log_report(&report) {
                tracing::warn!("Failed to write mission log: {e:#}");
            }
            println!("[Manager]: Plan -> {}", report.plan.tool);
            println!("[Manager]: Outcome -> {}", report.outcome);
            Ok(report)
        }
        Err(e) => {
            if let Err(log_err) = logger.log_error(objective, &e) {
                tracing::warn!("Failed to write mission log: {log_err:#}");
            }
            Err(e.into())
        }
    }
}
