//! DevOps executor: workflow listing and basic pipeline creation.
//!
//! Both tools talk to the [`AutomationApi`]. Pipeline creation has a second,
//! non-transactional side effect (the local mirror write); a remote success
//! followed by a local failure is reported as its own failure message.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::github::{AutomationApi, FileCommit};
use super::mirror::LocalMirror;
use super::pipeline::{PipelineNamer, render_workflow};
use super::{ToolArgs, ToolExecutor, ToolName, ToolOutcome};
use crate::error::ApiError;

/// Outcome text for an empty repository.
pub const NO_WORKFLOWS_MESSAGE: &str = "No workflows found. The repository has no active pipelines.";

pub struct DevOpsExecutor<A> {
    api: A,
    mirror: LocalMirror,
    namer: PipelineNamer,
}

impl<A: AutomationApi> DevOpsExecutor<A> {
    pub fn new(api: A, mirror: LocalMirror) -> Self {
        Self {
            api,
            mirror,
            namer: PipelineNamer::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn list_workflows(&self) -> ToolOutcome {
        let list = match self.api.list_workflows().await {
            Ok(list) => list,
            Err(ApiError::NotFound) => return ToolOutcome::failure("Repository not found."),
            Err(e) => return ToolOutcome::failure(format!("Error: {e}")),
        };

        if list.total_count == 0 {
            return ToolOutcome::Success {
                message: NO_WORKFLOWS_MESSAGE.to_string(),
                workflow_count: Some(0),
            };
        }

        let lines: Vec<String> = list
            .workflows
            .iter()
            .map(|w| format!("ID: {} | Name: {} | State: {}", w.id, w.name, w.state))
            .collect();

        ToolOutcome::Success {
            message: lines.join("\n"),
            workflow_count: Some(list.total_count),
        }
    }

    pub async fn create_basic_pipeline(&self) -> ToolOutcome {
        let name = self.namer.next(&chrono::Local::now());
        let repo_path = name.repo_path();
        let content = render_workflow(&name.stamp);

        let commit = FileCommit {
            path: repo_path.clone(),
            message: format!("Create pipeline {} via pipewright", name.filename),
            content_base64: STANDARD.encode(content.as_bytes()),
        };

        let response = match self.api.create_file(&commit).await {
            Ok(response) => response,
            Err(e) => return ToolOutcome::failure(format!("Error creating pipeline: {e}")),
        };

        if !response.created() {
            tracing::warn!(status = response.status, path = %repo_path, "Pipeline commit rejected");
            return ToolOutcome::failure(format!("FAILED: {} - {}", response.status, response.body));
        }

        match self.mirror.write(&repo_path, &content).await {
            Ok(local) => {
                tracing::info!(path = %repo_path, local = %local.display(), "Pipeline created");
                ToolOutcome::success(format!(
                    "SUCCESS: Created new pipeline '{repo_path}' (local copy saved)"
                ))
            }
            Err(e) => {
                tracing::warn!(path = %repo_path, error = %e, "Pipeline created but local copy failed");
                ToolOutcome::failure(format!(
                    "PARTIAL: Created pipeline '{repo_path}' in the repository, \
                     but the local copy was NOT saved: {e}"
                ))
            }
        }
    }
}

#[async_trait]
impl<A: AutomationApi> ToolExecutor for DevOpsExecutor<A> {
    fn supported_tools(&self) -> &'static [ToolName] {
        ToolName::ALL
    }

    async fn execute(&self, tool: ToolName, args: &ToolArgs) -> ToolOutcome {
        if !args.is_empty() {
            tracing::debug!(%tool, ?args, "Ignoring tool arguments");
        }
        match tool {
            ToolName::ListWorkflows => self.list_workflows().await,
            ToolName::CreateBasicPipeline => self.create_basic_pipeline().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::github::{FileCommitResponse, Workflow, WorkflowList};
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Canned automation API that records commits.
    struct StubApi {
        listing: Mutex<Option<Result<WorkflowList, ApiError>>>,
        commit_status: u16,
        commits: Mutex<Vec<FileCommit>>,
    }

    impl StubApi {
        fn listing(result: Result<WorkflowList, ApiError>) -> Self {
            Self {
                listing: Mutex::new(Some(result)),
                commit_status: 201,
                commits: Mutex::new(Vec::new()),
            }
        }

        fn committing(status: u16) -> Self {
            Self {
                listing: Mutex::new(None),
                commit_status: status,
                commits: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AutomationApi for StubApi {
        async fn list_workflows(&self) -> Result<WorkflowList, ApiError> {
            self.listing.lock().unwrap().take().expect("listing called once")
        }

        async fn create_file(&self, commit: &FileCommit) -> Result<FileCommitResponse, ApiError> {
            self.commits.lock().unwrap().push(commit.clone());
            Ok(FileCommitResponse {
                status: self.commit_status,
                body: if self.commit_status == 201 {
                    "{}".to_string()
                } else {
                    r#"{"message":"Invalid request."}"#.to_string()
                },
            })
        }
    }

    fn executor(api: StubApi, tmp: &TempDir) -> DevOpsExecutor<StubApi> {
        DevOpsExecutor::new(api, LocalMirror::new(tmp.path()))
    }

    #[tokio::test]
    async fn empty_repository_reports_sentinel() {
        let tmp = TempDir::new().unwrap();
        let exec = executor(StubApi::listing(Ok(WorkflowList::default())), &tmp);

        let outcome = exec.list_workflows().await;

        assert_eq!(
            outcome.message(),
            "No workflows found. The repository has no active pipelines."
        );
        assert_eq!(outcome.workflow_count(), Some(0));
    }

    #[tokio::test]
    async fn listing_keeps_api_order() {
        let tmp = TempDir::new().unwrap();
        let list = WorkflowList {
            total_count: 2,
            workflows: vec![
                Workflow { id: 7, name: "Deploy".into(), state: "active".into() },
                Workflow { id: 3, name: "CI".into(), state: "disabled_manually".into() },
            ],
        };
        let exec = executor(StubApi::listing(Ok(list)), &tmp);

        let outcome = exec.list_workflows().await;

        assert_eq!(
            outcome.message(),
            "ID: 7 | Name: Deploy | State: active\nID: 3 | Name: CI | State: disabled_manually"
        );
        assert_eq!(outcome.workflow_count(), Some(2));
    }

    #[tokio::test]
    async fn missing_repository_is_a_failure() {
        let tmp = TempDir::new().unwrap();
        let exec = executor(StubApi::listing(Err(ApiError::NotFound)), &tmp);

        let outcome = exec.list_workflows().await;

        assert_eq!(outcome, ToolOutcome::failure("Repository not found."));
    }

    #[tokio::test]
    async fn api_error_is_reported_not_raised() {
        let tmp = TempDir::new().unwrap();
        let err = ApiError::Status { status: 401, body: "Bad credentials".into() };
        let exec = executor(StubApi::listing(Err(err)), &tmp);

        let outcome = exec.list_workflows().await;

        assert!(!outcome.is_success());
        assert!(outcome.message().starts_with("Error: HTTP 401"));
        assert_eq!(outcome.workflow_count(), None);
    }

    #[tokio::test]
    async fn created_pipeline_is_mirrored_locally() {
        let tmp = TempDir::new().unwrap();
        let exec = executor(StubApi::committing(201), &tmp);

        let outcome = exec.create_basic_pipeline().await;
        assert!(outcome.is_success(), "unexpected outcome: {outcome}");
        assert!(outcome.message().contains("(local copy saved)"));

        let commits = exec.api().commits.lock().unwrap().clone();
        assert_eq!(commits.len(), 1);
        let commit = &commits[0];
        assert!(commit.path.starts_with(".github/workflows/workflow_"));
        assert!(commit.message.starts_with("Create pipeline workflow_"));

        let decoded = String::from_utf8(STANDARD.decode(&commit.content_base64).unwrap()).unwrap();
        let local = std::fs::read_to_string(tmp.path().join(&commit.path)).unwrap();
        assert_eq!(decoded, local);
        assert!(outcome.message().contains(&commit.path));
    }

    #[tokio::test]
    async fn rejected_commit_reports_status_and_body() {
        let tmp = TempDir::new().unwrap();
        let exec = executor(StubApi::committing(422), &tmp);

        let outcome = exec.create_basic_pipeline().await;

        assert_eq!(
            outcome,
            ToolOutcome::failure(r#"FAILED: 422 - {"message":"Invalid request."}"#)
        );
        assert!(!tmp.path().join(".github").exists());
    }

    #[tokio::test]
    async fn local_write_failure_is_reported_distinctly() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("mirror");
        std::fs::write(&blocker, "not a directory").unwrap();
        let exec = DevOpsExecutor::new(StubApi::committing(201), LocalMirror::new(&blocker));

        let outcome = exec.create_basic_pipeline().await;

        assert!(!outcome.is_success());
        assert!(outcome.message().starts_with("PARTIAL: Created pipeline"));
        assert!(outcome.message().contains("local copy was NOT saved"));
        assert_eq!(exec.api().commits.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rapid_creations_use_distinct_files() {
        let tmp = TempDir::new().unwrap();
        let exec = executor(StubApi::committing(201), &tmp);

        for _ in 0..3 {
            assert!(exec.create_basic_pipeline().await.is_success());
        }

        let commits = exec.api().commits.lock().unwrap().clone();
        let mut paths: Vec<&str> = commits.iter().map(|c| c.path.as_str()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), 3);
    }

    #[tokio::test]
    async fn execute_routes_by_tool_name() {
        let tmp = TempDir::new().unwrap();
        let exec = executor(StubApi::listing(Ok(WorkflowList::default())), &tmp);

        let outcome = exec.execute(ToolName::ListWorkflows, &ToolArgs::new()).await;

        assert_eq!(outcome.workflow_count(), Some(0));
        assert!(exec.api().commits.lock().unwrap().is_empty());
    }
}
