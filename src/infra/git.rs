use std::io::Write;
use std::path::PathBuf;
use std::process::{Output, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::branch::{BranchName, PushOutcome};
use crate::domain::change::{ChangeCategory, DiffSummary, FILE_INDENT};
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

const COMMIT_MESSAGE_PREFIX: &str = ".commit_msg";

pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    fn command(&self, args: &[&str]) -> Command {
        debug!(?args, "running git");
        let mut command = Command::new("git");
        command
            .args(args)
            .current_dir(&self.workspace_root)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        command
    }

    async fn output(&self, args: &[&str]) -> AppResult<Output> {
        self.command(args).output().await.map_err(|err| {
            AppError::VersionControl(format!("failed to run git {}: {err}", args.join(" ")))
        })
    }

    /// Run git and return stdout, treating a non-zero exit as an error.
    async fn stdout(&self, args: &[&str]) -> AppResult<String> {
        let output = self.output(args).await?;
        if !output.status.success() {
            return Err(AppError::VersionControl(format!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn succeeds(&self, args: &[&str]) -> bool {
        self.command(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn is_repository(&self) -> bool {
        self.succeeds(&["rev-parse", "--git-dir"]).await
    }

    async fn stage_all(&self) -> AppResult<()> {
        self.stdout(&["add", "."]).await?;
        Ok(())
    }

    async fn has_changes(&self) -> AppResult<bool> {
        let status = self.stdout(&["status", "--porcelain"]).await?;
        Ok(!status.trim().is_empty())
    }

    async fn changed_files(&self, category: ChangeCategory) -> AppResult<Vec<String>> {
        let filter = format!("--diff-filter={}", category.diff_filter());
        let listing = self
            .stdout(&["diff", "--cached", "--name-only", &filter])
            .await?;
        Ok(listing
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| format!("{FILE_INDENT}{line}"))
            .collect())
    }

    async fn is_initial_commit(&self) -> bool {
        !self.succeeds(&["rev-parse", "HEAD"]).await
    }

    async fn diff_summary(&self) -> AppResult<DiffSummary> {
        let args: &[&str] = if self.is_initial_commit().await {
            &["diff", "--cached"]
        } else {
            &["diff", "--cached", "HEAD"]
        };
        let output = self.output(args).await?;
        if !output.status.success() {
            return Err(AppError::VersionControl(format!(
                "could not get changes summary: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(DiffSummary::from_raw(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn current_branch(&self) -> AppResult<BranchName> {
        let output = self.stdout(&["branch", "--show-current"]).await?;
        Ok(BranchName::from_output(&output))
    }

    async fn commit(&self, message: &str) -> AppResult<()> {
        // Dropping the handle deletes the file, so an interrupted commit leaves nothing behind.
        let mut file = tempfile::Builder::new()
            .prefix(COMMIT_MESSAGE_PREFIX)
            .suffix(".txt")
            .tempfile_in(&self.workspace_root)?;
        file.write_all(message.as_bytes())?;
        file.flush()?;

        let path = file.path().to_string_lossy().into_owned();
        let output = self
            .command(&["commit", "-F", &path])
            .stdout(Stdio::null())
            .output()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to run git commit: {err}")))?;

        if !output.status.success() {
            return Err(AppError::VersionControl(format!(
                "git commit failed with exit code {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        file.close()?;
        Ok(())
    }

    async fn push(&self, remote: &str, branch: &BranchName) -> PushOutcome {
        match self.output(&["push", remote, branch.as_str()]).await {
            Ok(output) if output.status.success() => PushOutcome::succeeded(),
            Ok(output) => {
                PushOutcome::failed(String::from_utf8_lossy(&output.stderr).trim().to_string())
            }
            Err(err) => PushOutcome::failed(err.to_string()),
        }
    }
}
