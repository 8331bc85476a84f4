use async_trait::async_trait;

use crate::domain::branch::{BranchName, PushOutcome};
use crate::domain::change::{ChangeCategory, ChangeSet, DiffSummary};
use crate::error::AppResult;

#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Never fails; any error from git means "no".
    async fn is_repository(&self) -> bool;
    async fn stage_all(&self) -> AppResult<()>;
    async fn has_changes(&self) -> AppResult<bool>;
    /// Staged paths of one category, indented for display.
    async fn changed_files(&self, category: ChangeCategory) -> AppResult<Vec<String>>;
    async fn is_initial_commit(&self) -> bool;
    async fn diff_summary(&self) -> AppResult<DiffSummary>;
    async fn current_branch(&self) -> AppResult<BranchName>;
    async fn commit(&self, message: &str) -> AppResult<()>;
    async fn push(&self, remote: &str, branch: &BranchName) -> PushOutcome;
}

/// Collect the staged change set, one query per category.
pub async fn build_statistics(vcs: &dyn VersionControlService) -> AppResult<ChangeSet> {
    let mut changes = ChangeSet::empty();
    for category in ChangeCategory::ALL {
        let files = vcs.changed_files(category).await?;
        changes = changes.with_files(category, files);
    }
    Ok(changes)
}
