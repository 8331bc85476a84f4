use async_trait::async_trait;

use crate::domain::change::DiffSummary;
use crate::error::AppResult;

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    /// Draft a commit summary for the staged diff. Single attempt.
    async fn generate(&self, diff: &DiffSummary) -> AppResult<String>;
}
