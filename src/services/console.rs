use async_trait::async_trait;

use crate::error::AppResult;

/// Interactive surface used by the commit workflow.
#[async_trait]
pub trait ConsoleService: Send + Sync {
    /// Show the drafted message and ask whether to use it.
    async fn confirm(&self, message: &str) -> AppResult<bool>;
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Empty input, `y` and `yes` accept, in any case. Anything else redrafts.
pub fn is_confirmation(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "" | "y" | "yes")
}
