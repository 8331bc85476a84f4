use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::commit::{CommitWorkflowOutcome, commit_and_push};

#[derive(Debug, Clone)]
pub struct CommitCommandArgs {
    pub message: Option<String>,
}

pub async fn run(ctx: &AppContext, args: CommitCommandArgs) -> AppResult<CommitWorkflowOutcome> {
    commit_and_push(ctx, args.message).await
}
