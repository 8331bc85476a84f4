use tracing::{debug, info};

use crate::context::AppContext;
use crate::domain::branch::{BranchName, PushOutcome};
use crate::domain::change::ChangeSet;
use crate::domain::message::build_message;
use crate::error::{AppError, AppResult};
use crate::services::version_control::build_statistics;

pub struct CommitWorkflowOutcome {
    pub message: String,
    pub branch: BranchName,
    pub push: PushOutcome,
    pub attempts: usize,
}

/// Stage everything, draft and confirm a message, commit, then push.
pub async fn commit_and_push(
    ctx: &AppContext,
    message_override: Option<String>,
) -> AppResult<CommitWorkflowOutcome> {
    let vcs = ctx.version_control.as_ref();

    if !vcs.is_repository().await {
        return Err(AppError::NotRepository);
    }

    ctx.console.warning("🚧 Checking for changes...");
    vcs.stage_all().await?;
    if !vcs.has_changes().await? {
        return Err(AppError::NoChanges);
    }

    let (message, attempts) = draft_until_confirmed(ctx, message_override).await?;

    vcs.commit(&message).await?;
    info!(attempts, "commit created");

    let branch = vcs.current_branch().await?;
    let push = push_branch(ctx, &branch).await;

    Ok(CommitWorkflowOutcome {
        message,
        branch,
        push,
        attempts,
    })
}

/// Loop until the user accepts a message. A literal message is only offered on
/// the first attempt; rejecting it falls back to a generated draft.
async fn draft_until_confirmed(
    ctx: &AppContext,
    message_override: Option<String>,
) -> AppResult<(String, usize)> {
    let mut literal = message_override.filter(|message| !message.is_empty());
    let mut attempts = 0;

    loop {
        attempts += 1;
        let message = match literal.take() {
            Some(message) => build_message(&message, &ChangeSet::empty(), ""),
            None => {
                let drafted = draft_message(ctx).await?;
                ctx.console.success("✅ Successfully generated commit message");
                drafted
            }
        };

        if ctx.console.confirm(&message).await? {
            return Ok((message, attempts));
        }
        debug!(attempts, "commit message rejected, drafting again");
    }
}

async fn draft_message(ctx: &AppContext) -> AppResult<String> {
    let vcs = ctx.version_control.as_ref();
    let stats = build_statistics(vcs).await?;
    debug!(files = stats.total(), "collected staged changes");

    let diff = vcs.diff_summary().await?;
    let summary = ctx.language_model.generate(&diff).await?;
    Ok(build_message("", &stats, &summary))
}

async fn push_branch(ctx: &AppContext, branch: &BranchName) -> PushOutcome {
    let remote = ctx.config.remote.as_str();

    if branch.is_detached() {
        let outcome = PushOutcome::failed("HEAD is detached; there is no branch to push");
        ctx.console
            .error(&format!("❌ Error: Failed to push: {}", outcome.stderr));
        return outcome;
    }

    ctx.console.info(&format!("🚀 Pushing to {}...", branch.as_str()));
    let outcome = ctx.version_control.push(remote, branch).await;

    if outcome.success {
        ctx.console
            .success(&format!("✅ Successfully pushed to {}", branch.as_str()));
    } else {
        ctx.console.error(&format!(
            "❌ Error: Failed to push to {}: {}",
            branch.as_str(),
            outcome.stderr
        ));
        ctx.console.warning(&format!(
            "💡 Try running: {} manually",
            branch.push_command(remote)
        ));
    }
    outcome
}
