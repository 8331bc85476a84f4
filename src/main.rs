mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod ui;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cmd::commit::{self, CommitCommandArgs};
use crate::config::{AppConfig, ConfigOverrides};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::infra::mistral::MistralClient;
use crate::infra::terminal::TerminalConsole;

#[derive(Parser)]
#[command(
    name = "ai-git-push",
    author,
    version,
    about = "Stage all changes, commit with an AI-drafted message, and push"
)]
struct Cli {
    /// Commit message to use verbatim instead of generating one.
    message: Option<String>,

    /// Remote to push the current branch to.
    #[arg(long)]
    remote: Option<String>,

    /// System prompt file to try before the default locations.
    #[arg(long, value_name = "PATH")]
    prompt_file: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Dropping the workflow future on Ctrl-C kills any running git child and
    // removes the temporary commit message file before we exit.
    let outcome = tokio::select! {
        result = run(cli) => Some(result),
        Ok(()) = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(Ok(())) => {}
        Some(Err(error)) => {
            ui::print_error(&format!("❌ Error: {error}"));
            std::process::exit(1);
        }
        None => {
            println!();
            ui::print_warning("👋 Commit cancelled");
            std::process::exit(0);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "ai_git_push=debug,warn"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: Cli) -> AppResult<()> {
    let cwd = std::env::current_dir()?;
    let config = AppConfig::load(
        &cwd,
        ConfigOverrides {
            prompt_file: cli.prompt_file,
            remote: cli.remote,
        },
    )?;

    for warning in configuration_warnings(&config, cli.message.as_deref()) {
        eprintln!("{warning}");
    }

    let git = Arc::new(GitCli::new(config.workspace_root.clone()));
    let language_model = Arc::new(MistralClient::new(
        config.api_url.clone(),
        config.api_key.clone(),
        config.model.clone(),
        config.prompt_search_path.clone(),
    ));
    let console = Arc::new(TerminalConsole::new());

    let context = AppContext::new(config, git, language_model, console);

    let outcome = commit::run(
        &context,
        CommitCommandArgs {
            message: cli.message,
        },
    )
    .await?;

    debug!(
        branch = outcome.branch.as_str(),
        pushed = outcome.push.success,
        attempts = outcome.attempts,
        message_bytes = outcome.message.len(),
        "commit workflow finished"
    );

    Ok(())
}

fn configuration_warnings(config: &AppConfig, message: Option<&str>) -> Vec<String> {
    let mut warnings = Vec::new();
    let needs_generation = message.is_none_or(str::is_empty);
    if config.api_key.is_none() && needs_generation {
        warnings.push(
            "Warning: MISTRAL_API_KEY not configured; message generation will fail.".to_string(),
        );
    }
    warnings
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn config_with_key(api_key: Option<&str>) -> AppConfig {
        AppConfig::from_lookup(Path::new("."), ConfigOverrides::default(), |key: &str| {
            (key == "MISTRAL_API_KEY").then(|| api_key.map(str::to_string)).flatten()
        })
    }

    #[test]
    fn warns_when_generation_has_no_api_key() {
        let warnings = configuration_warnings(&config_with_key(None), None);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("MISTRAL_API_KEY"));
    }

    #[test]
    fn literal_message_needs_no_api_key() {
        assert!(configuration_warnings(&config_with_key(None), Some("Fix bug")).is_empty());
        assert_eq!(configuration_warnings(&config_with_key(None), Some("")).len(), 1);
    }

    #[test]
    fn configured_key_is_silent() {
        assert!(configuration_warnings(&config_with_key(Some("secret")), None).is_empty());
    }
}
