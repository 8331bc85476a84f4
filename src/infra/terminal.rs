use std::io::{self, Write};

use async_trait::async_trait;
use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::error::AppResult;
use crate::services::ConsoleService;
use crate::services::console::is_confirmation;
use crate::ui;

/// Console backed by one long-lived line reader, so answers typed or piped
/// ahead of a prompt stay buffered for the next one.
pub struct TerminalConsole<R = BufReader<Stdin>> {
    input: Mutex<Lines<R>>,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self::with_input(BufReader::new(tokio::io::stdin()))
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> TerminalConsole<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn with_input(reader: R) -> Self {
        Self {
            input: Mutex::new(reader.lines()),
        }
    }

    async fn read_answer(&self) -> AppResult<String> {
        let mut lines = self.input.lock().await;
        match lines.next_line().await? {
            Some(line) => Ok(line),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed before the commit message was confirmed",
            )
            .into()),
        }
    }
}

#[async_trait]
impl<R> ConsoleService for TerminalConsole<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn confirm(&self, message: &str) -> AppResult<bool> {
        println!("{}", ui::boxed(message).white());

        let mut stdout = io::stdout();
        write!(stdout, "{}", "🛎️ Do you want to proceed? [Y/n] ".yellow().bold())?;
        stdout.flush()?;

        let answer = self.read_answer().await?;
        Ok(is_confirmation(&answer))
    }

    fn info(&self, message: &str) {
        ui::print_info(message);
    }

    fn success(&self, message: &str) {
        ui::print_success(message);
    }

    fn warning(&self, message: &str) {
        ui::print_warning(message);
    }

    fn error(&self, message: &str) {
        ui::print_error(message);
    }
}
