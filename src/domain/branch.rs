#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName(pub String);

impl BranchName {
    pub fn from_output(output: &str) -> Self {
        Self(output.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty when HEAD is detached.
    pub fn is_detached(&self) -> bool {
        self.0.is_empty()
    }

    /// Command the user can run to retry a failed push by hand.
    pub fn push_command(&self, remote: &str) -> String {
        format!("git push {remote} {}", self.0)
    }
}

/// Result of `git push`. Failures are reported, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOutcome {
    pub success: bool,
    pub stderr: String,
}

impl PushOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            stderr: String::new(),
        }
    }

    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stderr: stderr.into(),
        }
    }
}
