use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "https://api.mistral.ai";
pub const DEFAULT_MODEL: &str = "mistral-small-latest";
pub const DEFAULT_REMOTE: &str = "origin";
const PROMPT_FILE_NAME: &str = "sys_prompt.md";
const APP_DIR_NAME: &str = "ai-git-push";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub remote: String,
    pub prompt_search_path: Vec<PathBuf>,
    pub workspace_root: PathBuf,
}

/// Values supplied on the command line, which take priority over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub prompt_file: Option<PathBuf>,
    pub remote: Option<String>,
}

impl AppConfig {
    pub fn load(workspace_hint: &Path, overrides: ConfigOverrides) -> AppResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("loaded environment from {}", path.display()),
            Err(err) if err.not_found() => {}
            Err(err) => {
                return Err(AppError::Configuration(format!(
                    "failed to read .env file: {err}"
                )));
            }
        }

        Ok(Self::from_lookup(workspace_hint, overrides, |key| {
            env::var(key).ok()
        }))
    }

    pub fn from_lookup<F>(workspace_hint: &Path, overrides: ConfigOverrides, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut prompt_search_path = Vec::new();
        if let Some(path) = overrides.prompt_file {
            prompt_search_path.push(path);
        }
        if let Some(path) = non_empty("AI_GIT_PUSH_PROMPT") {
            prompt_search_path.push(PathBuf::from(path));
        }
        prompt_search_path.extend(default_prompt_locations());

        Self {
            api_key: non_empty("MISTRAL_API_KEY"),
            api_url: non_empty("MISTRAL_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: non_empty("MISTRAL_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            remote: overrides
                .remote
                .unwrap_or_else(|| DEFAULT_REMOTE.to_string()),
            prompt_search_path,
            workspace_root: workspace_hint.to_path_buf(),
        }
    }
}

fn default_prompt_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join(APP_DIR_NAME).join(PROMPT_FILE_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(format!(".{APP_DIR_NAME}")).join(PROMPT_FILE_NAME));
    }
    locations
}

/// Read the system instruction from the first existing file on the search path.
pub fn resolve_system_prompt(search_path: &[PathBuf]) -> AppResult<String> {
    let path = search_path
        .iter()
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| {
            let tried = search_path
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            AppError::Configuration(format!("'{PROMPT_FILE_NAME}' file not found (tried: {tried})"))
        })?;

    debug!("using system prompt {}", path.display());
    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::TempDir;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn applies_defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(
            Path::new("/work"),
            ConfigOverrides::default(),
            lookup_from(&[]),
        );
        assert_eq!(config.api_key, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.remote, DEFAULT_REMOTE);
        assert_eq!(config.workspace_root, PathBuf::from("/work"));
    }

    #[test]
    fn reads_backend_settings_from_environment() {
        let config = AppConfig::from_lookup(
            Path::new("."),
            ConfigOverrides::default(),
            lookup_from(&[
                ("MISTRAL_API_KEY", "secret"),
                ("MISTRAL_MODEL", "mistral-large-latest"),
                ("MISTRAL_API_URL", "http://localhost:9000"),
            ]),
        );
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "mistral-large-latest");
        assert_eq!(config.api_url, "http://localhost:9000");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = AppConfig::from_lookup(
            Path::new("."),
            ConfigOverrides::default(),
            lookup_from(&[("MISTRAL_API_KEY", "  "), ("MISTRAL_MODEL", "")]),
        );
        assert_eq!(config.api_key, None);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn orders_prompt_search_path_by_priority() {
        let overrides = ConfigOverrides {
            prompt_file: Some(PathBuf::from("/flag/prompt.md")),
            remote: Some("upstream".to_string()),
        };
        let config = AppConfig::from_lookup(
            Path::new("."),
            overrides,
            lookup_from(&[("AI_GIT_PUSH_PROMPT", "/env/prompt.md")]),
        );
        assert_eq!(config.prompt_search_path[0], PathBuf::from("/flag/prompt.md"));
        assert_eq!(config.prompt_search_path[1], PathBuf::from("/env/prompt.md"));
        assert_eq!(config.remote, "upstream");
    }

    #[test]
    fn first_existing_prompt_wins() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.md");
        let first = dir.path().join("first.md");
        let second = dir.path().join("second.md");
        fs::write(&first, "first prompt").unwrap();
        fs::write(&second, "second prompt").unwrap();

        let prompt = resolve_system_prompt(&[missing, first, second]).unwrap();
        assert_eq!(prompt, "first prompt");
    }

    #[test]
    fn missing_prompt_is_a_configuration_error() {
        let dir = TempDir::new().unwrap();
        let result = resolve_system_prompt(&[dir.path().join("a.md"), dir.path().join("b.md")]);
        match result {
            Err(AppError::Configuration(message)) => {
                assert!(message.contains("sys_prompt.md"));
                assert!(message.contains("a.md"));
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }
}
