use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{ConsoleService, LanguageModelService, VersionControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub version_control: Arc<dyn VersionControlService>,
    pub language_model: Arc<dyn LanguageModelService>,
    pub console: Arc<dyn ConsoleService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        version_control: Arc<dyn VersionControlService>,
        language_model: Arc<dyn LanguageModelService>,
        console: Arc<dyn ConsoleService>,
    ) -> Self {
        Self {
            config,
            version_control,
            language_model,
            console,
        }
    }
}
