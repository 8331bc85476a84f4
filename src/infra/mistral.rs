use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::resolve_system_prompt;
use crate::domain::change::DiffSummary;
use crate::error::{AppError, AppResult};
use crate::services::LanguageModelService;
use crate::ui;

pub struct MistralClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    prompt_search_path: Vec<PathBuf>,
}

impl MistralClient {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        model: String,
        prompt_search_path: Vec<PathBuf>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url,
            api_key,
            model,
            prompt_search_path,
        }
    }

    fn completions_endpoint(base_url: &str) -> String {
        format!("{}/v1/chat/completions", base_url.trim_end_matches('/'))
    }

    async fn complete(&self, request: &ChatRequest<'_>) -> AppResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("MISTRAL_API_KEY not configured".to_string()))?;

        let response = self
            .http
            .post(Self::completions_endpoint(&self.base_url))
            .bearer_auth(api_key)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|err| AppError::LanguageModel(format!("failed to call Mistral: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::LanguageModel(format!(
                "Mistral responded with {status}: {body}"
            )));
        }

        let payload: ChatResponse = response.json().await.map_err(|err| {
            AppError::LanguageModel(format!("failed to parse Mistral response: {err}"))
        })?;

        payload.into_text()
    }
}

#[async_trait]
impl LanguageModelService for MistralClient {
    async fn generate(&self, diff: &DiffSummary) -> AppResult<String> {
        let system_prompt = resolve_system_prompt(&self.prompt_search_path)?;
        let request = ChatRequest::new(&self.model, &system_prompt, diff.as_str());
        debug!(
            model = %self.model,
            diff_bytes = diff.as_str().len(),
            "requesting commit summary"
        );

        let _spinner = ui::Spinner::start("💭 AI generating commit message...");
        self.complete(&request).await
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

impl<'a> ChatRequest<'a> {
    fn new(model: &'a str, system_prompt: &'a str, diff: &'a str) -> Self {
        Self {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: diff,
                },
            ],
        }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Value,
}

impl ChatResponse {
    fn into_text(self) -> AppResult<String> {
        let choice = self.choices.into_iter().next().ok_or_else(|| {
            AppError::LanguageModel("AI failed to generate commit message".to_string())
        })?;

        match choice.message.content {
            Value::String(text) => Ok(text),
            _ => Err(AppError::LanguageModel(
                "AI response is not a valid string".to_string(),
            )),
        }
    }
}
