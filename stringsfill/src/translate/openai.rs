//! Oracle backed by an OpenAI-compatible chat-completions API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    oracle::{OracleError, TranslationOracle, TranslationRequest},
    prompt::{ChatMessage, PromptBuilder},
};
use crate::config::OracleSettings;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn into_text(self) -> Option<String> {
        self.choices.into_iter().next()?.message.content
    }
}

pub struct OpenAiOracle {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    prompt: PromptBuilder,
}

impl std::fmt::Debug for OpenAiOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiOracle")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl OpenAiOracle {
    pub fn new(settings: &OracleSettings, api_key: impl Into<String>) -> Result<Self, OracleError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(OpenAiOracle {
            client,
            endpoint: settings.endpoint(),
            model: settings.model.clone(),
            api_key: api_key.into(),
            prompt: PromptBuilder::new(settings.brand_names.clone()),
        })
    }

    /// Reads the API key from the environment variable named in `settings`.
    pub fn from_env(settings: &OracleSettings) -> Result<Self, OracleError> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| OracleError::MissingApiKey(settings.api_key_env.clone()))?;
        Self::new(settings, api_key)
    }

    fn request_body(&self, request: &TranslationRequest) -> ChatCompletionRequest<'_> {
        ChatCompletionRequest {
            model: &self.model,
            messages: self.prompt.messages(request),
        }
    }
}

#[async_trait]
impl TranslationOracle for OpenAiOracle {
    async fn translate(&self, request: &TranslationRequest) -> Result<Option<String>, OracleError> {
        debug!(key = %request.key, language = %request.language, "requesting translation");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|err| OracleError::InvalidResponse(err.to_string()))?;
        Ok(parsed.into_text())
    }
}
