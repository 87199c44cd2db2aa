//! OpenAI-compatible chat-completions client.

use super::{
    render_user_prompt, LlmError, LlmResult, SqlGenerator, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_USER_TEMPLATE,
};
use crate::config::LlmSettings;
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// SQL generator backed by a chat-completions endpoint.
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    system_prompt: String,
    user_template: String,
}

impl OpenAiClient {
    /// Build a client from resolved settings. Fails when no API key can be
    /// resolved — key material never lives in source.
    pub fn from_settings(settings: &LlmSettings) -> LlmResult<Self> {
        let api_key = settings
            .resolved_api_key()
            .map_err(|_| LlmError::MissingApiKey)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: settings.model.clone(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            user_template: DEFAULT_USER_TEMPLATE.to_string(),
        })
    }

    /// Override the default prompts.
    pub fn with_prompts(mut self, system_prompt: &str, user_template: &str) -> Self {
        self.system_prompt = system_prompt.to_string();
        self.user_template = user_template.to_string();
        self
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl SqlGenerator for OpenAiClient {
    async fn generate_sql(&self, question: &str, schema: &str) -> LlmResult<String> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!("[LLM] requesting completion from {} model={}", url, self.model);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: self.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user",
                    content: render_user_prompt(&self.user_template, schema, question),
                },
            ],
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("[LLM] request failed: {} {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let sql = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(LlmError::EmptyCompletion)?;

        debug!("[LLM] generated sql: {}", sql);
        Ok(sql)
    }
}
