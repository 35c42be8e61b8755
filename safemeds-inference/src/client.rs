//! Blocking client for an OpenAI-compatible chat/audio API.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use safemeds_core::config::InferenceConfig;
use safemeds_core::errors::{InferenceError, SafeMedsResult};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// Client for the hosted inference service.
pub struct InferenceClient {
    http: reqwest::blocking::Client,
    config: InferenceConfig,
    api_key: String,
}

impl InferenceClient {
    /// Construct a client, reading the API key from the environment
    /// variable named in the config.
    pub fn from_env(config: InferenceConfig) -> SafeMedsResult<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            InferenceError::MissingCredential {
                var: config.api_key_env.clone(),
            }
        })?;
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    pub(crate) fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// One chat completion; returns the assistant's text.
    pub(crate) fn chat(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> SafeMedsResult<String> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request = ChatRequest {
            model: &self.config.chat_model,
            messages,
            temperature,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| InferenceError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(InferenceError::BadResponse {
                reason: format!("{status}: {body}"),
            }
            .into());
        }

        let body: ChatResponse = response.json().map_err(|e| InferenceError::BadResponse {
            reason: format!("malformed completion: {e}"),
        })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(InferenceError::EmptyCompletion)?;

        debug!(model = %self.config.chat_model, chars = content.len(), "completion received");
        Ok(content)
    }

    pub(crate) fn http(&self) -> &reqwest::blocking::Client {
        &self.http
    }

    pub(crate) fn bearer(&self) -> &str {
        &self.api_key
    }
}
