use crate::core::prompt::build_prompt;
use crate::domain::model::Spread;
use crate::domain::ports::{InterpretationClient, RemoteCallOutcome, RemoteSettings};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat-completions client making exactly one call per interpretation.
pub struct MistralClient<C: RemoteSettings> {
    config: C,
    client: Client,
}

impl<C: RemoteSettings> MistralClient<C> {
    pub fn new(config: C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self { config, client })
    }

    fn request_body(&self, spread: &Spread) -> ChatCompletionRequest<'_> {
        ChatCompletionRequest {
            model: self.config.model(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(spread),
            }],
            temperature: self.config.temperature(),
            max_tokens: self.config.max_tokens(),
        }
    }
}

#[async_trait]
impl<C: RemoteSettings> InterpretationClient for MistralClient<C> {
    async fn request_interpretation(&self, spread: &Spread) -> RemoteCallOutcome {
        let Some(api_key) = self.config.api_key() else {
            return RemoteCallOutcome::TransportFailure {
                status: None,
                detail: "no API key configured".to_string(),
            };
        };

        let body = self.request_body(spread);
        tracing::debug!(
            "Sending interpretation request to {} (model {})",
            self.config.endpoint(),
            body.model
        );

        let response = match self
            .client
            .post(self.config.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return RemoteCallOutcome::TransportFailure {
                    status: e.status().map(|s| s.as_u16()),
                    detail: e.to_string(),
                }
            }
        };

        let status = response.status();
        tracing::debug!("Remote response status: {}", status);

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                return RemoteCallOutcome::TransportFailure {
                    status: Some(status.as_u16()),
                    detail: format!("failed to read response body: {}", e),
                }
            }
        };

        if !status.is_success() {
            return RemoteCallOutcome::TransportFailure {
                status: Some(status.as_u16()),
                detail: text,
            };
        }

        extract_content(&text)
    }
}

/// Pulls `choices[0].message.content` out of a chat-completions body.
pub fn extract_content(body: &str) -> RemoteCallOutcome {
    let json: serde_json::Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(e) => return RemoteCallOutcome::MalformedPayload(format!("body is not JSON: {}", e)),
    };

    match json
        .pointer("/choices/0/message/content")
        .and_then(|content| content.as_str())
    {
        Some(content) => RemoteCallOutcome::Success(content.to_string()),
        None => RemoteCallOutcome::MalformedPayload(
            "missing choices[0].message.content".to_string(),
        ),
    }
}
