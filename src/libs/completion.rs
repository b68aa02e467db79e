use crate::libs::config::CompletionConfig;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
enum CompletionError {
    #[error("Code {code}\n{body}")]
    Status { code: u16, body: String },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed completion response: {0}")]
    Malformed(String),
}

#[derive(Debug, Serialize)]
struct ChatTurn<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatTurn<'a>>,
}

/// Thin client for an OpenAI-style chat completion endpoint.
///
/// Every call yields a `String`: either the completion text or a readable
/// message starting with `Error:`. Nothing is propagated to the caller.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    config: CompletionConfig,
    client: reqwest::Client,
}

impl CompletionClient {
    pub fn new(config: CompletionConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(%err, "Falling back to a default HTTP client");
                reqwest::Client::new()
            });

        Self { config, client }
    }

    /// Asks for a completion of the configured default prompt.
    pub async fn get_message(&self) -> String {
        self.complete(&self.config.default_prompt).await
    }

    pub async fn complete(&self, prompt: &str) -> String {
        match self.try_complete(prompt).await {
            Ok(content) => content,
            Err(err) => {
                warn!(%err, "Chat completion failed");
                format!("Error: {err}")
            }
        }
    }

    async fn try_complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatTurn {
                    role: "system",
                    content: &self.config.system_prompt,
                },
                ChatTurn {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), "Chat completion response");

        if !status.is_success() {
            return Err(CompletionError::Status {
                code: status.as_u16(),
                body: text,
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| CompletionError::Malformed(e.to_string()))?;

        json["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CompletionError::Malformed("missing choices[0].message.content".to_string()))
    }
}
