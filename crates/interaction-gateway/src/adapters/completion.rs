//! Chat-completions client.
//!
//! Sends the query as the user message after a fixed system prompt and
//! returns the first choice's content. Works against any endpoint that speaks
//! the OpenAI chat-completions format.

use crate::domain::config::CompletionConfig;
use crate::domain::error::GatewayError;
use crate::ports::outbound::{CompletionError, ReplyGenerator};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// [`ReplyGenerator`] backed by a chat-completions endpoint
pub struct ChatCompletionClient {
    client: Client,
    config: CompletionConfig,
}

impl ChatCompletionClient {
    /// Build a client whose every request is bounded by `config.timeout`.
    pub fn new(config: CompletionConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Completion(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn request_body<'a>(&'a self, query: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.config.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: query,
                },
            ],
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

fn transport_error(e: reqwest::Error) -> CompletionError {
    if e.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Transport(e.to_string())
    }
}

#[async_trait]
impl ReplyGenerator for ChatCompletionClient {
    async fn generate_reply(&self, query: &str) -> Result<String, CompletionError> {
        let start = Instant::now();

        debug!(model = %self.config.model, "Sending chat completion request");

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(query))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Status(status.as_u16()));
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                CompletionError::Timeout
            } else {
                CompletionError::Decode(e.to_string())
            }
        })?;

        let reply = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(CompletionError::EmptyReply)?;

        debug!(
            latency_ms = start.elapsed().as_millis() as u64,
            reply_len = reply.len(),
            "Chat completion received"
        );

        Ok(reply)
    }

    fn name(&self) -> &'static str {
        "chat-completion"
    }
}
