//! Anthropic backend for single-turn diagram requests.
//!
//! Sends one `/v1/messages` call per diagram. The reply is reduced to its
//! text blocks by `parse_response`, which is pure so tests can feed it
//! recorded bodies.

use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{ChatResponse, ContentBlock, LlmError, Message};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

// =============================================================================
// CLIENT
// =============================================================================

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
}

impl AnthropicClient {
    /// # Errors
    ///
    /// [`LlmError::HttpClientBuild`] when the TLS backend cannot start.
    pub fn new(api_key: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map(|http| Self { http, api_key })
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))
    }

    /// # Errors
    ///
    /// [`LlmError::ApiRequest`] for transport failures,
    /// [`LlmError::ApiResponse`] for a status other than 200, and
    /// [`LlmError::ApiParse`] for a body that is not a Messages reply.
    pub async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        tracing::debug!(model, max_tokens, system_len = system.len(), "anthropic: request");
        let (status, body) = self.post(&MessagesRequest { model, max_tokens, system, messages }).await?;
        if status != 200 {
            tracing::warn!(status, "anthropic: request rejected");
            return Err(LlmError::ApiResponse { status, body });
        }
        parse_response(&body)
    }

    /// Status code and raw body of one POST.
    async fn post(&self, request: &MessagesRequest<'_>) -> Result<(u16, String), LlmError> {
        let transport = |e: reqwest::Error| LlmError::ApiRequest(e.to_string());
        let response = self
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;
        Ok((status, body))
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [Message],
}

#[derive(serde::Deserialize)]
struct MessagesReply {
    content: Vec<ContentBlock>,
    model: String,
    #[serde(default)]
    stop_reason: Option<String>,
    usage: ReplyUsage,
}

#[derive(serde::Deserialize)]
struct ReplyUsage {
    input_tokens: u64,
    output_tokens: u64,
}

// =============================================================================
// PARSING
// =============================================================================

/// Decode a Messages reply, keeping only its text blocks.
fn parse_response(json: &str) -> Result<ChatResponse, LlmError> {
    let reply: MessagesReply = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let mut content = reply.content;
    content.retain(|block| matches!(block, ContentBlock::Text { .. }));

    Ok(ChatResponse {
        content,
        model: reply.model,
        stop_reason: reply.stop_reason.unwrap_or_default(),
        input_tokens: reply.usage.input_tokens,
        output_tokens: reply.usage.output_tokens,
    })
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
