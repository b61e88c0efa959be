//! What the diagram service sends to and gets back from a model.
//!
//! A request is one system prompt plus one user message; a reply is the
//! text the model wrote. Both provider clients reduce their wire formats to
//! these types, and [`LlmChat`] is the seam tests replace with a mock.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Failure anywhere between reading provider config and parsing a reply.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Unrecognized `LLM_PROVIDER` or `LLM_OPENAI_MODE`.
    #[error("invalid LLM config: {0}")]
    ConfigParse(String),

    /// `var` names the variable that was unset or blank.
    #[error("no API key: {var} is unset")]
    MissingApiKey { var: String },

    /// Transport failure: DNS, TLS, timeout, or a truncated body.
    #[error("LLM request failed: {0}")]
    ApiRequest(String),

    /// Any status other than 200. `body` keeps the provider's explanation.
    #[error("LLM provider returned status {status}")]
    ApiResponse { status: u16, body: String },

    /// A 200 whose body did not match the expected shape.
    #[error("unreadable LLM reply: {0}")]
    ApiParse(String),

    #[error("could not build HTTP client: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// CONTENT BLOCKS
// =============================================================================

/// One block of reply content. Only text reaches the diagram pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },

    /// Any other block type (thinking, tool use), ignored by downstream logic.
    #[serde(other)]
    Unknown,
}

// =============================================================================
// MESSAGE TYPES
// =============================================================================

/// A conversation turn; the service only ever sends one user turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".into(), content: content.into() }
    }
}

/// A completed reply plus the usage figures logged per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub content: Vec<ContentBlock>,
    pub model: String,
    pub stop_reason: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl ChatResponse {
    /// Concatenate every text block, in order.
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Unknown => None,
            })
            .collect()
    }
}

// =============================================================================
// LLM CHAT TRAIT
// =============================================================================

/// One completion round trip, independent of provider.
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// # Errors
    ///
    /// Any [`LlmError`] from transport, status or parsing.
    async fn chat(&self, max_tokens: u32, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
