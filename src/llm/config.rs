//! Provider selection for the diagram service.
//!
//! Every setting comes from a key lookup: the process environment in
//! production, a map in tests. Only the API key is mandatory. It is named
//! indirectly, so `LLM_API_KEY_ENV=OPENAI_API_KEY` reads the key from
//! `OPENAI_API_KEY`.

use std::str::FromStr;

use super::types::LlmError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProviderKind {
    Anthropic,
    OpenAi,
}

impl LlmProviderKind {
    /// Model used when `LLM_MODEL` is unset.
    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            Self::Anthropic => "claude-sonnet-4-5-20250929",
            Self::OpenAi => "gpt-4o",
        }
    }
}

impl FromStr for LlmProviderKind {
    type Err = LlmError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            _ => Err(LlmError::ConfigParse(format!("unknown LLM_PROVIDER: {raw}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiApiMode {
    ChatCompletions,
    Responses,
}

impl FromStr for OpenAiApiMode {
    type Err = LlmError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "responses" => Ok(Self::Responses),
            "chat_completions" => Ok(Self::ChatCompletions),
            _ => Err(LlmError::ConfigParse(format!(
                "unsupported openai_api mode '{raw}', use responses or chat_completions"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for LlmTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,
    pub api_key: String,
    pub model: String,
    pub openai_mode: OpenAiApiMode,
    pub openai_base_url: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Resolve the provider from the process environment.
    ///
    /// | Variable | Meaning | Default |
    /// |----------|---------|---------|
    /// | `LLM_API_KEY_ENV` | name of the variable that holds the key | required |
    /// | `LLM_PROVIDER` | `anthropic` or `openai` | `anthropic` |
    /// | `LLM_MODEL` | model identifier | [`LlmProviderKind::default_model`] |
    /// | `LLM_OPENAI_MODE` | `responses` or `chat_completions` | `responses` |
    /// | `LLM_OPENAI_BASE_URL` | `OpenAI`-compatible endpoint | [`DEFAULT_OPENAI_BASE_URL`] |
    /// | `LLM_REQUEST_TIMEOUT_SECS` | whole-request timeout | 120 |
    /// | `LLM_CONNECT_TIMEOUT_SECS` | connect timeout | 10 |
    ///
    /// # Errors
    ///
    /// [`LlmError::MissingApiKey`] names whichever variable was missing.
    /// [`LlmError::ConfigParse`] covers an unrecognized provider or mode.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(env_opt)
    }

    /// # Errors
    ///
    /// Same as [`LlmConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LlmError> {
        let provider: LlmProviderKind = lookup("LLM_PROVIDER").as_deref().unwrap_or("anthropic").parse()?;
        let api_key = resolve_api_key(&lookup)?;
        let openai_mode: OpenAiApiMode = lookup("LLM_OPENAI_MODE").as_deref().unwrap_or("responses").parse()?;

        let mut openai_base_url = lookup("LLM_OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into());
        openai_base_url.truncate(openai_base_url.trim_end_matches('/').len());

        Ok(Self {
            provider,
            api_key,
            model: lookup("LLM_MODEL").unwrap_or_else(|| provider.default_model().into()),
            openai_mode,
            openai_base_url,
            timeouts: LlmTimeouts {
                request_secs: parse_or(lookup("LLM_REQUEST_TIMEOUT_SECS"), DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
                connect_secs: parse_or(lookup("LLM_CONNECT_TIMEOUT_SECS"), DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
            },
        })
    }
}

/// Follow the `LLM_API_KEY_ENV` pointer to the key itself.
fn resolve_api_key(lookup: &impl Fn(&str) -> Option<String>) -> Result<String, LlmError> {
    let pointer = "LLM_API_KEY_ENV";
    let var = lookup(pointer).ok_or_else(|| LlmError::MissingApiKey { var: pointer.into() })?;
    lookup(&var).ok_or(LlmError::MissingApiKey { var })
}

/// Read an env var, treating unset and blank as absent.
pub(crate) fn env_opt(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

/// Parse a raw value, falling back to `default` when absent or malformed.
pub(crate) fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    match raw.map(|v| v.trim().parse::<T>()) {
        Some(Ok(value)) => value,
        _ => default,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
