//! LLM provider access for the reply endpoint.
//!
//! The host server answers `/get_response` by asking an OpenAI-compatible
//! chat completions API. [`ReplyGenerator`] is the seam the router depends on;
//! [`ChatCompletionsDriver`] is the production implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use chat_widget::llm::{ChatCompletionsDriver, LlmSettings, ReplyGenerator};
//!
//! let settings = LlmSettings::new("https://api.openai.com", "gpt-3.5-turbo")
//!     .with_api_key("sk-...");
//! let driver = ChatCompletionsDriver::new(settings);
//! let reply = driver.reply("Hi").await?;
//! ```

pub mod chat_completions;
pub mod provider;

pub use chat_completions::ChatCompletionsDriver;
pub use provider::Provider;

/// System prompt used when none is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
/// Completion length cap used when none is configured.
pub const DEFAULT_MAX_TOKENS: u32 = 500;
/// Sampling temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// LLM connection and model settings.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// Base URL for the LLM API (e.g., `https://api.openai.com`).
    pub base_url: String,
    /// Optional API key for authentication.
    pub api_key: Option<String>,
    /// Model identifier (e.g., `gpt-3.5-turbo`).
    pub model: String,
    /// Provider type (auto-detected from `base_url`).
    pub provider: Provider,
    /// System message sent ahead of every user message.
    pub system_prompt: String,
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl LlmSettings {
    /// Settings for `model` at `base_url` with default prompt and sampling.
    #[must_use]
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            provider: Provider::detect_from_url(&base_url),
            base_url,
            api_key: None,
            model: model.into(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }
}

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System prompt.
    System,
    /// User message.
    User,
}

/// A message in a completion request.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ChatMessage {
    /// Role of the message author.
    pub role: MessageRole,
    /// Text content.
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Produces the assistant reply for one user message.
///
/// Each call is independent; no conversation state is kept between calls.
#[async_trait::async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Generate a reply to `message`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider request fails or its response carries
    /// no reply text.
    async fn reply(&self, message: &str) -> anyhow::Result<String>;
}
