//! OpenAI Chat Completions API driver.
//!
//! This module implements [`ReplyGenerator`] on top of the OpenAI Chat
//! Completions API (`/v1/chat/completions`), requesting one non-streaming
//! completion per reply.

use anyhow::Context;

use super::{ChatMessage, LlmSettings, ReplyGenerator};

/// Driver for the OpenAI Chat Completions API.
#[derive(Clone)]
pub struct ChatCompletionsDriver {
    http: reqwest::Client,
    settings: LlmSettings,
}

impl std::fmt::Debug for ChatCompletionsDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsDriver")
            .field("base_url", &self.settings.base_url)
            .field("model", &self.settings.model)
            .field("provider", &self.settings.provider)
            .finish_non_exhaustive()
    }
}

impl ChatCompletionsDriver {
    /// Create a new Chat Completions driver with the given settings.
    #[must_use]
    pub fn new(settings: LlmSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &LlmSettings {
        &self.settings
    }

    /// Request one completion for `messages` and return its trimmed text.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-success statuses and responses without
    /// `choices[0].message.content`.
    pub async fn complete(&self, messages: &[ChatMessage]) -> anyhow::Result<String> {
        let url = self.settings.provider.build_chat_url(&self.settings.base_url);

        let body = serde_json::json!({
            "model": self.settings.model,
            "messages": messages,
            "max_tokens": self.settings.max_tokens,
            "temperature": self.settings.temperature,
        });

        let mut rb = self.http.post(&url).json(&body);
        if let Some(k) = &self.settings.api_key {
            rb = if self.settings.provider.uses_api_key_header() {
                rb.header("api-key", k)
            } else {
                rb.bearer_auth(k)
            };
        }

        let v: serde_json::Value = rb.send().await?.error_for_status()?.json().await?;
        let content = v["choices"][0]["message"]["content"]
            .as_str()
            .context("completion carried no message content")?;

        Ok(content.trim().to_string())
    }
}

#[async_trait::async_trait]
impl ReplyGenerator for ChatCompletionsDriver {
    async fn reply(&self, message: &str) -> anyhow::Result<String> {
        let messages = [
            ChatMessage::system(&self.settings.system_prompt),
            ChatMessage::user(message),
        ];
        self.complete(&messages).await
    }
}
