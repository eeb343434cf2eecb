//! Conversation entries.

/// Who authored a rendered entry.
///
/// The role only selects styling; nothing in the widget branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    /// Text typed into the input field.
    User,
    /// Reply text returned by the server.
    Assistant,
}

impl Sender {
    /// CSS class carried by the rendered entry.
    #[must_use]
    pub fn as_class(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single entry of the conversation log.
///
/// Messages are never edited after they are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Author role.
    pub sender: Sender,
    /// Literal text, rendered as plain content.
    pub text: String,
}

impl Message {
    #[must_use]
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }
}
