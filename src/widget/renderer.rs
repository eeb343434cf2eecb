//! Conversation rendering.

use std::rc::Rc;

use super::message::{Message, Sender};
use super::surface::ChatSurface;

/// Appends labeled entries to the log view and keeps the newest one visible.
#[derive(Debug)]
pub struct ConversationRenderer<S> {
    surface: Rc<S>,
}

impl<S> Clone for ConversationRenderer<S> {
    fn clone(&self) -> Self {
        Self {
            surface: Rc::clone(&self.surface),
        }
    }
}

impl<S: ChatSurface> ConversationRenderer<S> {
    #[must_use]
    pub fn new(surface: Rc<S>) -> Self {
        Self { surface }
    }

    /// Append `text` as a new entry from `sender`, then scroll to the bottom.
    ///
    /// The text is handed to the surface verbatim; surfaces render it as
    /// plain content, never as markup.
    pub fn render(&self, sender: Sender, text: impl Into<String>) {
        let message = Message::new(sender, text);
        self.surface.append_entry(&message);
        self.surface.scroll_to_bottom();
    }
}
