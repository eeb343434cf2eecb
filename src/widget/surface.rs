//! The DOM collaborators the widget drives.
//!
//! [`ChatSurface`] abstracts the three page elements the widget is mounted on:
//! the text input, the send control and the scrollable log. The browser
//! implementation lives in `crate::dom`; [`MemorySurface`] keeps everything in
//! memory for headless use and tests.

use std::cell::{Cell, RefCell};

use super::message::Message;

/// Operations the widget needs from its rendering surface.
///
/// Methods take `&self`: a surface is a handle onto shared, externally owned
/// state (the live DOM), mutated from a single event-loop thread.
pub trait ChatSurface {
    /// Current value of the input field.
    fn input_value(&self) -> String;

    /// Reset the input field to the empty string.
    fn clear_input(&self);

    /// Append one entry to the end of the log view.
    fn append_entry(&self, message: &Message);

    /// Drive the log view's scroll offset to its maximum.
    fn scroll_to_bottom(&self);
}

/// In-memory surface.
///
/// The log is append-only. `scroll_top` mirrors the browser's `scrollTop`,
/// measured in entries: after [`ChatSurface::scroll_to_bottom`] it equals the
/// number of entries, so the newest one is in view.
#[derive(Debug, Default)]
pub struct MemorySurface {
    input: RefCell<String>,
    log: RefCell<Vec<Message>>,
    scroll_top: Cell<usize>,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the user typing `text` into the input field.
    pub fn type_text(&self, text: impl Into<String>) {
        *self.input.borrow_mut() = text.into();
    }

    /// Snapshot of the rendered log.
    #[must_use]
    pub fn log(&self) -> Vec<Message> {
        self.log.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    #[must_use]
    pub fn scroll_top(&self) -> usize {
        self.scroll_top.get()
    }

    /// Whether the newest entry is within view.
    #[must_use]
    pub fn is_scrolled_to_bottom(&self) -> bool {
        self.scroll_top.get() == self.len()
    }
}

impl ChatSurface for MemorySurface {
    fn input_value(&self) -> String {
        self.input.borrow().clone()
    }

    fn clear_input(&self) {
        self.input.borrow_mut().clear();
    }

    fn append_entry(&self, message: &Message) {
        self.log.borrow_mut().push(message.clone());
    }

    fn scroll_to_bottom(&self) {
        self.scroll_top.set(self.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_surface_input() {
        let surface = MemorySurface::new();
        surface.type_text("hello");
        assert_eq!(surface.input_value(), "hello");
        surface.clear_input();
        assert_eq!(surface.input_value(), "");
    }

    #[test]
    fn test_memory_surface_appends_in_order() {
        let surface = MemorySurface::new();
        surface.append_entry(&Message::user("a"));
        surface.append_entry(&Message::assistant("b"));
        assert_eq!(surface.log(), vec![Message::user("a"), Message::assistant("b")]);
        assert!(!surface.is_scrolled_to_bottom());
        surface.scroll_to_bottom();
        assert!(surface.is_scrolled_to_bottom());
    }
}
