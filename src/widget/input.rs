//! Send-trigger handling.

use std::rc::Rc;

use super::surface::ChatSurface;

/// Key that commits the input when pressed with the field focused.
pub const COMMIT_KEY: &str = "Enter";

/// An event that may start a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// The send control was activated (clicked or pressed).
    Activate,
    /// A key was pressed while the input had focus; carries `KeyboardEvent.key`.
    Key(String),
}

impl TriggerEvent {
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    /// Whether this event requests a send.
    #[must_use]
    pub fn is_send(&self) -> bool {
        match self {
            Self::Activate => true,
            Self::Key(key) => key == COMMIT_KEY,
        }
    }
}

/// Reads the input field when a send is requested.
#[derive(Debug)]
pub struct InputCapture<S> {
    surface: Rc<S>,
}

impl<S: ChatSurface> InputCapture<S> {
    #[must_use]
    pub fn new(surface: Rc<S>) -> Self {
        Self { surface }
    }

    /// Text to send for `event`, if any.
    ///
    /// Returns `None` for events that are not send requests and when the field
    /// is empty. The field is left untouched either way.
    pub fn capture(&self, event: &TriggerEvent) -> Option<String> {
        if !event.is_send() {
            return None;
        }
        let text = self.surface.input_value();
        (!text.is_empty()).then_some(text)
    }

    /// Empty the input field.
    pub fn clear(&self) {
        self.surface.clear_input();
    }
}
