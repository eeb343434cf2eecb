//! The chat widget controller.
//!
//! A [`ChatWidget`] ties together the three responsibilities of the widget:
//!
//! - [`InputCapture`]: turns a send trigger into the text to send
//! - [`ConversationRenderer`]: appends entries to the log view
//! - [`ReplyClient`]: fetches the reply for a sent message
//!
//! The controller is generic over its [`ChatSurface`] so it runs unchanged on
//! the browser DOM and on a [`MemorySurface`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use chat_widget::widget::{ChatWidget, HttpReplyClient, MemorySurface, TriggerEvent};
//!
//! let surface = Rc::new(MemorySurface::new());
//! let client = Rc::new(HttpReplyClient::new("http://127.0.0.1:3000")?);
//! let widget = ChatWidget::new(Rc::clone(&surface), client);
//!
//! surface.type_text("Hi");
//! if let Some(reply) = widget.handle(&TriggerEvent::Activate) {
//!     reply.await;
//! }
//! ```

mod client;
mod input;
mod message;
mod renderer;
mod surface;

pub use client::{HttpReplyClient, ReplyClient, decode_reply};
pub use input::{COMMIT_KEY, InputCapture, TriggerEvent};
pub use message::{Message, Sender};
pub use renderer::ConversationRenderer;
pub use surface::{ChatSurface, MemorySurface};

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use tracing::{debug, error};

/// Continuation of a send: resolves once the reply is rendered or dropped.
///
/// The host spawns it on its event loop. It never fails; reply errors are
/// logged inside.
pub type PendingReply = LocalBoxFuture<'static, ()>;

/// Interaction controller for one mounted widget.
#[derive(Debug)]
pub struct ChatWidget<S, C> {
    input: InputCapture<S>,
    renderer: ConversationRenderer<S>,
    client: Rc<C>,
}

impl<S, C> ChatWidget<S, C>
where
    S: ChatSurface + 'static,
    C: ReplyClient + 'static,
{
    #[must_use]
    pub fn new(surface: Rc<S>, client: Rc<C>) -> Self {
        Self {
            input: InputCapture::new(Rc::clone(&surface)),
            renderer: ConversationRenderer::new(surface),
            client,
        }
    }

    /// React to a trigger event.
    ///
    /// For a send request with a non-empty input, the user message is rendered
    /// and the field cleared before this returns; the returned future issues
    /// the request and renders the reply. Every other event is a no-op and
    /// yields `None`.
    ///
    /// Overlapping sends are independent: replies render in the order they
    /// complete.
    pub fn handle(&self, event: &TriggerEvent) -> Option<PendingReply> {
        let text = self.input.capture(event)?;
        self.renderer.render(Sender::User, text.clone());
        self.input.clear();
        Some(self.request_reply(text))
    }

    fn request_reply(&self, text: String) -> PendingReply {
        let client = Rc::clone(&self.client);
        let renderer = self.renderer.clone();

        Box::pin(async move {
            debug!(name: "reply.requested", chars = text.chars().count(), "Requesting reply");
            match client.send(&text).await {
                Ok(reply) => renderer.render(Sender::Assistant, reply),
                Err(e) => error!(name: "reply.failed", error = %e, "Error: reply request failed"),
            }
        })
    }
}
