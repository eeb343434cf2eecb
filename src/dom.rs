//! Browser binding of the widget (`wasm32` only).
//!
//! [`DomSurface`] implements [`ChatSurface`] over the page's input and log
//! elements; [`mount`] wires the send control and the input's key events to a
//! [`ChatWidget`]. Logging goes to the developer console.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use tracing::{Level, Metadata, warn};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlInputElement, KeyboardEvent};

use crate::page::{CHAT_LOG_ID, INPUT_ID, SEND_BUTTON_ID};
use crate::widget::{ChatSurface, ChatWidget, HttpReplyClient, Message, ReplyClient, TriggerEvent};

/// Reasons a widget cannot be mounted.
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("no window or document available")]
    NoDocument,

    #[error("element #{0} not found")]
    MissingElement(String),

    #[error("element #{0} is not an <input>")]
    NotAnInput(String),

    #[error("cannot resolve reply endpoint: {0}")]
    Endpoint(String),

    #[error("cannot attach event listener: {0}")]
    Listener(String),
}

impl From<MountError> for JsValue {
    fn from(e: MountError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// [`ChatSurface`] over live DOM elements.
#[derive(Debug)]
pub struct DomSurface {
    document: Document,
    input: HtmlInputElement,
    log: Element,
}

impl DomSurface {
    pub fn new(document: Document, input: HtmlInputElement, log: Element) -> Self {
        Self {
            document,
            input,
            log,
        }
    }

    fn entry(&self, message: &Message) -> Result<Element, JsValue> {
        let wrapper = self.document.create_element("div")?;
        wrapper.set_class_name(&format!("message {}", message.sender.as_class()));

        let content = self.document.create_element("div")?;
        content.set_class_name("message-content");
        // text content, never markup
        content.set_text_content(Some(&message.text));

        wrapper.append_child(&content)?;
        Ok(wrapper)
    }
}

impl ChatSurface for DomSurface {
    fn input_value(&self) -> String {
        self.input.value()
    }

    fn clear_input(&self) {
        self.input.set_value("");
    }

    fn append_entry(&self, message: &Message) {
        let appended = self
            .entry(message)
            .and_then(|entry| self.log.append_child(&entry));
        if let Err(e) = appended {
            warn!(name: "dom.append_failed", error = ?e, "Could not append log entry");
        }
    }

    fn scroll_to_bottom(&self) {
        self.log.set_scroll_top(self.log.scroll_height());
    }
}

/// A mounted widget. Dropping it detaches its event listeners.
///
/// The listener closures hold the widget, so it lives exactly as long as the
/// handle.
#[wasm_bindgen]
pub struct ChatWidgetHandle {
    send_button: Element,
    input: HtmlInputElement,
    on_click: Closure<dyn FnMut(Event)>,
    on_keypress: Closure<dyn FnMut(KeyboardEvent)>,
}

impl std::fmt::Debug for ChatWidgetHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatWidgetHandle")
            .field("input", &self.input.id())
            .field("send_button", &self.send_button.id())
            .finish_non_exhaustive()
    }
}

impl ChatWidgetHandle {
    fn listen(&self) -> Result<(), MountError> {
        self.send_button
            .add_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref())
            .map_err(|e| MountError::Listener(format!("{e:?}")))?;
        self.input
            .add_event_listener_with_callback("keypress", self.on_keypress.as_ref().unchecked_ref())
            .map_err(|e| MountError::Listener(format!("{e:?}")))
    }
}

impl Drop for ChatWidgetHandle {
    // Removing a listener that was never added is a no-op.
    fn drop(&mut self) {
        let _ = self
            .send_button
            .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref());
        let _ = self.input.remove_event_listener_with_callback(
            "keypress",
            self.on_keypress.as_ref().unchecked_ref(),
        );
    }
}

/// Mount a widget on the elements with the given ids.
///
/// Replies are requested from `{location.origin}/get_response`.
#[wasm_bindgen]
pub fn mount(
    input_id: &str,
    send_button_id: &str,
    chat_log_id: &str,
) -> Result<ChatWidgetHandle, JsValue> {
    Ok(try_mount(input_id, send_button_id, chat_log_id)?)
}

fn try_mount(
    input_id: &str,
    send_button_id: &str,
    chat_log_id: &str,
) -> Result<ChatWidgetHandle, MountError> {
    let window = web_sys::window().ok_or(MountError::NoDocument)?;
    let document = window.document().ok_or(MountError::NoDocument)?;

    let find = |id: &str| {
        document
            .get_element_by_id(id)
            .ok_or_else(|| MountError::MissingElement(id.to_string()))
    };
    let input = find(input_id)?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| MountError::NotAnInput(input_id.to_string()))?;
    let send_button = find(send_button_id)?;
    let log = find(chat_log_id)?;

    let origin = window
        .location()
        .origin()
        .map_err(|e| MountError::Endpoint(format!("{e:?}")))?;
    let client = HttpReplyClient::new(&origin).map_err(|e| MountError::Endpoint(e.to_string()))?;

    attach(document, input, send_button, log, Rc::new(client))
}

/// Wire a widget over `client` to the given elements.
fn attach<C>(
    document: Document,
    input: HtmlInputElement,
    send_button: Element,
    log: Element,
    client: Rc<C>,
) -> Result<ChatWidgetHandle, MountError>
where
    C: ReplyClient + 'static,
{
    let surface = Rc::new(DomSurface::new(document, input.clone(), log));
    let widget = Rc::new(ChatWidget::new(surface, client));

    let w = Rc::clone(&widget);
    let on_click = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        dispatch(&w, &TriggerEvent::Activate);
    });
    let on_keypress = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        dispatch(&widget, &TriggerEvent::Key(event.key()));
    });

    let handle = ChatWidgetHandle {
        send_button,
        input,
        on_click,
        on_keypress,
    };
    // On failure the handle is dropped here, detaching whatever was attached.
    handle.listen()?;
    Ok(handle)
}

fn dispatch<C: ReplyClient + 'static>(widget: &ChatWidget<DomSurface, C>, event: &TriggerEvent) {
    if let Some(pending) = widget.handle(event) {
        spawn_local(pending);
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<ChatWidgetHandle>> = const { RefCell::new(None) };
}

/// Entry point run when the wasm module is instantiated: mounts the widget on
/// the default page elements for the lifetime of the page.
#[cfg_attr(not(test), wasm_bindgen(start))]
pub fn start() -> Result<(), JsValue> {
    install_console_logging();
    let handle = try_mount(INPUT_ID, SEND_BUTTON_ID, CHAT_LOG_ID)?;
    MOUNTED.with(|mounted| *mounted.borrow_mut() = Some(handle));
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Console logging
// ─────────────────────────────────────────────────────────────────────────────

/// Route `tracing` output to the browser console.
pub fn install_console_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(Level::DEBUG)
        .without_time()
        .with_ansi(false)
        .try_init();
}

#[derive(Debug, Clone, Copy)]
struct ConsoleMakeWriter;

/// Buffers one formatted event and emits it on drop.
#[derive(Debug)]
struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = JsValue::from_str(line.trim_end());
        match self.level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}
