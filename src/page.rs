//! HTML page hosting the widget.
//!
//! The page carries the three elements the widget mounts on (`user-input`,
//! `send-button`, `chat-log`) and boots the wasm bundle that wasm-pack writes
//! to `static/pkg/`.

/// Id of the text input.
pub const INPUT_ID: &str = "user-input";
/// Id of the send control.
pub const SEND_BUTTON_ID: &str = "send-button";
/// Id of the scrollable log container.
pub const CHAT_LOG_ID: &str = "chat-log";

/// Module specifier of the wasm-pack JS glue, relative to the site root.
pub const WIDGET_MODULE: &str = "/static/pkg/chat_widget.js";

/// Generate the HTML shell for the application.
fn html_shell(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Chat widget">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/app.css">
</head>
<body>
    <main id="app">
        {content}
    </main>
    <script type="module">
        import init from '{WIDGET_MODULE}';
        init();
    </script>
</body>
</html>"#
    )
}

/// The chat page.
#[must_use]
pub fn index() -> String {
    let content = format!(
        r#"<div id="chat-container">
            <div id="{CHAT_LOG_ID}" class="chat-log" aria-live="polite" aria-label="Chat messages"></div>
            <div class="chat-input">
                <input type="text" id="{INPUT_ID}" placeholder="Type your message..." autocomplete="off">
                <button type="button" id="{SEND_BUTTON_ID}">Send</button>
            </div>
        </div>"#
    );
    html_shell("Chat", &content)
}
