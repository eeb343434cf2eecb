#![cfg(not(target_arch = "wasm32"))]

//! Widget + HTTP reply client against a live host server.

use std::rc::Rc;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{Router, routing::post};
use chat_widget::config::AppConfig;
use chat_widget::llm::ReplyGenerator;
use chat_widget::server::{AppState, router};
use chat_widget::widget::{
    ChatSurface, ChatWidget, HttpReplyClient, MemorySurface, Message, ReplyClient, TriggerEvent,
};

#[derive(Debug)]
struct Canned(&'static str);

#[async_trait]
impl ReplyGenerator for Canned {
    async fn reply(&self, _message: &str) -> anyhow::Result<String> {
        Ok(self.0.to_string())
    }
}

#[derive(Debug)]
struct Broken;

#[async_trait]
impl ReplyGenerator for Broken {
    async fn reply(&self, _message: &str) -> anyhow::Result<String> {
        anyhow::bail!("quota exceeded")
    }
}

/// Serve `app` on an ephemeral port and return its base URL.
async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_host(generator: Arc<dyn ReplyGenerator>) -> String {
    let config = AppConfig::default();
    spawn(router(AppState::new(generator), &config.server)).await
}

fn widget_for(
    base_url: &str,
) -> (Rc<MemorySurface>, ChatWidget<MemorySurface, HttpReplyClient>) {
    let surface = Rc::new(MemorySurface::new());
    let client = Rc::new(HttpReplyClient::new(base_url).unwrap());
    (Rc::clone(&surface), ChatWidget::new(surface, client))
}

#[tokio::test]
async fn test_hi_hello_scenario() {
    let base = spawn_host(Arc::new(Canned("Hello!"))).await;
    let (surface, widget) = widget_for(&base);

    surface.type_text("Hi");
    let pending = widget.handle(&TriggerEvent::Activate).unwrap();
    assert_eq!(surface.log(), vec![Message::user("Hi")]);

    pending.await;

    assert_eq!(
        surface.log(),
        vec![Message::user("Hi"), Message::assistant("Hello!")]
    );
    assert_eq!(surface.input_value(), "");
    assert!(surface.is_scrolled_to_bottom());
}

#[tokio::test]
async fn test_provider_failure_renders_nothing() {
    let base = spawn_host(Arc::new(Broken)).await;
    let (surface, widget) = widget_for(&base);

    surface.type_text("Hi");
    widget.handle(&TriggerEvent::key("Enter")).unwrap().await;

    // the 500 body has no `response` field
    assert_eq!(surface.log(), vec![Message::user("Hi")]);
    assert_eq!(surface.input_value(), "");
}

#[tokio::test]
async fn test_non_json_reply_renders_nothing() {
    let app = Router::new().route("/get_response", post(|| async { "plain text" }));
    let base = spawn(app).await;
    let (surface, widget) = widget_for(&base);

    surface.type_text("Hi");
    widget.handle(&TriggerEvent::Activate).unwrap().await;

    assert_eq!(surface.log(), vec![Message::user("Hi")]);
}

#[tokio::test]
async fn test_status_is_not_inspected() {
    use axum::http::StatusCode;

    let app = Router::new().route(
        "/get_response",
        post(|| async {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                axum::Json(serde_json::json!({"response": "degraded but here"})),
            )
        }),
    );
    let base = spawn(app).await;
    let (surface, widget) = widget_for(&base);

    surface.type_text("Hi");
    widget.handle(&TriggerEvent::Activate).unwrap().await;

    assert_eq!(
        surface.log(),
        vec![Message::user("Hi"), Message::assistant("degraded but here")]
    );
}

#[tokio::test]
async fn test_unreachable_server_is_contained() {
    // bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (surface, widget) = widget_for(&format!("http://{addr}"));
    surface.type_text("anyone there?");
    widget.handle(&TriggerEvent::Activate).unwrap().await;

    assert_eq!(surface.log(), vec![Message::user("anyone there?")]);
}

#[tokio::test]
async fn test_client_sends_message_field() {
    let app = Router::new().route(
        "/get_response",
        post(
            |headers: axum::http::HeaderMap, axum::Json(body): axum::Json<serde_json::Value>| async move {
                let content_type = headers
                    .get(axum::http::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                axum::Json(serde_json::json!({
                    "response": format!("{content_type}|{}", body["message"].as_str().unwrap_or("?"))
                }))
            },
        ),
    );
    let base = spawn(app).await;

    let client = HttpReplyClient::new(&base).unwrap();
    let reply = client.send("ping").await.unwrap();
    assert_eq!(reply, "application/json|ping");
}
