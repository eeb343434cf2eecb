use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::{error, info};

use crate::config::{AppConfig, ServerConfig};
use crate::llm::ReplyGenerator;
use crate::page;
use crate::wire::{ErrorBody, REPLY_PATH, ReplyBody, ReplyRequest};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Produces the reply for `/get_response`.
    pub generator: Arc<dyn ReplyGenerator>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    #[must_use]
    pub fn new(generator: Arc<dyn ReplyGenerator>) -> Self {
        Self { generator }
    }
}

/// Build the router: the page, its static assets and the reply endpoint.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    // A disabled timeout becomes a very large one so the layer stack keeps one type.
    let timeout_duration = config
        .request_timeout()
        .unwrap_or(Duration::from_secs(365 * 24 * 60 * 60));

    Router::new()
        .route("/", get(index_handler))
        .route(REPLY_PATH, post(get_response))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(DefaultBodyLimit::max(config.body_limit()))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                match tokio::time::timeout(timeout_duration, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(
    config: Arc<AppConfig>,
    generator: Arc<dyn ReplyGenerator>,
) -> anyhow::Result<()> {
    let app = router(AppState::new(generator), &config.server);

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        static_dir = %config.server.static_dir,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - The chat page.
async fn index_handler() -> Html<String> {
    Html(page::index())
}

/// POST /get_response - Reply to one user message.
async fn get_response(
    State(state): State<AppState>,
    Json(req): Json<ReplyRequest>,
) -> Result<Json<ReplyBody>, (StatusCode, Json<ErrorBody>)> {
    info!(
        name: "reply.received",
        chars = req.message.chars().count(),
        "Received reply request"
    );

    if req.message.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "Message not provided.".to_string(),
            }),
        ));
    }

    match state.generator.reply(&req.message).await {
        Ok(response) => Ok(Json(ReplyBody { response })),
        Err(e) => {
            error!(name: "reply.provider_failed", error = %e, "Provider request failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: format!("{e:#}"),
                }),
            ))
        }
    }
}
