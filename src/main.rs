//! Chat widget host server
//!
//! Serves the widget page and answers `POST /get_response`.

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::map_err_ignore)]

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use chat_widget::config::{AppConfig, load_llm_settings};
use chat_widget::llm::ChatCompletionsDriver;
use chat_widget::server::start_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present) first so RUST_LOG and LOG_FORMAT can come from it
    let _ = dotenv();

    // Initialize tracing (M-LOG-STRUCTURED); LOG_FORMAT=json for machine-readable lines
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer().with_target(true)))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::load() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let settings = match load_llm_settings() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    info!(
        name: "llm.config.loaded",
        base_url = %settings.base_url,
        model = %settings.model,
        api_key_set = settings.api_key.is_some(),
        "LLM configuration loaded"
    );

    let generator = Arc::new(ChatCompletionsDriver::new(settings));
    start_server(config, generator).await
}
