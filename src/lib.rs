//! Chat widget
//!
//! A browser chat widget written in Rust and compiled to WebAssembly, plus an
//! Axum host that serves its page and answers its reply requests.
//!
//! # Architecture
//!
//! - **Widget**: platform-independent controller (input capture, conversation
//!   rendering, reply round trip) over a [`widget::ChatSurface`]
//! - **DOM binding**: `wasm32` surface and event wiring (`dom`)
//! - **Server**: Axum host serving the page, static assets and `POST /get_response`
//! - **LLM**: OpenAI-compatible chat completions behind the reply endpoint
//!
//! # Modules
//!
//! - [`widget`]: the controller and its collaborators
//! - [`wire`]: JSON bodies of the reply contract
//! - [`error`]: widget error types
//! - [`page`]: the HTML page carrying the widget's elements
//! - `config`, `llm`, `server`: host side (not built for `wasm32`)

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::unused_async)]

pub mod error;
pub mod page;
pub mod widget;
pub mod wire;

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod llm;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;

#[cfg(target_arch = "wasm32")]
pub mod dom;
