//! Reply round trip against the host server.

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::wire::{REPLY_PATH, ReplyBody, ReplyRequest};

/// Sends captured text and resolves to the reply text.
///
/// Single-shot: implementations neither retry nor cancel. The returned future
/// is not required to be `Send`, since the browser fetch API is
/// single-threaded.
#[async_trait(?Send)]
pub trait ReplyClient {
    /// Send `text` and wait for the reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    async fn send(&self, text: &str) -> Result<String>;
}

/// [`ReplyClient`] posting to `{base}/get_response` over HTTP.
///
/// # Example
///
/// ```rust,no_run
/// use chat_widget::widget::{HttpReplyClient, ReplyClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpReplyClient::new("http://127.0.0.1:3000")?;
/// let reply = client.send("Hi").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpReplyClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpReplyClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let endpoint = Url::parse(base_url.as_ref())?.join(REPLY_PATH)?;
        Ok(Self { endpoint, http })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl ReplyClient for HttpReplyClient {
    async fn send(&self, text: &str) -> Result<String> {
        let request = ReplyRequest {
            message: text.to_string(),
        };

        // `json` sets `Content-Type: application/json`.
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        // Status is not inspected; only the body shape decides.
        let raw = response.text().await?;
        decode_reply(&raw)
    }
}

/// Decode a reply body into the assistant text.
///
/// # Errors
///
/// Fails with [`crate::error::WidgetError::Parse`] when `raw` is not JSON or
/// has no string `response` field.
pub fn decode_reply(raw: &str) -> Result<String> {
    let body: ReplyBody = serde_json::from_str(raw)?;
    Ok(body.response)
}
