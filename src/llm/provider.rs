//! Where chat completions are requested and how the key is presented.
//!
//! Two API shapes exist in practice: the OpenAI one (`/v1/chat/completions`,
//! bearer token), served by OpenAI and every compatible host, and Azure
//! OpenAI, which routes through a named deployment and wants an `api-key`
//! header.

use url::Url;

/// Azure API version used when `AZURE_API_VERSION` is unset.
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-08-01-preview";

/// Completions API shape of a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    /// OpenAI or any host speaking its API.
    OpenAICompatible,
    /// Azure OpenAI Service.
    AzureOpenAI {
        /// Deployment that serves the model.
        deployment_name: String,
        /// Value of the `api-version` query parameter.
        api_version: String,
    },
}

impl Provider {
    /// Azure deployment with the default API version.
    #[must_use]
    pub fn azure(deployment_name: impl Into<String>) -> Self {
        Self::AzureOpenAI {
            deployment_name: deployment_name.into(),
            api_version: DEFAULT_AZURE_API_VERSION.to_string(),
        }
    }

    /// Pick the API shape from the base URL's host.
    ///
    /// Azure is recognised by an `*.azure.com` host; the deployment name is
    /// left empty for the caller to fill in. Anything else, including an
    /// unparsable URL, is treated as OpenAI-compatible.
    #[must_use]
    pub fn detect_from_url(base_url: &str) -> Self {
        let is_azure = Url::parse(base_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
            .is_some_and(|host| host == "azure.com" || host.ends_with(".azure.com"));

        if is_azure {
            Self::azure("")
        } else {
            Self::OpenAICompatible
        }
    }

    /// Whether the key goes in an `api-key` header rather than as a bearer
    /// token.
    #[must_use]
    pub fn uses_api_key_header(&self) -> bool {
        matches!(self, Self::AzureOpenAI { .. })
    }

    /// Chat completions URL under `base_url` (trailing slash ignored).
    #[must_use]
    pub fn build_chat_url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            Self::OpenAICompatible => format!("{base}/v1/chat/completions"),
            Self::AzureOpenAI {
                deployment_name,
                api_version,
            } => format!(
                "{base}/openai/deployments/{deployment_name}/chat/completions?api-version={api_version}"
            ),
        }
    }
}
