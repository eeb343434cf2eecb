use crate::llm::{DEFAULT_MAX_TOKENS, DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE, LlmSettings, Provider};
use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Provider used when `LLM_BASE_URL` is unset.
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com";
/// Model used when `LLM_MODEL` is unset.
pub const DEFAULT_LLM_MODEL: &str = "gpt-3.5-turbo";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long, env = "BIND_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory served under /static (wasm-pack output goes in its pkg/)
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<String>,

    /// Disable timeout middleware
    #[arg(long, env = "TIMEOUT_DISABLED")]
    pub timeout_disabled: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    pub timeout_disabled: bool,
    pub request_timeout_secs: u32,
    pub body_limit_bytes: u32,
}

impl ServerConfig {
    /// `host:port` to bind.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Per-request timeout, or `None` when disabled.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        (!self.timeout_disabled).then(|| Duration::from_secs(u64::from(self.request_timeout_secs)))
    }

    /// Largest accepted request body.
    #[must_use]
    pub fn body_limit(&self) -> usize {
        self.body_limit_bytes as usize
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                static_dir: "static".to_string(),
                timeout_disabled: false,
                request_timeout_secs: 30,
                body_limit_bytes: 1024 * 1024,
            },
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let defaults = Self::default().server;
        let mut builder = Config::builder()
            .set_default("server.host", defaults.host)?
            .set_default("server.port", i64::from(defaults.port))?
            .set_default("server.static_dir", defaults.static_dir)?
            .set_default("server.timeout_disabled", defaults.timeout_disabled)?
            .set_default(
                "server.request_timeout_secs",
                i64::from(defaults.request_timeout_secs),
            )?
            .set_default("server.body_limit_bytes", i64::from(defaults.body_limit_bytes))?;

        // Explicit file must exist; ./config.{yaml,toml,json} is picked up if present.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path).required(true)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // E.g. CHAT_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("CHAT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Priority: CLI flag > CLI env var > CHAT_ env > config file > defaults.
        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(dir) = cli.static_dir {
            builder = builder.set_override("server.static_dir", dir)?;
        }
        if let Some(td) = cli.timeout_disabled {
            builder = builder.set_override("server.timeout_disabled", td)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}

/// Invalid provider settings in the environment.
#[derive(Debug, thiserror::Error)]
pub enum LlmConfigError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("{name} is not a valid number: {value}")]
    NotANumber { name: &'static str, value: String },
}

/// Read provider settings from `LLM_*` / `AZURE_*` env vars.
///
/// `LLM_API_KEY` falls back to `OPENAI_API_KEY`. Unset values take the
/// defaults; set-but-empty base URL or model is an error.
pub fn load_llm_settings() -> Result<LlmSettings, LlmConfigError> {
    let base_url = non_empty_var("LLM_BASE_URL", DEFAULT_LLM_BASE_URL)?;
    let model = non_empty_var("LLM_MODEL", DEFAULT_LLM_MODEL)?;

    let api_key = ["LLM_API_KEY", "OPENAI_API_KEY"]
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|s| !s.trim().is_empty());

    let system_prompt = env::var("LLM_SYSTEM_PROMPT")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

    let max_tokens = parse_var("LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS);
    let temperature = parse_var("LLM_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE);

    let mut provider = Provider::detect_from_url(&base_url);
    if let Provider::AzureOpenAI {
        deployment_name,
        api_version,
    } = &mut provider
    {
        if let Ok(deployment) = env::var("AZURE_DEPLOYMENT_NAME") {
            *deployment_name = deployment;
        }
        if let Ok(version) = env::var("AZURE_API_VERSION") {
            *api_version = version;
        }
    }

    Ok(LlmSettings {
        base_url,
        api_key,
        model,
        provider,
        system_prompt,
        max_tokens,
        temperature,
    })
}

fn non_empty_var(name: &'static str, default: &str) -> Result<String, LlmConfigError> {
    match env::var(name) {
        Ok(v) if v.trim().is_empty() => Err(LlmConfigError::Empty(name)),
        Ok(v) => Ok(v),
        Err(_) => Ok(default.to_string()),
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, LlmConfigError> {
    let Ok(value) = env::var(name) else {
        return Ok(None);
    };
    let parsed = value.trim().parse();
    match parsed {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(LlmConfigError::NotANumber { name, value }),
    }
}
