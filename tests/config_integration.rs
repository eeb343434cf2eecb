#![cfg(not(target_arch = "wasm32"))]

use chat_widget::config::{AppConfig, LlmConfigError, load_llm_settings};
use chat_widget::llm::Provider;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;

const ARGS: [&str; 1] = ["chat-widget"];

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        for name in [
            "CHAT_SERVER__PORT",
            "CHAT_SERVER__HOST",
            "CONFIG_FILE",
            "BIND_HOST",
            "PORT",
            "STATIC_DIR",
            "TIMEOUT_DISABLED",
            "LLM_BASE_URL",
            "LLM_MODEL",
            "LLM_API_KEY",
            "OPENAI_API_KEY",
            "LLM_SYSTEM_PROMPT",
            "LLM_MAX_TOKENS",
            "LLM_TEMPERATURE",
            "AZURE_DEPLOYMENT_NAME",
            "AZURE_API_VERSION",
        ] {
            env::remove_var(name);
        }
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args(ARGS).expect("defaults should load");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.static_dir, "static");
    assert_eq!(
        config.server.request_timeout(),
        Some(std::time::Duration::from_secs(30))
    );
    assert_eq!(config.server.body_limit(), 1024 * 1024);
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("CHAT_SERVER__PORT", "9090");
    }

    let config = AppConfig::load_from_args(ARGS).expect("Failed to load config");
    assert_eq!(config.server.port, 9090);

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_flag_beats_env() {
    clear_env_vars();
    unsafe {
        env::set_var("CHAT_SERVER__PORT", "9090");
    }

    let config = AppConfig::load_from_args(["chat-widget", "--port", "4040", "--timeout-disabled", "true"])
        .expect("Failed to load config");
    assert_eq!(config.server.port, 4040);
    assert_eq!(config.server.request_timeout(), None);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("Failed to create temp config");
    writeln!(file, "server:\n  port: 7070\n  static_dir: assets").unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let config = AppConfig::load_from_args(["chat-widget", "--config", &path])
        .expect("Failed to load config from file");
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.server.static_dir, "assets");
    // untouched keys keep their defaults
    assert_eq!(config.server.host, "127.0.0.1");

    clear_env_vars();
}

#[test]
#[serial]
fn test_env_beats_file() {
    clear_env_vars();

    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("Failed to create temp config");
    writeln!(file, "server:\n  port: 7070\n  host: 0.0.0.0").unwrap();
    unsafe {
        env::set_var("CHAT_SERVER__PORT", "9191");
    }

    let path = file.path().to_str().unwrap().to_string();
    let config = AppConfig::load_from_args(["chat-widget", "--config", &path])
        .expect("Failed to load config");
    assert_eq!(config.server.port, 9191);
    // keys the env leaves alone still come from the file
    assert_eq!(config.server.host, "0.0.0.0");

    clear_env_vars();
}

#[test]
#[serial]
fn test_missing_explicit_file_is_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args(["chat-widget", "--config", "does-not-exist.yaml"]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_cwd_config_fallback() {
    clear_env_vars();

    let cwd_path = "config.yaml";
    fs::write(cwd_path, "server:\n  port: 6060\n").expect("Failed to write ./config.yaml");

    let config = AppConfig::load_from_args(ARGS);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        assert_eq!(config.expect("Failed to load config").server.port, 6060);
    }));

    fs::remove_file(cwd_path).unwrap();

    if let Err(e) = result {
        std::panic::resume_unwind(e);
    }
}

#[test]
#[serial]
fn test_llm_settings_defaults() {
    clear_env_vars();

    let settings = load_llm_settings().expect("defaults should load");
    assert_eq!(settings.base_url, "https://api.openai.com");
    assert_eq!(settings.model, "gpt-3.5-turbo");
    assert_eq!(settings.provider, Provider::OpenAICompatible);
    assert!(settings.api_key.is_none());
    assert_eq!(settings.max_tokens, 500);
}

#[test]
#[serial]
fn test_llm_settings_from_env() {
    clear_env_vars();
    unsafe {
        env::set_var("LLM_BASE_URL", "https://api.groq.com/openai");
        env::set_var("LLM_MODEL", "llama-3.1-8b");
        env::set_var("OPENAI_API_KEY", "sk-fallback");
        env::set_var("LLM_SYSTEM_PROMPT", "Answer in one sentence.");
        env::set_var("LLM_TEMPERATURE", "0.2");
    }

    let settings = load_llm_settings().expect("settings should load");
    assert_eq!(settings.provider, Provider::OpenAICompatible);
    assert_eq!(settings.model, "llama-3.1-8b");
    assert_eq!(settings.api_key.as_deref(), Some("sk-fallback"));
    assert_eq!(settings.system_prompt, "Answer in one sentence.");
    assert!((settings.temperature - 0.2).abs() < f32::EPSILON);

    unsafe {
        env::set_var("LLM_API_KEY", "sk-primary");
    }
    let settings = load_llm_settings().unwrap();
    assert_eq!(settings.api_key.as_deref(), Some("sk-primary"));

    clear_env_vars();
}

#[test]
#[serial]
fn test_llm_settings_azure_deployment() {
    clear_env_vars();
    unsafe {
        env::set_var("LLM_BASE_URL", "https://my-resource.openai.azure.com");
        env::set_var("AZURE_DEPLOYMENT_NAME", "gpt-35");
    }

    let settings = load_llm_settings().unwrap();
    assert_eq!(settings.provider, Provider::azure("gpt-35"));

    unsafe {
        env::set_var("AZURE_API_VERSION", "2025-01-01");
    }
    let settings = load_llm_settings().unwrap();
    assert_eq!(
        settings.provider,
        Provider::AzureOpenAI {
            deployment_name: "gpt-35".to_string(),
            api_version: "2025-01-01".to_string(),
        }
    );

    clear_env_vars();
}

#[test]
#[serial]
fn test_llm_settings_rejects_bad_values() {
    clear_env_vars();
    unsafe {
        env::set_var("LLM_MODEL", "  ");
    }
    assert!(matches!(
        load_llm_settings(),
        Err(LlmConfigError::Empty("LLM_MODEL"))
    ));

    clear_env_vars();
    unsafe {
        env::set_var("LLM_MAX_TOKENS", "lots");
    }
    assert!(matches!(
        load_llm_settings(),
        Err(LlmConfigError::NotANumber { name: "LLM_MAX_TOKENS", .. })
    ));

    clear_env_vars();
}
