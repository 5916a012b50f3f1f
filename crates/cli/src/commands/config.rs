use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use giftwise_core::config::{AppConfig, LoadOptions, DEFAULT_CONFIG_FILE, FALLBACK_CONFIG_FILE};
use secrecy::ExposeSecret;
use toml::Value;

use crate::commands::{config_failure, CommandResult};

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return config_failure("config", &error),
    };

    CommandResult { exit_code: 0, output: render(&config) }
}

/// Effective values with the layer each one came from. Secrets are redacted.
pub fn render(config: &AppConfig) -> String {
    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let api_key = match config.llm.api_key.as_ref() {
        Some(key) => redact_token(key.expose_secret()),
        None => "<unset>".to_string(),
    };

    let lines = [
        "effective config (source precedence: env > file > default):".to_string(),
        render_line(
            "llm.enabled",
            &config.llm.enabled.to_string(),
            source("llm.enabled", &["GIFTWISE_LLM_ENABLED"]),
        ),
        render_line(
            "llm.provider",
            config.llm.provider.as_str(),
            source("llm.provider", &["GIFTWISE_LLM_PROVIDER"]),
        ),
        render_line("llm.model", &config.llm.model, source("llm.model", &["GIFTWISE_LLM_MODEL"])),
        render_line(
            "llm.base_url",
            config.llm.effective_base_url(),
            source("llm.base_url", &["GIFTWISE_LLM_BASE_URL"]),
        ),
        render_line(
            "llm.api_key",
            &api_key,
            source("llm.api_key", &["GIFTWISE_LLM_API_KEY", "GEMINI_API_KEY"]),
        ),
        render_line(
            "llm.timeout_secs",
            &config.llm.timeout_secs.to_string(),
            source("llm.timeout_secs", &["GIFTWISE_LLM_TIMEOUT_SECS"]),
        ),
        render_line(
            "recommendation.target_count",
            &config.recommendation.target_count.to_string(),
            source("recommendation.target_count", &["GIFTWISE_RECOMMENDATION_TARGET_COUNT"]),
        ),
        render_line(
            "logging.level",
            &config.logging.level,
            source("logging.level", &["GIFTWISE_LOGGING_LEVEL", "GIFTWISE_LOG_LEVEL"]),
        ),
        render_line(
            "logging.format",
            config.logging.format.as_str(),
            source("logging.format", &["GIFTWISE_LOGGING_FORMAT", "GIFTWISE_LOG_FORMAT"]),
        ),
    ];

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    [DEFAULT_CONFIG_FILE, FALLBACK_CONFIG_FILE]
        .into_iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

fn redact_token(token: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    if let Some((prefix, _)) = trimmed.split_once('-') {
        return format!("{prefix}-***");
    }

    "<redacted>".to_string()
}
