//! HTTP adapters for hosted and local text-completion providers.

use std::time::Duration;

use async_trait::async_trait;
use giftwise_core::config::{LlmConfig, LlmProvider};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::llm::{DisabledLlmClient, LlmClient, ProviderError};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_MAX_TOKENS: u32 = 1024;

/// Single-shot completion over HTTP for any of the supported providers.
pub struct HttpLlmClient {
    client: Client,
    provider: LlmProvider,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
}

impl HttpLlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().build().map_err(|error| ProviderError::transport(&error))?;
        Ok(Self {
            client,
            provider: config.provider,
            base_url: config.effective_base_url().trim_end_matches('/').to_string(),
            model: config.model.trim().to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> String {
        match self.provider {
            LlmProvider::Gemini => {
                format!("{}/models/{}:generateContent", self.base_url, self.model)
            }
            LlmProvider::OpenAi => format!("{}/chat/completions", self.base_url),
            LlmProvider::Anthropic => format!("{}/messages", self.base_url),
            LlmProvider::Ollama => format!("{}/api/generate", self.base_url),
        }
    }

    pub fn request_body(&self, prompt: &str) -> Value {
        match self.provider {
            LlmProvider::Gemini => json!({
                "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            }),
            LlmProvider::OpenAi => json!({
                "model": self.model,
                "messages": [{ "role": "user", "content": prompt }],
            }),
            LlmProvider::Anthropic => json!({
                "model": self.model,
                "max_tokens": ANTHROPIC_MAX_TOKENS,
                "messages": [{ "role": "user", "content": prompt }],
            }),
            LlmProvider::Ollama => json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
            }),
        }
    }

    fn api_key(&self) -> &str {
        self.api_key.as_ref().map(|key| key.expose_secret()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, ProviderError> {
        let mut request =
            self.client.post(self.endpoint()).timeout(timeout).json(&self.request_body(prompt));
        request = match self.provider {
            LlmProvider::Gemini => request.header("x-goog-api-key", self.api_key()),
            LlmProvider::OpenAi => request.bearer_auth(self.api_key()),
            LlmProvider::Anthropic => request
                .header("x-api-key", self.api_key())
                .header("anthropic-version", ANTHROPIC_VERSION),
            LlmProvider::Ollama => request,
        };

        debug!(
            event_name = "llm.request.sent",
            provider = self.provider.as_str(),
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "sending completion request"
        );

        let response = request.send().await.map_err(|error| {
            if error.is_timeout() {
                ProviderError::Timeout { secs: timeout.as_secs() }
            } else {
                ProviderError::transport(&error)
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|error| ProviderError::transport(&error))?;
        if !status.is_success() {
            return Err(ProviderError::from_status(status.as_u16(), &body));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|error| ProviderError::Malformed(error.to_string()))?;
        extract_text(self.provider, &value)
    }

    fn name(&self) -> &str {
        self.provider.as_str()
    }
}

/// Pulls the completion text out of a provider response body.
pub fn extract_text(provider: LlmProvider, value: &Value) -> Result<String, ProviderError> {
    let text = match provider {
        LlmProvider::Gemini => {
            let parts = value
                .pointer("/candidates/0/content/parts")
                .and_then(Value::as_array)
                .ok_or_else(|| missing("candidates[0].content.parts"))?;
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect::<String>()
        }
        LlmProvider::OpenAi => value
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or_else(|| missing("choices[0].message.content"))?
            .to_string(),
        LlmProvider::Anthropic => {
            let blocks =
                value.get("content").and_then(Value::as_array).ok_or_else(|| missing("content"))?;
            blocks
                .iter()
                .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
                .filter_map(|block| block.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("\n")
        }
        LlmProvider::Ollama => value
            .get("response")
            .and_then(Value::as_str)
            .ok_or_else(|| missing("response"))?
            .to_string(),
    };

    if text.trim().is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    Ok(text)
}

fn missing(path: &str) -> ProviderError {
    ProviderError::Malformed(format!("missing `{path}`"))
}

/// Builds the client described by `config`, or a disabled one when the
/// generative path is off or cannot authenticate.
pub fn build_client(config: &LlmConfig) -> Box<dyn LlmClient> {
    if !config.enabled {
        return Box::new(DisabledLlmClient::new("llm.enabled is false"));
    }

    if config.provider.requires_api_key() && !config.has_api_key() {
        warn!(
            event_name = "llm.client.disabled",
            provider = config.provider.as_str(),
            "no api key configured, using keyword recommendations only"
        );
        let reason = format!("llm.api_key is missing for {}", config.provider.as_str());
        return Box::new(DisabledLlmClient::new(reason));
    }

    match HttpLlmClient::new(config) {
        Ok(client) => Box::new(client),
        Err(error) => {
            warn!(
                event_name = "llm.client.disabled",
                provider = config.provider.as_str(),
                error = %error,
                "http client could not be built, using keyword recommendations only"
            );
            Box::new(DisabledLlmClient::new(error.to_string()))
        }
    }
}
