use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Text-completion collaborator. One prompt in, raw completion text out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, ProviderError>;

    /// False when the client can never succeed, e.g. a hosted provider
    /// without credentials. Callers skip the request entirely.
    fn is_configured(&self) -> bool {
        true
    }

    fn name(&self) -> &str;
}

#[async_trait]
impl<T: LlmClient + ?Sized> LlmClient for Box<T> {
    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, ProviderError> {
        (**self).complete(prompt, timeout).await
    }

    fn is_configured(&self) -> bool {
        (**self).is_configured()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<T: LlmClient + ?Sized> LlmClient for Arc<T> {
    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, ProviderError> {
        (**self).complete(prompt, timeout).await
    }

    fn is_configured(&self) -> bool {
        (**self).is_configured()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Why a completion attempt produced nothing usable.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("provider `{0}` is not configured")]
    NotConfigured(String),
    #[error("provider did not answer within {secs}s")]
    Timeout { secs: u64 },
    #[error("provider unreachable: {0}")]
    Transport(String),
    #[error("provider returned status {status} ({kind:?}): {body}")]
    Status { status: u16, kind: StatusKind, body: String },
    #[error("provider returned an empty completion")]
    EmptyResponse,
    #[error("provider response could not be read: {0}")]
    Malformed(String),
}

/// Coarse classification of non-success HTTP statuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    /// 401/403
    Auth,
    /// 402
    Billing,
    /// 404, usually a wrong model name
    NotFound,
    /// 429
    RateLimit,
    /// 5xx
    ServerError,
    Other,
}

const MAX_ERROR_BODY: usize = 300;

impl ProviderError {
    pub fn from_status(status: u16, body: &str) -> Self {
        let kind = match status {
            401 | 403 => StatusKind::Auth,
            402 => StatusKind::Billing,
            404 => StatusKind::NotFound,
            429 => StatusKind::RateLimit,
            500..=599 => StatusKind::ServerError,
            _ => StatusKind::Other,
        };
        Self::Status { status, kind, body: truncate_body(body) }
    }

    pub fn transport(error: &reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }

    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotConfigured(_) => "not_configured",
            Self::Timeout { .. } => "timeout",
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::EmptyResponse => "empty_response",
            Self::Malformed(_) => "malformed",
        }
    }
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

/// Client used when the generative path is switched off or lacks credentials.
#[derive(Clone, Debug)]
pub struct DisabledLlmClient {
    reason: String,
}

impl DisabledLlmClient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[async_trait]
impl LlmClient for DisabledLlmClient {
    async fn complete(&self, _prompt: &str, _timeout: Duration) -> Result<String, ProviderError> {
        Err(ProviderError::NotConfigured(self.reason.clone()))
    }

    fn is_configured(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
