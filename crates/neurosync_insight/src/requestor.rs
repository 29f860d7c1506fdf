//! Check-in to insight: one validated snapshot in, one `Insight` or one tagged failure out.

use crate::llm::{GenerateRequest, GenerativeTransport, TransportError};
use crate::parse::{parse_insight, MalformedResponse};
use crate::prompts::insight_request;
use crate::providers::{GeminiClient, MockProvider};
use neurosync_core::{CheckInMetrics, ConfigurationError, Credential, Insight, LlmConfig, MetricsError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Coarse failure category, for callers that only branch on what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Configuration,
    InvalidMetrics,
    Transport,
    MalformedResponse,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestFailure {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("check-in rejected: {0}")]
    InvalidMetrics(#[from] MetricsError),
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] MalformedResponse),
}

impl RequestFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            RequestFailure::Configuration(_) => FailureKind::Configuration,
            RequestFailure::InvalidMetrics(_) => FailureKind::InvalidMetrics,
            RequestFailure::Transport(_) => FailureKind::Transport,
            RequestFailure::MalformedResponse(_) => FailureKind::MalformedResponse,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Covers the whole round trip, whatever the transport does internally.
    pub timeout: Duration,
    pub temperature: Option<f32>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            temperature: None,
        }
    }
}

impl From<&LlmConfig> for RequestOptions {
    fn from(config: &LlmConfig) -> Self {
        Self {
            timeout: config.timeout(),
            temperature: config.temperature,
        }
    }
}

/// Stateless with respect to earlier calls: no retries, no caching.
#[derive(Clone)]
pub struct InsightRequestor {
    transport: Arc<dyn GenerativeTransport>,
    options: RequestOptions,
}

impl InsightRequestor {
    pub fn new(transport: Arc<dyn GenerativeTransport>, options: RequestOptions) -> Self {
        Self { transport, options }
    }

    /// Build the configured provider. Fails before any network activity if the
    /// provider needs a credential and none was supplied.
    pub fn from_config(
        config: &LlmConfig,
        credential: Option<String>,
    ) -> Result<Self, ConfigurationError> {
        let transport: Arc<dyn GenerativeTransport> = match config.provider.as_str() {
            "gemini" => {
                let key = Credential::new(credential, &config.api_key_env)?;
                Arc::new(GeminiClient::new(config, key)?)
            }
            "mock" => Arc::new(MockProvider::new(&config.model)),
            other => return Err(ConfigurationError::UnknownProvider(other.to_string())),
        };
        tracing::info!(
            "Insight requests via {} (model {}, timeout {:?})",
            transport.name(),
            config.model,
            config.timeout()
        );
        Ok(Self::new(transport, RequestOptions::from(config)))
    }

    /// Like `from_config`, reading the credential from the env var named in the config.
    pub fn from_env(config: &LlmConfig) -> Result<Self, ConfigurationError> {
        Self::from_config(config, std::env::var(&config.api_key_env).ok())
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// The exact request `request_insight` would send for these metrics.
    pub fn build_request(&self, metrics: &CheckInMetrics) -> Result<GenerateRequest, TransportError> {
        insight_request(metrics, self.options.temperature)
            .map_err(|e| TransportError::Encode(e.to_string()))
    }

    /// One round trip to the generation service.
    ///
    /// Every failure is returned as a `RequestFailure`; nothing partial is ever
    /// produced. Failures are logged with their kind, which does not affect the result.
    #[tracing::instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4(), provider = self.transport.name()))]
    pub async fn request_insight(&self, metrics: &CheckInMetrics) -> Result<Insight, RequestFailure> {
        let result = self.attempt(metrics).await;
        match &result {
            Ok(insight) => tracing::info!(
                brain_score = insight.brain_score,
                recommendations = insight.recommendations.len(),
                "Insight received"
            ),
            Err(e) => tracing::warn!(kind = ?e.kind(), "Insight request failed: {}", e),
        }
        result
    }

    async fn attempt(&self, metrics: &CheckInMetrics) -> Result<Insight, RequestFailure> {
        metrics.validate()?;
        let request = self.build_request(metrics)?;

        let output = tokio::time::timeout(self.options.timeout, self.transport.generate(&request))
            .await
            .map_err(|_| TransportError::Timeout(self.options.timeout))??;

        if let Some(reason) = output.finish_reason.as_deref() {
            tracing::debug!("Finish reason: {}", reason);
        }

        let text = output.text.unwrap_or_default();
        Ok(parse_insight(&text)?)
    }
}
