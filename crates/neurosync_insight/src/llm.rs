use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// One structured-output generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub response_mime_type: String,
    /// Output schema the service is asked to honor.
    pub response_schema: Value,
    pub temperature: Option<f32>,
}

/// What came back from a call that completed at the transport level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOutput {
    /// `None` when the service answered without any text part.
    pub text: Option<String>,
    pub finish_reason: Option<String>,
}

/// The call did not produce a response body to parse.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("failed to encode request: {0}")]
    Encode(String),
    #[error("{provider} request failed: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },
    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("{provider} sent an undecodable envelope: {message}")]
    Envelope {
        provider: &'static str,
        message: String,
    },
}

/// A text-generation service that can be asked for schema-constrained JSON.
#[async_trait]
pub trait GenerativeTransport: Send + Sync {
    /// Perform exactly one round trip. Implementations must not retry.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutput, TransportError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
