use crate::api_types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use crate::llm::{GenerateOutput, GenerateRequest, GenerativeTransport, TransportError};
use neurosync_core::{ConfigurationError, Credential, LlmConfig};
use reqwest::Client;
use std::time::Duration;

const PROVIDER: &str = "Gemini";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    credential: Credential,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GeminiClient {
    /// A credential is required up front; there is no unauthenticated mode.
    pub fn new(config: &LlmConfig, credential: Credential) -> Result<Self, ConfigurationError> {
        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let timeout = config.timeout();

        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| ConfigurationError::Client(e.to_string()))?,
            credential,
            base_url,
            model: config.model.clone(),
            timeout,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn send_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Network {
                provider: PROVIDER,
                message: e.to_string(),
            }
        }
    }
}

#[async_trait::async_trait]
impl GenerativeTransport for GeminiClient {
    #[tracing::instrument(skip(self, request), fields(model = %self.model))]
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutput, TransportError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: request.response_mime_type.clone(),
                response_schema: request.response_schema.clone(),
                temperature: request.temperature,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body: error_text.chars().take(500).collect(),
            });
        }

        let resp_text = response.text().await.map_err(|e| self.send_error(e))?;
        tracing::debug!(
            "Gemini raw response (first 2000 chars): {}",
            resp_text.chars().take(2000).collect::<String>()
        );

        let envelope: GenerateContentResponse =
            serde_json::from_str(&resp_text).map_err(|e| TransportError::Envelope {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        Ok(GenerateOutput {
            text: envelope.text(),
            finish_reason: envelope.finish_reason(),
        })
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{insight_response_schema, JSON_MIME_TYPE};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout_secs: u64) -> GeminiClient {
        let config = LlmConfig {
            base_url: Some(format!("{}/", server.uri())),
            timeout_secs,
            ..LlmConfig::default()
        };
        let key = Credential::new(Some("test-key".to_string()), "GEMINI_API_KEY").unwrap();
        GeminiClient::new(&config, key).unwrap()
    }

    fn request() -> GenerateRequest {
        GenerateRequest {
            prompt: "Analyze this".to_string(),
            response_mime_type: JSON_MIME_TYPE.to_string(),
            response_schema: insight_response_schema(),
            temperature: Some(0.4),
        }
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mock_server = MockServer::start().await;

        let envelope = serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"brainScore\":84}"}]},
                "finishReason": "STOP"
            }]
        });

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash-exp:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, 5);
        let output = client.generate(&request()).await.expect("Failed to generate");
        assert_eq!(output.text.as_deref(), Some(r#"{"brainScore":84}"#));
        assert_eq!(output.finish_reason.as_deref(), Some("STOP"));

        let received = mock_server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Analyze this");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"], insight_response_schema());
    }

    #[tokio::test]
    async fn test_error_status_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, 5);
        match client.generate(&request()).await {
            Err(TransportError::Status { status, body, .. }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, 5);
        assert!(matches!(
            client.generate(&request()).await,
            Err(TransportError::Envelope { .. })
        ));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"candidates": []}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, 1);
        assert_eq!(
            client.generate(&request()).await,
            Err(TransportError::Timeout(Duration::from_secs(1)))
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let config = LlmConfig {
            base_url: Some("http://127.0.0.1:9".to_string()),
            timeout_secs: 2,
            ..LlmConfig::default()
        };
        let key = Credential::new(Some("k".to_string()), "GEMINI_API_KEY").unwrap();
        let client = GeminiClient::new(&config, key).unwrap();
        assert!(client.generate(&request()).await.is_err());
    }
}
