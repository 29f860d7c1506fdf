//! Mock provider — a canned, schema-valid insight for running without an API key.

use crate::llm::{GenerateOutput, GenerateRequest, GenerativeTransport, TransportError};

const CANNED_INSIGHT: &str = r#"{
  "brainScore": 84,
  "stateDescription": "Balanced and alert, with mild residual stress.",
  "recommendations": ["Hydrate before noon", "Take a 10 minute walk after lunch", "Wind down screens 45 minutes before bed"],
  "cognitiveOutlook": "Stable focus through the afternoon.",
  "scientificContext": "Higher HRV and consistent sleep are associated with better executive function."
}"#;

#[derive(Debug, Clone)]
pub struct MockProvider {
    model: String,
}

impl MockProvider {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl GenerativeTransport for MockProvider {
    async fn generate(&self, _request: &GenerateRequest) -> Result<GenerateOutput, TransportError> {
        tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
        tracing::debug!("Mock {} returning canned insight", self.model);
        Ok(GenerateOutput {
            text: Some(CANNED_INSIGHT.to_string()),
            finish_reason: Some("STOP".to_string()),
        })
    }

    fn name(&self) -> &'static str {
        "Mock"
    }
}
