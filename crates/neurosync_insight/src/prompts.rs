use crate::llm::GenerateRequest;
use crate::schema::{insight_response_schema, JSON_MIME_TYPE};
use neurosync_core::CheckInMetrics;

const INSIGHT_INSTRUCTION: &str =
    "Analyze this neuro-health data and provide personalized insights.";

const RESPONSE_SHAPE: &str = r#"{
  "brainScore": number (0-100),
  "stateDescription": "string",
  "recommendations": ["string"],
  "cognitiveOutlook": "string",
  "scientificContext": "string"
}"#;

/// Prompt text for one check-in: instruction, the full metrics payload as JSON,
/// then the exact response shape expected back.
pub fn build_insight_prompt(metrics: &CheckInMetrics) -> Result<String, serde_json::Error> {
    let data = serde_json::to_string(metrics)?;
    Ok(format!(
        "{}\nData: {}\n\nProvide the response in JSON format with the following structure:\n{}",
        INSIGHT_INSTRUCTION, data, RESPONSE_SHAPE
    ))
}

/// Full generation request for one check-in: prompt plus declared output schema.
pub fn insight_request(
    metrics: &CheckInMetrics,
    temperature: Option<f32>,
) -> Result<GenerateRequest, serde_json::Error> {
    Ok(GenerateRequest {
        prompt: build_insight_prompt(metrics)?,
        response_mime_type: JSON_MIME_TYPE.to_string(),
        response_schema: insight_response_schema(),
        temperature,
    })
}
