//! Response parsing: turn the service's text into a checked `Insight` or reject it.
//!
//! The declared output schema is a request, not a guarantee. Every response is
//! decoded and checked here regardless of what the service claims to enforce.

use neurosync_core::Insight;
use serde_json::Value;
use thiserror::Error;

/// A response arrived but cannot become an `Insight`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedResponse {
    #[error("response text is empty")]
    Empty,
    #[error("response is not valid JSON: {0}")]
    NotJson(String),
    #[error("response does not match the insight schema: {0}")]
    Schema(String),
    #[error("{field} is invalid: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

/// Parse response text into an `Insight`. Field values are taken as-is.
pub fn parse_insight(text: &str) -> Result<Insight, MalformedResponse> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(MalformedResponse::Empty);
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| MalformedResponse::NotJson(e.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| MalformedResponse::Schema("expected a JSON object".to_string()))?;
    let extra: Vec<&str> = object
        .keys()
        .map(String::as_str)
        .filter(|k| !Insight::FIELDS.iter().any(|f| f == k))
        .collect();
    if !extra.is_empty() {
        tracing::debug!("Ignoring unexpected insight fields: {:?}", extra);
    }

    let insight: Insight =
        serde_json::from_value(value).map_err(|e| MalformedResponse::Schema(e.to_string()))?;
    check_fields(&insight)?;
    Ok(insight)
}

fn check_fields(insight: &Insight) -> Result<(), MalformedResponse> {
    let score = insight.brain_score;
    if !score.is_finite() || !(Insight::MIN_SCORE..=Insight::MAX_SCORE).contains(&score) {
        return Err(MalformedResponse::InvalidField {
            field: "brainScore",
            reason: format!("{} is outside 0..=100", score),
        });
    }
    if insight.state_description.trim().is_empty() {
        return Err(MalformedResponse::InvalidField {
            field: "stateDescription",
            reason: "empty".to_string(),
        });
    }
    if insight.cognitive_outlook.trim().is_empty() {
        return Err(MalformedResponse::InvalidField {
            field: "cognitiveOutlook",
            reason: "empty".to_string(),
        });
    }
    Ok(())
}

/// Unwrap a body that is entirely one markdown code block (```json ... ```).
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string (e.g. "json") on the opening line.
    match inner.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => inner.trim(),
    }
}
