use neurosync_core::Insight;
use serde_json::{json, Value};

pub const JSON_MIME_TYPE: &str = "application/json";

/// Output schema declared with every insight request: an object with exactly the
/// five insight fields, all required.
pub fn insight_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "brainScore": { "type": "NUMBER" },
            "stateDescription": { "type": "STRING" },
            "recommendations": { "type": "ARRAY", "items": { "type": "STRING" } },
            "cognitiveOutlook": { "type": "STRING" },
            "scientificContext": { "type": "STRING" }
        },
        "required": Insight::FIELDS,
    })
}
