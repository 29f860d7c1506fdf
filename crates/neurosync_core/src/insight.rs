use serde::{Deserialize, Serialize};

/// Structured summary produced from one successful insight request.
///
/// Only built by the response parser after every field has been checked, so a
/// value of this type is always fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    /// 0-100
    pub brain_score: f64,
    pub state_description: String,
    pub recommendations: Vec<String>,
    pub cognitive_outlook: String,
    pub scientific_context: String,
}

impl Insight {
    /// Field names the generation service must return, in schema order.
    pub const FIELDS: [&'static str; 5] = [
        "brainScore",
        "stateDescription",
        "recommendations",
        "cognitiveOutlook",
        "scientificContext",
    ];

    pub const MIN_SCORE: f64 = 0.0;
    pub const MAX_SCORE: f64 = 100.0;
}
