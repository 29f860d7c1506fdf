use neurosync_insight::InsightState;

pub const FALLBACK: &str = "Complete a check-in to generate AI insights.";

/// Plain-text view of the insight slot. Anything other than a ready insight
/// renders the neutral fallback.
pub fn render(state: &InsightState) -> String {
    match state {
        InsightState::Ready(insight) => {
            let mut out = format!(
                "Brain score: {}/100\nState: \"{}\"\n",
                insight.brain_score, insight.state_description
            );
            if !insight.recommendations.is_empty() {
                out.push_str("Recommendations:\n");
                for (i, rec) in insight.recommendations.iter().enumerate() {
                    out.push_str(&format!("  {}. {}\n", i + 1, rec));
                }
            }
            out.push_str(&format!("Outlook: {}\n", insight.cognitive_outlook));
            out
        }
        InsightState::Pending => "Analyzing...\n".to_string(),
        InsightState::Empty | InsightState::Unavailable(_) => format!("{}\n", FALLBACK),
    }
}

/// JSON view: the insight object, or `null` when there is none.
pub fn render_json(state: &InsightState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&state.insight())
}
