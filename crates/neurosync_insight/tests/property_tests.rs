//! Property-based tests for insight response parsing.
//!
//! Verifies that the parser never panics on arbitrary input, never yields a
//! partially populated insight, and never alters the values it accepts.

use neurosync_core::Insight;
use neurosync_insight::parse_insight;
use proptest::prelude::*;

fn arb_insight() -> impl Strategy<Value = Insight> {
    (
        // Half-point steps are exact in binary and in short decimal form.
        (0u32..=200).prop_map(|n| f64::from(n) / 2.0),
        "[a-zA-Z][a-zA-Z .,]{0,40}",
        prop::collection::vec("\\PC{0,40}", 0..6),
        "[a-zA-Z][a-zA-Z .,]{0,40}",
        "\\PC{0,80}",
    )
        .prop_map(|(score, state, recs, outlook, context)| Insight {
            brain_score: score,
            state_description: state,
            recommendations: recs,
            cognitive_outlook: outlook,
            scientific_context: context,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// **Never panics** on arbitrary text.
    #[test]
    fn parse_never_panics(s in "\\PC{0,500}") {
        let _ = parse_insight(&s);
    }

    /// **Accepted values are untouched**: score, order and text come back exactly.
    #[test]
    fn parse_preserves_valid_insight(insight in arb_insight()) {
        let text = serde_json::to_string(&insight).unwrap();
        let parsed = parse_insight(&text).unwrap();
        prop_assert_eq!(parsed, insight);
    }

    /// **All or nothing**: removing any one required field always fails.
    #[test]
    fn dropping_a_field_fails(insight in arb_insight(), idx in 0usize..5) {
        let mut value = serde_json::to_value(&insight).unwrap();
        value.as_object_mut().unwrap().remove(Insight::FIELDS[idx]);
        prop_assert!(parse_insight(&value.to_string()).is_err());
    }

    /// **Score bounds**: anything outside 0..=100 is rejected.
    #[test]
    fn out_of_range_score_fails(insight in arb_insight(), score in prop_oneof![-1e6f64..-0.001, 100.001f64..1e6]) {
        let mut bad = insight;
        bad.brain_score = score;
        let text = serde_json::to_string(&bad).unwrap();
        prop_assert!(parse_insight(&text).is_err());
    }
}
