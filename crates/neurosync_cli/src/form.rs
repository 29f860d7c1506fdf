//! Check-in form: `field=value` edits applied to the default check-in.

use neurosync_core::{CheckInMetrics, MetricField};

/// Apply each `field=value` edit in order. Rejected edits leave the field at its
/// previous value; their messages are returned for the caller to surface.
pub fn apply_edits<S: AsRef<str>>(metrics: &mut CheckInMetrics, edits: &[S]) -> Vec<String> {
    let mut rejected = Vec::new();
    for edit in edits {
        let edit = edit.as_ref();
        let Some((name, value)) = edit.split_once('=') else {
            rejected.push(format!("'{}' is not of the form field=value", edit));
            continue;
        };
        let outcome = name
            .parse::<MetricField>()
            .and_then(|field| metrics.apply_edit(field, value));
        if let Err(e) = outcome {
            rejected.push(e.to_string());
        }
    }
    rejected
}
