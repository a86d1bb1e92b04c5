//! Headline metrics for a filtered view.

use serde::Serialize;

use super::filter::FilteredView;

/// Metric cards shown above the report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total_rules: usize,
    pub average_confidence: f64,
    pub average_lift: f64,
    /// Highest lift among the filtered rules.
    pub strongest_lift: f64,
}

impl Summary {
    /// Compute metrics, or `None` for an empty view.
    #[must_use]
    pub fn from_view(view: &FilteredView<'_>) -> Option<Self> {
        if view.is_empty() {
            return None;
        }

        let count = view.len() as f64;
        let (confidence_sum, lift_sum, strongest_lift) = view.iter().fold(
            (0.0, 0.0, f64::NEG_INFINITY),
            |(conf, lift, max), rule| (conf + rule.confidence, lift + rule.lift, max.max(rule.lift)),
        );

        Some(Self {
            total_rules: view.len(),
            average_confidence: confidence_sum / count,
            average_lift: lift_sum / count,
            strongest_lift,
        })
    }
}
