//! "Customers who buy X also buy" lookups.

use serde::Serialize;

use super::filter::FilteredView;
use crate::domain::Rule;

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;

/// Rules whose antecedent is `item`, by confidence descending, capped at
/// `limit`. Equal confidences keep their filtered-view order.
#[must_use]
pub fn recommend<'a>(view: &FilteredView<'a>, item: &str, limit: usize) -> Vec<&'a Rule> {
    let mut matches: Vec<&'a Rule> = view
        .iter()
        .copied()
        .filter(|rule| rule.antecedent == item)
        .collect();
    // sort_by is stable
    matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    matches.truncate(limit);
    matches
}

/// Outcome of the recommendation section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendation {
    /// No item chosen in the selector.
    NoSelection,
    /// The item has no rules under the current thresholds.
    NoAssociations { item: String },
    Found { item: String, rules: Vec<Rule> },
}

impl Recommendation {
    /// Resolve the selector state against the filtered view.
    #[must_use]
    pub fn lookup(view: &FilteredView<'_>, selection: Option<&str>, limit: usize) -> Self {
        let Some(item) = selection else {
            return Self::NoSelection;
        };

        let rules = recommend(view, item, limit);
        if rules.is_empty() {
            Self::NoAssociations {
                item: item.to_string(),
            }
        } else {
            Self::Found {
                item: item.to_string(),
                rules: rules.into_iter().cloned().collect(),
            }
        }
    }
}
