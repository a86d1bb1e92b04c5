//! Threshold filtering over the rule store.

use std::collections::BTreeSet;
use std::slice;

use crate::domain::{Rule, RuleStore, Thresholds};

/// Rules that pass the current thresholds, in store order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView<'a> {
    rules: Vec<&'a Rule>,
}

impl<'a> FilteredView<'a> {
    #[must_use]
    pub fn rules(&self) -> &[&'a Rule] {
        &self.rules
    }

    pub fn iter(&self) -> slice::Iter<'_, &'a Rule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Sorted, distinct antecedents. These populate the item selector.
    #[must_use]
    pub fn antecedents(&self) -> Vec<&'a str> {
        self.rules
            .iter()
            .map(|rule| rule.antecedent.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Owned copies of the rules, for reports that outlive the store borrow.
    #[must_use]
    pub fn to_owned_rules(&self) -> Vec<Rule> {
        self.rules.iter().map(|rule| (*rule).clone()).collect()
    }
}

/// Keep the rules that meet all three thresholds.
///
/// An absent store filters to an empty view.
#[must_use]
pub fn filter_rules<'a>(store: Option<&'a RuleStore>, thresholds: &Thresholds) -> FilteredView<'a> {
    let rules = store
        .map(|store| store.iter().filter(|rule| thresholds.admits(rule)).collect())
        .unwrap_or_default();
    FilteredView { rules }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RuleStore {
        RuleStore::new(vec![
            Rule::new("A", "B", 0.05, 0.4, 1.2),
            Rule::new("A", "C", 0.05, 0.9, 2.0),
            Rule::new("D", "E", 0.01, 0.1, 0.9),
        ])
    }

    #[test]
    fn keeps_rules_meeting_all_thresholds() {
        let store = store();
        let thresholds = Thresholds::try_new(0.03, 0.3, 1.0).unwrap();
        let view = filter_rules(Some(&store), &thresholds);
        assert_eq!(view.len(), 2);
        assert_eq!(view.rules()[0].consequent, "B");
        assert_eq!(view.rules()[1].consequent, "C");
    }

    #[test]
    fn absent_store_gives_empty_view() {
        let view = filter_rules(None, &Thresholds::default());
        assert!(view.is_empty());
    }

    #[test]
    fn empty_store_gives_empty_view() {
        let store = RuleStore::default();
        assert!(filter_rules(Some(&store), &Thresholds::default()).is_empty());
    }

    #[test]
    fn zero_thresholds_keep_everything() {
        let store = store();
        let thresholds = Thresholds::try_new(0.0, 0.0, 0.0).unwrap();
        let view = filter_rules(Some(&store), &thresholds);
        assert_eq!(view.to_owned_rules(), store.rules().to_vec());
    }

    #[test]
    fn antecedents_are_sorted_and_distinct() {
        let store = RuleStore::new(vec![
            Rule::new("milk", "bread", 0.1, 0.5, 1.5),
            Rule::new("bread", "milk", 0.1, 0.5, 1.5),
            Rule::new("milk", "eggs", 0.1, 0.5, 1.5),
        ]);
        let thresholds = Thresholds::try_new(0.0, 0.0, 0.0).unwrap();
        let view = filter_rules(Some(&store), &thresholds);
        assert_eq!(view.antecedents(), vec!["bread", "milk"]);
    }

    #[test]
    fn duplicates_survive_filtering() {
        let store = RuleStore::new(vec![
            Rule::new("a", "b", 0.1, 0.5, 1.5),
            Rule::new("a", "b", 0.1, 0.5, 1.5),
        ]);
        let view = filter_rules(Some(&store), &Thresholds::default());
        assert_eq!(view.len(), 2);
    }
}
