//! Association graph construction from the strongest rules.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::application::filter::FilteredView;
use crate::domain::{weight_label, Rule, SceneEdge};

pub const DEFAULT_GRAPH_LIMIT: usize = 20;

/// The `limit` rules with the highest lift. Equal lifts keep their
/// filtered-view order.
#[must_use]
pub fn top_by_lift<'a>(view: &FilteredView<'a>, limit: usize) -> Vec<&'a Rule> {
    let mut ranked: Vec<&'a Rule> = view.rules().to_vec();
    ranked.sort_by(|a, b| b.lift.total_cmp(&a.lift));
    ranked.truncate(limit);
    ranked
}

/// Directed item graph: antecedent -> consequent, weighted by lift.
#[derive(Debug, Clone, Default)]
pub struct AssociationGraph {
    graph: DiGraph<String, f64>,
    index: HashMap<String, NodeIndex>,
}

impl AssociationGraph {
    /// Build from rules in iteration order.
    ///
    /// A repeated (antecedent, consequent) pair keeps a single edge whose
    /// weight is the lift of the last occurrence.
    pub fn from_rules<'a>(rules: impl IntoIterator<Item = &'a Rule>) -> Self {
        let mut built = Self::default();
        for rule in rules {
            let source = built.node(&rule.antecedent);
            let target = built.node(&rule.consequent);
            built.graph.update_edge(source, target, rule.lift);
        }
        built
    }

    fn node(&mut self, item: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(item) {
            return idx;
        }
        let idx = self.graph.add_node(item.to_string());
        self.index.insert(item.to_string(), idx);
        idx
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// Weight of the edge `source -> target`, if present.
    #[must_use]
    pub fn weight(&self, source: &str, target: &str) -> Option<f64> {
        let a = *self.index.get(source)?;
        let b = *self.index.get(target)?;
        self.graph
            .find_edge(a, b)
            .and_then(|edge| self.graph.edge_weight(edge))
            .copied()
    }

    /// Edges in insertion order, with display labels.
    #[must_use]
    pub fn edges(&self) -> Vec<SceneEdge> {
        self.graph
            .edge_references()
            .map(|edge| SceneEdge {
                source: self.graph[edge.source()].clone(),
                target: self.graph[edge.target()].clone(),
                weight: *edge.weight(),
                label: weight_label(*edge.weight()),
            })
            .collect()
    }

    /// The underlying petgraph graph.
    #[must_use]
    pub fn inner(&self) -> &DiGraph<String, f64> {
        &self.graph
    }
}

/// Select the top rules by lift and build their graph.
#[must_use]
pub fn build_graph(view: &FilteredView<'_>, limit: usize) -> AssociationGraph {
    let top = top_by_lift(view, limit);
    let graph = AssociationGraph::from_rules(top.iter().copied());
    debug!(
        rules = top.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Built association graph"
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::filter::filter_rules;
    use crate::domain::{RuleStore, Thresholds};

    fn permissive() -> Thresholds {
        Thresholds::try_new(0.0, 0.0, 0.0).unwrap()
    }

    #[test]
    fn top_by_lift_is_stable_for_ties() {
        let store = RuleStore::new(vec![
            Rule::new("a", "x", 0.1, 0.5, 1.5),
            Rule::new("b", "y", 0.1, 0.5, 3.0),
            Rule::new("c", "z", 0.1, 0.5, 1.5),
        ]);
        let view = filter_rules(Some(&store), &permissive());
        let top: Vec<_> = top_by_lift(&view, 10)
            .iter()
            .map(|r| r.antecedent.as_str())
            .collect();
        assert_eq!(top, vec!["b", "a", "c"]);
    }

    #[test]
    fn edge_weights_equal_rule_lift() {
        let store = RuleStore::new(vec![
            Rule::new("milk", "bread", 0.1, 0.5, 1.7),
            Rule::new("bread", "butter", 0.1, 0.5, 2.4),
        ]);
        let view = filter_rules(Some(&store), &permissive());
        let graph = build_graph(&view, DEFAULT_GRAPH_LIMIT);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.weight("milk", "bread"), Some(1.7));
        assert_eq!(graph.weight("bread", "butter"), Some(2.4));
        assert_eq!(graph.weight("bread", "milk"), None);
    }

    #[test]
    fn caps_edges_at_limit() {
        let rules = (0..30)
            .map(|i| Rule::new(format!("a{i}"), format!("b{i}"), 0.1, 0.5, 1.0 + f64::from(i)))
            .collect();
        let store = RuleStore::new(rules);
        let view = filter_rules(Some(&store), &permissive());
        let graph = build_graph(&view, 20);
        assert_eq!(graph.edge_count(), 20);
        assert!(graph.weight("a29", "b29").is_some());
        assert!(graph.weight("a9", "b9").is_none());
    }

    // Known quirk: duplicate pairs collapse to one edge and the later row
    // in lift order wins. Kept for compatibility, not a guarantee.
    #[test]
    fn duplicate_pair_keeps_last_weight() {
        let store = RuleStore::new(vec![
            Rule::new("a", "b", 0.1, 0.5, 3.0),
            Rule::new("a", "b", 0.1, 0.5, 5.0),
        ]);
        let view = filter_rules(Some(&store), &permissive());
        let graph = build_graph(&view, 20);
        assert_eq!(graph.edge_count(), 1);
        // Lift order is 5.0 then 3.0, so the weaker rule overwrites.
        assert_eq!(graph.weight("a", "b"), Some(3.0));
    }

    #[test]
    fn reversed_pair_is_a_separate_edge() {
        let graph = AssociationGraph::from_rules(&[
            Rule::new("a", "b", 0.1, 0.5, 2.0),
            Rule::new("b", "a", 0.1, 0.5, 3.0),
        ]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.weight("b", "a"), Some(3.0));
    }

    #[test]
    fn edges_carry_one_decimal_labels() {
        let graph = AssociationGraph::from_rules(&[Rule::new("a", "b", 0.1, 0.5, 2.46)]);
        let edges = graph.edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].label, "2.5");
        assert_eq!(edges[0].weight, 2.46);
    }

    #[test]
    fn build_is_deterministic() {
        let store = RuleStore::new(vec![
            Rule::new("a", "b", 0.1, 0.5, 2.0),
            Rule::new("c", "d", 0.1, 0.5, 2.0),
            Rule::new("b", "c", 0.1, 0.5, 4.0),
        ]);
        let view = filter_rules(Some(&store), &permissive());
        assert_eq!(build_graph(&view, 20).edges(), build_graph(&view, 20).edges());
    }
}
