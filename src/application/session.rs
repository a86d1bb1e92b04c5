//! Request/response handling for one exploration session.
//!
//! Every call to [`Session::evaluate`] recomputes the derived views from the
//! cached rule store and the caller's current [`Controls`]. Nothing derived
//! is retained between calls.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tracing::{info, instrument, warn};

use super::cache::{RuleCache, Snapshot};
use super::filter::{filter_rules, FilteredView};
use super::graph::{build_graph, lay_out, LayoutParams, DEFAULT_GRAPH_LIMIT};
use super::recommend::{Recommendation, DEFAULT_RECOMMENDATION_LIMIT};
use super::summary::Summary;
use crate::domain::error::DomainError;
use crate::domain::{GraphScene, Rule, Thresholds};
use crate::error::{GraphError, Result, StoreError};
use crate::port::{GraphRenderer, RuleSource};

/// Selector entry meaning "nothing chosen".
pub const NO_SELECTION: &str = "(Select Item)";

/// Which detail sections to produce below the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Graph,
    Table,
    #[default]
    Both,
}

impl View {
    #[must_use]
    pub fn shows_graph(self) -> bool {
        matches!(self, Self::Graph | Self::Both)
    }

    #[must_use]
    pub fn shows_table(self) -> bool {
        matches!(self, Self::Table | Self::Both)
    }
}

/// Current state of every user-facing control.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub thresholds: Thresholds,
    pub selection: Option<String>,
    /// `None` skips both the graph and the table.
    pub view: Option<View>,
    pub recommend_limit: usize,
    pub graph_limit: usize,
}

impl Controls {
    #[must_use]
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            selection: None,
            view: Some(View::default()),
            recommend_limit: DEFAULT_RECOMMENDATION_LIMIT,
            graph_limit: DEFAULT_GRAPH_LIMIT,
        }
    }

    /// Set the selected item. The placeholder entry and blank input clear it.
    #[must_use]
    pub fn select(mut self, item: Option<&str>) -> Self {
        self.selection = item
            .map(str::trim)
            .filter(|item| !item.is_empty() && *item != NO_SELECTION)
            .map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_view(mut self, view: Option<View>) -> Self {
        self.view = view;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), DomainError> {
        self.thresholds.validate()?;
        if self.recommend_limit == 0 {
            return Err(DomainError::ZeroLimit {
                name: "recommendation",
            });
        }
        if self.graph_limit == 0 {
            return Err(DomainError::ZeroLimit { name: "graph" });
        }
        Ok(())
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

/// The graph section. Rendering failures stay inside it.
#[derive(Debug, Serialize)]
pub struct GraphSection {
    pub limit: usize,
    pub scene: GraphScene,
    #[serde(rename = "render_error", serialize_with = "render_error")]
    pub rendered: std::result::Result<String, GraphError>,
}

fn render_error<S: Serializer>(
    rendered: &std::result::Result<String, GraphError>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match rendered {
        Ok(_) => serializer.serialize_none(),
        Err(err) => serializer.serialize_some(&err.to_string()),
    }
}

/// Everything shown for a non-empty filtered view.
#[derive(Debug, Serialize)]
pub struct Report {
    pub thresholds: Thresholds,
    /// Size of the unfiltered store.
    pub total_rules: usize,
    pub loaded_at: DateTime<Utc>,
    pub summary: Summary,
    /// Selector options: distinct antecedents of the filtered view.
    pub items: Vec<String>,
    pub recommendation: Recommendation,
    pub view: Option<View>,
    pub graph: Option<GraphSection>,
    /// Filtered rules for the raw table.
    pub table: Option<Vec<Rule>>,
}

/// Result of one evaluation.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Evaluation {
    /// No rules artifact exists. The session cannot continue.
    Absent { location: PathBuf },
    /// Rules loaded but none pass the thresholds.
    NoMatches {
        thresholds: Thresholds,
        total_rules: usize,
    },
    Ready(Box<Report>),
}

/// One user's exploration session over a rule source.
pub struct Session<S> {
    cache: RuleCache<S>,
    renderer: Box<dyn GraphRenderer>,
    layout: LayoutParams,
}

impl<S: RuleSource> Session<S> {
    pub fn new(source: S, renderer: Box<dyn GraphRenderer>) -> Self {
        Self {
            cache: RuleCache::new(source),
            renderer,
            layout: LayoutParams::default(),
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutParams) -> Self {
        self.layout = layout;
        self
    }

    pub fn cache(&self) -> &RuleCache<S> {
        &self.cache
    }

    pub fn renderer(&self) -> &dyn GraphRenderer {
        self.renderer.as_ref()
    }

    /// Re-read the artifact on explicit request.
    pub fn refresh(&self) -> std::result::Result<Snapshot, StoreError> {
        self.cache.refresh()
    }

    /// Selector options under the given thresholds, `None` if the artifact
    /// is absent.
    pub fn items(&self, thresholds: &Thresholds) -> Result<Option<Vec<String>>> {
        thresholds.validate()?;
        let snapshot = self.cache.get()?;
        Ok(snapshot.store().map(|store| {
            filter_rules(Some(store), thresholds)
                .antecedents()
                .into_iter()
                .map(str::to_string)
                .collect()
        }))
    }

    /// Recompute every section for the current controls.
    #[instrument(skip_all, fields(
        min_support = controls.thresholds.min_support,
        min_confidence = controls.thresholds.min_confidence,
        min_lift = controls.thresholds.min_lift,
    ))]
    pub fn evaluate(&self, controls: &Controls) -> Result<Evaluation> {
        controls.validate()?;

        let Snapshot::Loaded(loaded) = self.cache.get()? else {
            return Ok(Evaluation::Absent {
                location: self.cache.source().location().to_path_buf(),
            });
        };

        let store = loaded.store.as_ref();
        let view = filter_rules(Some(store), &controls.thresholds);
        info!(total = store.len(), matched = view.len(), "Filtered rules");

        let Some(summary) = Summary::from_view(&view) else {
            return Ok(Evaluation::NoMatches {
                thresholds: controls.thresholds,
                total_rules: store.len(),
            });
        };

        let recommendation = Recommendation::lookup(
            &view,
            controls.selection.as_deref(),
            controls.recommend_limit,
        );
        let graph = controls
            .view
            .filter(|v| v.shows_graph())
            .map(|_| self.graph_section(&view, controls.graph_limit));
        let table = controls
            .view
            .filter(|v| v.shows_table())
            .map(|_| view.to_owned_rules());

        Ok(Evaluation::Ready(Box::new(Report {
            thresholds: controls.thresholds,
            total_rules: store.len(),
            loaded_at: loaded.loaded_at,
            summary,
            items: view.antecedents().into_iter().map(str::to_string).collect(),
            recommendation,
            view: controls.view,
            graph,
            table,
        })))
    }

    fn graph_section(&self, view: &FilteredView<'_>, limit: usize) -> GraphSection {
        let graph = build_graph(view, limit);
        let scene = lay_out(&graph, &self.layout);
        let rendered = self.renderer.render(&scene);
        if let Err(err) = &rendered {
            warn!(error = %err, "Graph rendering failed");
        }
        GraphSection {
            limit,
            scene,
            rendered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RuleStore;
    use crate::port::LoadOutcome;
    use std::path::Path;
    use std::time::SystemTime;

    struct FixedSource(Option<RuleStore>);

    impl RuleSource for FixedSource {
        fn location(&self) -> &Path {
            Path::new("memory://rules")
        }

        fn load(&self) -> std::result::Result<LoadOutcome, StoreError> {
            Ok(match &self.0 {
                Some(store) => LoadOutcome::Present(store.clone()),
                None => LoadOutcome::Absent,
            })
        }

        fn fingerprint(&self) -> std::result::Result<Option<SystemTime>, StoreError> {
            Ok(self.0.as_ref().map(|_| SystemTime::UNIX_EPOCH))
        }
    }

    struct EdgeCountRenderer;

    impl GraphRenderer for EdgeCountRenderer {
        fn extension(&self) -> &'static str {
            "txt"
        }

        fn render(&self, scene: &GraphScene) -> std::result::Result<String, GraphError> {
            Ok(scene.edges.len().to_string())
        }
    }

    struct BrokenRenderer;

    impl GraphRenderer for BrokenRenderer {
        fn extension(&self) -> &'static str {
            "txt"
        }

        fn render(&self, _scene: &GraphScene) -> std::result::Result<String, GraphError> {
            Err(GraphError::Empty)
        }
    }

    fn scenario_store() -> RuleStore {
        RuleStore::new(vec![
            Rule::new("A", "B", 0.05, 0.4, 1.2),
            Rule::new("A", "C", 0.05, 0.9, 2.0),
            Rule::new("D", "E", 0.01, 0.1, 0.9),
        ])
    }

    fn session(store: Option<RuleStore>) -> Session<FixedSource> {
        Session::new(FixedSource(store), Box::new(EdgeCountRenderer))
    }

    fn ready(evaluation: Evaluation) -> Report {
        match evaluation {
            Evaluation::Ready(report) => *report,
            other => panic!("expected a report, got {other:?}"),
        }
    }

    #[test]
    fn absent_store_halts() {
        let evaluation = session(None).evaluate(&Controls::default()).unwrap();
        assert!(matches!(evaluation, Evaluation::Absent { .. }));
    }

    #[test]
    fn no_matches_stops_before_sections() {
        let controls = Controls::new(Thresholds::try_new(0.5, 0.3, 1.0).unwrap());
        let evaluation = session(Some(scenario_store())).evaluate(&controls).unwrap();
        match evaluation {
            Evaluation::NoMatches { total_rules, .. } => assert_eq!(total_rules, 3),
            other => panic!("expected NoMatches, got {other:?}"),
        }
    }

    #[test]
    fn full_report_for_scenario() {
        let controls = Controls::new(Thresholds::try_new(0.03, 0.3, 1.0).unwrap())
            .select(Some("A"));
        let report = ready(session(Some(scenario_store())).evaluate(&controls).unwrap());

        assert_eq!(report.total_rules, 3);
        assert_eq!(report.summary.total_rules, 2);
        assert_eq!(report.items, vec!["A".to_string()]);
        match &report.recommendation {
            Recommendation::Found { rules, .. } => {
                assert_eq!(rules[0].consequent, "C");
                assert_eq!(rules[1].consequent, "B");
            }
            other => panic!("expected recommendations, got {other:?}"),
        }
        let graph = report.graph.as_ref().unwrap();
        assert_eq!(graph.scene.edges.len(), 2);
        assert_eq!(graph.rendered.as_deref().unwrap(), "2");
        assert_eq!(report.table.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn filtered_out_item_has_no_associations() {
        let controls = Controls::new(Thresholds::try_new(0.03, 0.3, 1.0).unwrap())
            .select(Some("D"));
        let report = ready(session(Some(scenario_store())).evaluate(&controls).unwrap());
        assert_eq!(
            report.recommendation,
            Recommendation::NoAssociations {
                item: "D".to_string()
            }
        );
    }

    #[test]
    fn placeholder_selection_means_none() {
        let controls = Controls::default().select(Some(NO_SELECTION));
        assert_eq!(controls.selection, None);
        let controls = Controls::default().select(Some("  "));
        assert_eq!(controls.selection, None);
    }

    #[test]
    fn view_selects_sections() {
        let session = session(Some(scenario_store()));

        let table_only = Controls::default().with_view(Some(View::Table));
        let report = ready(session.evaluate(&table_only).unwrap());
        assert!(report.graph.is_none());
        assert!(report.table.is_some());

        let neither = Controls::default().with_view(None);
        let report = ready(session.evaluate(&neither).unwrap());
        assert!(report.graph.is_none());
        assert!(report.table.is_none());
    }

    #[test]
    fn render_failure_is_contained() {
        let session = Session::new(FixedSource(Some(scenario_store())), Box::new(BrokenRenderer));
        let report = ready(session.evaluate(&Controls::default()).unwrap());
        let graph = report.graph.as_ref().unwrap();
        assert!(graph.rendered.is_err());
        assert_eq!(graph.scene.nodes.len(), 3);
        assert_eq!(report.summary.total_rules, 2);
        assert!(report.table.is_some());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["graph"]["render_error"], "graph has no nodes to draw");
    }

    #[test]
    fn invalid_controls_are_rejected() {
        let mut controls = Controls::default();
        controls.recommend_limit = 0;
        assert!(session(Some(scenario_store())).evaluate(&controls).is_err());
    }

    #[test]
    fn store_is_loaded_once_across_evaluations() {
        let session = session(Some(scenario_store()));
        session.evaluate(&Controls::default()).unwrap();
        session.evaluate(&Controls::default().select(Some("A"))).unwrap();
        assert_eq!(session.cache().load_count(), 1);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let session = session(Some(scenario_store()));
        let controls = Controls::default().select(Some("A"));
        let first = serde_json::to_value(ready(session.evaluate(&controls).unwrap())).unwrap();
        let second = serde_json::to_value(ready(session.evaluate(&controls).unwrap())).unwrap();
        assert_eq!(first, second);
    }
}
