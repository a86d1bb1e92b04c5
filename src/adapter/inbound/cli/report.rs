//! Human-readable rendering of report sections.

use std::path::Path;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::application::{GraphSection, Recommendation, Report, Summary};
use crate::domain::{GraphScene, Rule, Thresholds};
use crate::error::GraphError;

pub const NO_MATCHES: &str = "No rules found with these settings. Try lowering the filters";

#[derive(Tabled)]
struct RuleRow {
    antecedent: String,
    consequent: String,
    support: String,
    confidence: String,
    lift: String,
}

impl From<&Rule> for RuleRow {
    fn from(rule: &Rule) -> Self {
        Self {
            antecedent: rule.antecedent.clone(),
            consequent: rule.consequent.clone(),
            support: format!("{:.4}", rule.support),
            confidence: format!("{:.4}", rule.confidence),
            lift: format!("{:.4}", rule.lift),
        }
    }
}

pub fn thresholds(thresholds: &Thresholds) {
    output::note(&format!(
        "min support {} · min confidence {} · min lift {}",
        thresholds.min_support, thresholds.min_confidence, thresholds.min_lift
    ));
}

/// Metric cards.
pub fn summary(summary: &Summary) {
    output::section("Summary");
    output::field("Total rules", summary.total_rules);
    output::field(
        "Avg confidence",
        format!("{:.2}%", summary.average_confidence * 100.0),
    );
    output::field("Avg lift", format!("{:.2}", summary.average_lift));
    output::field(
        "Strongest link",
        format!("{:.2}x", summary.strongest_lift),
    );
}

pub fn recommendation_line(rule: &Rule) -> String {
    format!(
        "{} (Confidence: {:.0}%, Lift: {:.2})",
        rule.consequent,
        rule.confidence * 100.0,
        rule.lift
    )
}

pub fn recommendation(recommendation: &Recommendation) {
    match recommendation {
        Recommendation::NoSelection => {
            output::hint("pass --item to see what customers buy alongside it");
        }
        Recommendation::NoAssociations { item } => {
            output::section("Recommendations");
            output::warning(&format!(
                "No strong associations found for {item} with current settings."
            ));
        }
        Recommendation::Found { item, rules } => {
            output::section(&format!("Customers who buy {item} also buy:"));
            for rule in rules {
                output::pointer(&recommendation_line(rule));
            }
        }
    }
}

/// Write the rendered graph and describe it. Failures stay in this section.
pub fn graph(section: &GraphSection, path: &Path) {
    output::section("Association Network");
    output::note(&format!(
        "Visualizing the top {} strongest rules (by Lift)",
        section.limit
    ));

    let written = match &section.rendered {
        Ok(rendered) => write_graph(rendered, path),
        Err(err) => {
            output::warning(&format!("Could not draw graph: {err}"));
            return;
        }
    };
    output::field("Nodes", section.scene.nodes.len());
    output::field("Edges", section.scene.edges.len());
    output::lines(&edge_listing(&section.scene));
    match written {
        Ok(()) => output::success(&format!("Graph written to {}", path.display())),
        Err(err) => output::warning(&format!("Could not save graph: {err}")),
    }
}

/// One `source -> target (lift)` line per edge, in drawing order.
pub fn edge_listing(scene: &GraphScene) -> String {
    scene
        .edges
        .iter()
        .map(|edge| format!("{} -> {}  ({})", edge.source, edge.target, edge.label))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Persist a rendered graph to `path`, creating parent directories.
pub fn write_graph(rendered: &str, path: &Path) -> Result<(), GraphError> {
    let write_error = |source| GraphError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, rendered).map_err(write_error)
}

pub fn table(rules: &[Rule]) {
    output::section("Raw Data");
    if output::is_quiet() {
        return;
    }
    let rows: Vec<RuleRow> = rules.iter().map(RuleRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    output::lines(&table.to_string());
}

/// Every section of a ready report, in dashboard order.
pub fn full(report: &Report, graph_path: &Path) {
    thresholds(&report.thresholds);
    summary(&report.summary);
    recommendation(&report.recommendation);
    if let Some(section) = &report.graph {
        graph(section, graph_path);
    }
    if let Some(rules) = &report.table {
        table(rules);
    }
}
