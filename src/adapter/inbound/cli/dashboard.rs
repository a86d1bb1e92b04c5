//! Handlers for the report commands.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::adapter::inbound::cli::command::{
    DashboardArgs, FilterArgs, GraphArgs, RecommendArgs,
};
use crate::adapter::inbound::cli::{output, report};
use crate::adapter::outbound::render::SvgRenderer;
use crate::adapter::outbound::store::JsonRuleFile;
use crate::application::{Controls, Evaluation, Report, Session, View};
use crate::domain::Thresholds;
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::RuleSource;

/// Resolved configuration shared by the command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    #[must_use]
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// A fresh session over the configured rules file.
    #[must_use]
    pub fn session(&self) -> Session<JsonRuleFile> {
        let graph = &self.config.graph;
        Session::new(
            JsonRuleFile::new(&self.config.rules.path),
            Box::new(SvgRenderer::new(graph.style())),
        )
        .with_layout(graph.layout())
    }

    /// Configured thresholds with command-line overrides applied.
    pub fn thresholds(&self, filter: &FilterArgs) -> Result<Thresholds> {
        let base = self.config.filter.thresholds();
        Ok(Thresholds::try_new(
            filter.min_support.unwrap_or(base.min_support),
            filter.min_confidence.unwrap_or(base.min_confidence),
            filter.min_lift.unwrap_or(base.min_lift),
        )?)
    }

    /// Controls seeded from config and command-line overrides.
    pub fn controls(&self, filter: &FilterArgs) -> Result<Controls> {
        let mut controls = Controls::new(self.thresholds(filter)?);
        controls.recommend_limit = self.config.recommend.limit;
        controls.graph_limit = self.config.graph.limit;
        Ok(controls)
    }
}

/// Evaluate the controls and resolve the session-level outcomes.
///
/// Returns `Ok(None)` after reporting that nothing matched. An absent
/// artifact becomes [`Error::RulesAbsent`].
pub fn evaluate<S: RuleSource>(
    session: &Session<S>,
    controls: &Controls,
) -> Result<Option<Box<Report>>> {
    let spinner = output::spinner("Crunching rules...");
    let evaluation = session.evaluate(controls);
    output::spinner_clear(&spinner);

    match evaluation? {
        Evaluation::Absent { location } => Err(Error::RulesAbsent { location }),
        evaluation @ Evaluation::NoMatches { .. } => {
            if output::is_json() {
                output::json_output(serde_json::to_value(&evaluation)?);
            } else {
                report::thresholds(&controls.thresholds);
                output::warning(report::NO_MATCHES);
            }
            Ok(None)
        }
        Evaluation::Ready(report) => Ok(Some(report)),
    }
}

/// Write the graph in JSON mode. Returns the path on success or the error text.
fn save_graph_quietly(report: &Report, path: &Path) -> serde_json::Value {
    let Some(section) = &report.graph else {
        return serde_json::Value::Null;
    };
    match &section.rendered {
        Ok(rendered) => match report::write_graph(rendered, path) {
            Ok(()) => json!({ "output": path.display().to_string() }),
            Err(err) => json!({ "error": err.to_string() }),
        },
        Err(err) => json!({ "error": err.to_string() }),
    }
}

/// Execute `rulelens dashboard`.
pub fn execute_dashboard(ctx: &Context, args: &DashboardArgs) -> Result<()> {
    let controls = ctx
        .controls(&args.filter)?
        .select(args.item.as_deref())
        .with_view(args.view.into());
    let graph_path = args
        .output
        .clone()
        .unwrap_or_else(|| ctx.config.graph.output.clone());

    let session = ctx.session();
    let Some(report) = evaluate(&session, &controls)? else {
        return Ok(());
    };

    if output::is_json() {
        let saved = save_graph_quietly(&report, &graph_path);
        let mut value = serde_json::to_value(Evaluation::Ready(report))?;
        if let Some(object) = value.as_object_mut() {
            object.insert("graph_file".to_string(), saved);
        }
        output::json_output(value);
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    report::full(&report, &graph_path);
    Ok(())
}

/// Execute `rulelens summary`.
pub fn execute_summary(ctx: &Context, filter: &FilterArgs) -> Result<()> {
    let controls = ctx.controls(filter)?.with_view(None);
    let Some(report) = evaluate(&ctx.session(), &controls)? else {
        return Ok(());
    };

    if output::is_json() {
        output::json_output(json!({
            "status": "ready",
            "thresholds": report.thresholds,
            "loaded_rules": report.total_rules,
            "summary": report.summary,
        }));
        return Ok(());
    }

    report::thresholds(&report.thresholds);
    report::summary(&report.summary);
    Ok(())
}

/// Execute `rulelens items`.
pub fn execute_items(ctx: &Context, filter: &FilterArgs) -> Result<()> {
    let thresholds = ctx.thresholds(filter)?;
    let session = ctx.session();
    let items = session
        .items(&thresholds)?
        .ok_or_else(|| Error::RulesAbsent {
            location: session.cache().source().location().to_path_buf(),
        })?;

    if output::is_json() {
        output::json_output(json!({ "items": items }));
        return Ok(());
    }

    if items.is_empty() {
        output::warning(report::NO_MATCHES);
        return Ok(());
    }
    output::section(&format!("Items ({})", items.len()));
    output::lines(&items.join("\n"));
    Ok(())
}

/// Execute `rulelens recommend`.
pub fn execute_recommend(ctx: &Context, args: &RecommendArgs) -> Result<()> {
    let mut controls = ctx
        .controls(&args.filter)?
        .select(Some(args.item.as_str()))
        .with_view(None);
    if let Some(limit) = args.limit {
        controls.recommend_limit = limit;
    }

    let Some(report) = evaluate(&ctx.session(), &controls)? else {
        return Ok(());
    };

    if output::is_json() {
        output::json_output(json!({
            "status": "ready",
            "recommendation": report.recommendation,
        }));
        return Ok(());
    }

    report::recommendation(&report.recommendation);
    Ok(())
}

/// Execute `rulelens graph`.
pub fn execute_graph(ctx: &Context, args: &GraphArgs) -> Result<()> {
    let mut controls = ctx.controls(&args.filter)?.with_view(Some(View::Graph));
    if let Some(limit) = args.limit {
        controls.graph_limit = limit;
    }
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| ctx.config.graph.output.clone());

    let Some(report) = evaluate(&ctx.session(), &controls)? else {
        return Ok(());
    };

    if output::is_json() {
        let saved = save_graph_quietly(&report, &path);
        output::json_output(json!({
            "status": "ready",
            "graph": report.graph,
            "graph_file": saved,
        }));
        return Ok(());
    }

    if let Some(section) = &report.graph {
        report::graph(section, &path);
    }
    Ok(())
}

/// Execute `rulelens table`.
pub fn execute_table(ctx: &Context, filter: &FilterArgs) -> Result<()> {
    let controls = ctx.controls(filter)?.with_view(Some(View::Table));
    let Some(report) = evaluate(&ctx.session(), &controls)? else {
        return Ok(());
    };

    if output::is_json() {
        output::json_output(json!({
            "status": "ready",
            "rules": report.table,
        }));
        return Ok(());
    }

    if let Some(rules) = &report.table {
        report::table(rules);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_configured_thresholds() {
        let ctx = Context::new(Config::default(), None);
        let filter = FilterArgs {
            min_lift: Some(2.0),
            ..FilterArgs::default()
        };
        let thresholds = ctx.thresholds(&filter).unwrap();
        assert_eq!(thresholds.min_lift, 2.0);
        assert_eq!(thresholds.min_support, 0.03);
    }

    #[test]
    fn negative_override_is_rejected() {
        let ctx = Context::new(Config::default(), None);
        let filter = FilterArgs {
            min_support: Some(-0.1),
            ..FilterArgs::default()
        };
        assert!(matches!(ctx.thresholds(&filter), Err(Error::Domain(_))));
    }

    #[test]
    fn controls_take_limits_from_config() {
        let mut config = Config::default();
        config.recommend.limit = 2;
        config.graph.limit = 7;
        let controls = Context::new(config, None)
            .controls(&FilterArgs::default())
            .unwrap();
        assert_eq!(controls.recommend_limit, 2);
        assert_eq!(controls.graph_limit, 7);
    }
}
