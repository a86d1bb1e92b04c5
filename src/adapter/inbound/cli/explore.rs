//! Interactive exploration loop.
//!
//! Each pass prints the report for the current controls and then asks for
//! one change. The rules file is read once and reused until it changes on
//! disk or a reload is requested.

use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::adapter::inbound::cli::command::FilterArgs;
use crate::adapter::inbound::cli::dashboard::{evaluate, Context};
use crate::adapter::inbound::cli::{output, report};
use crate::application::{Controls, View, NO_SELECTION};
use crate::domain::{ThresholdRange, CONFIDENCE_RANGE, LIFT_RANGE, SUPPORT_RANGE};
use crate::error::{ConfigError, Error, Result};

const ACTIONS: &[&str] = &[
    "Minimum support",
    "Minimum confidence",
    "Minimum lift",
    "Select item",
    "Switch view",
    "Reload rules",
    "Quit",
];

const VIEWS: &[(&str, Option<View>)] = &[
    ("Graph", Some(View::Graph)),
    ("Table", Some(View::Table)),
    ("Both", Some(View::Both)),
    ("Summary only", None),
];

/// Parse a threshold typed at the prompt, enforcing the suggested range.
pub fn parse_threshold(input: &str, range: &ThresholdRange) -> std::result::Result<f64, String> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", input.trim()))?;
    if !range.contains(value) {
        return Err(format!(
            "{} must be between {} and {}",
            range.metric, range.min, range.max
        ));
    }
    Ok(value)
}

/// Selector entries: the placeholder followed by the available items.
#[must_use]
pub fn selector_entries(items: &[String]) -> Vec<&str> {
    std::iter::once(NO_SELECTION)
        .chain(items.iter().map(String::as_str))
        .collect()
}

fn prompt_threshold(theme: &ColorfulTheme, range: &ThresholdRange, current: f64) -> Result<f64> {
    let text: String = Input::with_theme(theme)
        .with_prompt(format!(
            "Minimum {} ({}..{}, step {})",
            range.metric, range.min, range.max, range.step
        ))
        .default(current.to_string())
        .validate_with(|text: &String| parse_threshold(text, range).map(|_| ()))
        .interact_text()?;
    parse_threshold(&text, range).map_err(Error::Prompt)
}

/// Execute `rulelens explore`.
pub fn execute(ctx: &Context, filter: &FilterArgs) -> Result<()> {
    if output::is_json() {
        return Err(ConfigError::InvalidValue {
            field: "json",
            reason: "`rulelens explore` is interactive; use `rulelens dashboard --json` instead"
                .to_string(),
        }
        .into());
    }

    let theme = ColorfulTheme::default();
    let session = ctx.session();
    let mut controls: Controls = ctx.controls(filter)?;
    let graph_path = ctx.config.graph.output.clone();

    output::header(env!("CARGO_PKG_VERSION"));

    loop {
        if let Some(report) = evaluate(&session, &controls)? {
            report::full(&report, &graph_path);
        }
        println!();

        let action = Select::with_theme(&theme)
            .with_prompt("Change")
            .items(ACTIONS)
            .default(0)
            .interact()?;

        let thresholds = &mut controls.thresholds;
        match action {
            0 => {
                thresholds.min_support =
                    prompt_threshold(&theme, &SUPPORT_RANGE, thresholds.min_support)?;
            }
            1 => {
                thresholds.min_confidence =
                    prompt_threshold(&theme, &CONFIDENCE_RANGE, thresholds.min_confidence)?;
            }
            2 => {
                thresholds.min_lift = prompt_threshold(&theme, &LIFT_RANGE, thresholds.min_lift)?;
            }
            3 => {
                let items = session.items(&controls.thresholds)?.unwrap_or_default();
                let entries = selector_entries(&items);
                let current = controls
                    .selection
                    .as_deref()
                    .and_then(|item| entries.iter().position(|e| *e == item))
                    .unwrap_or(0);
                let picked = Select::with_theme(&theme)
                    .with_prompt("Customer buys")
                    .items(&entries)
                    .default(current)
                    .interact()?;
                let choice = entries.get(picked).copied();
                controls = controls.select(choice);
            }
            4 => {
                let labels: Vec<&str> = VIEWS.iter().map(|(label, _)| *label).collect();
                let current = VIEWS
                    .iter()
                    .position(|(_, view)| *view == controls.view)
                    .unwrap_or(0);
                let picked = Select::with_theme(&theme)
                    .with_prompt("Show")
                    .items(&labels)
                    .default(current)
                    .interact()?;
                controls.view = VIEWS.get(picked).and_then(|(_, view)| *view);
            }
            5 => {
                session.refresh()?;
                output::success("Rules reloaded");
            }
            _ => return Ok(()),
        }
    }
}
