//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::dashboard::Context;
use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
pub const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note(&format!(
        "2. Run: rulelens config validate -c {}",
        path.display()
    ));
    output::note(&format!("3. Run: rulelens dashboard -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if output::is_json() {
        output::json_output(json!({
            "source": ctx.config_path.as_ref().map(|p| p.display().to_string()),
            "config": serde_json::to_value(config)?,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    match &ctx.config_path {
        Some(path) => output::field("Source", path.display()),
        None => output::field("Source", "built-in defaults"),
    }

    output::section("Rules");
    output::field("Path", config.rules.path.display());

    output::section("Filter");
    output::field("Min support", config.filter.min_support);
    output::field("Min confidence", config.filter.min_confidence);
    output::field("Min lift", config.filter.min_lift);

    output::section("Recommendations");
    output::field("Limit", config.recommend.limit);

    output::section("Graph");
    output::field("Limit", config.graph.limit);
    output::field("k", config.graph.k);
    output::field("Iterations", config.graph.iterations);
    output::field("Seed", config.graph.seed);
    output::field(
        "Canvas",
        format!("{}x{}", config.graph.width, config.graph.height),
    );
    output::field("Output", config.graph.output.display());

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    Ok(())
}

/// Execute `config validate`.
///
/// Validates the file given with `--config`, or the one that was resolved.
pub fn execute_validate(ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        output::note("No config file found; built-in defaults are in use");
        return Ok(());
    };

    output::section("Config Validation");
    output::field("Path", path.display());
    Config::load(path)?;
    output::success("Config file is valid");
    output::field("Next", format!("rulelens config show -c {}", path.display()));

    Ok(())
}
