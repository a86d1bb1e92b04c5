//! CLI entry: resolve configuration, initialize logging, dispatch.

use std::path::Path;
use std::process::ExitCode;

use tracing::debug;

use crate::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand};
use crate::adapter::inbound::cli::dashboard::{self, Context};
use crate::adapter::inbound::cli::output::{self, OutputConfig};
use crate::adapter::inbound::cli::{config, diagnostic, explore};
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;

/// Run a parsed command line to completion.
pub fn execute(cli: Cli) -> ExitCode {
    output::configure(OutputConfig::new(cli.json, cli.quiet));
    output::set_color(cli.color.forced());

    // Creating a config must not depend on an existing one parsing.
    if let Commands::Config(ConfigCommand::Init(args)) = &cli.command {
        return finish(config::execute_init(&args.path, args.force), None);
    }

    let (mut config, config_path) = match Config::resolve(cli.config.as_deref()) {
        Ok(resolved) => resolved,
        Err(err) => return finish(Err(err), cli.config.as_deref()),
    };
    if let Some(rules) = &cli.rules {
        config.rules.path.clone_from(rules);
    }

    config.init_logging(cli.verbose);
    debug!(
        config = ?config_path,
        rules = %config.rules.path.display(),
        "Configuration resolved"
    );

    let ctx = Context::new(config, config_path);
    let result = dispatch(&ctx, &cli.command);
    finish(result, ctx.config_path.as_deref())
}

fn dispatch(ctx: &Context, command: &Commands) -> Result<()> {
    match command {
        Commands::Dashboard(args) => dashboard::execute_dashboard(ctx, args),
        Commands::Summary(filter) => dashboard::execute_summary(ctx, filter),
        Commands::Items(filter) => dashboard::execute_items(ctx, filter),
        Commands::Recommend(args) => dashboard::execute_recommend(ctx, args),
        Commands::Graph(args) => dashboard::execute_graph(ctx, args),
        Commands::Table(filter) => dashboard::execute_table(ctx, filter),
        Commands::Explore(filter) => explore::execute(ctx, filter),
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show) => config::execute_show(ctx),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(ctx),
    }
}

fn finish(result: Result<()>, config_path: Option<&Path>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, config_path);
            ExitCode::FAILURE
        }
    }
}

fn report_error(err: &Error, config_path: Option<&Path>) {
    if !output::is_json() {
        if let Some(report) = diagnostic::for_error(err, config_path) {
            eprintln!("{report:?}");
            return;
        }
    }
    output::error(&err.to_string());
}
