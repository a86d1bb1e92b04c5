//! Command-line interface definitions.
//!
//! Defines the CLI structure for rulelens using `clap`. Every report
//! subcommand shares the threshold flags in [`FilterArgs`]; values not given
//! on the command line come from the config file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::application::View;

/// Explore association rules mined from transaction data
#[derive(Parser, Debug)]
#[command(name = "rulelens")]
#[command(version)]
pub struct Cli {
    /// Path to a config file (default: ./rulelens.toml, then ~/.rulelens/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Rules file, overriding the config and RULELENS_RULES
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Forced color setting, `None` for terminal detection.
    #[must_use]
    pub fn forced(self) -> Option<bool> {
        match self {
            Self::Auto => None,
            Self::Always => Some(true),
            Self::Never => Some(false),
        }
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the full report: summary, recommendations, graph and table
    Dashboard(DashboardArgs),

    /// Show headline metrics for the filtered rules
    Summary(FilterArgs),

    /// List items that can be selected for recommendations
    Items(FilterArgs),

    /// Recommend items frequently bought with ITEM
    Recommend(RecommendArgs),

    /// Draw the association network of the strongest rules
    Graph(GraphArgs),

    /// Print the filtered rules as a table
    Table(FilterArgs),

    /// Adjust thresholds and selections interactively
    Explore(FilterArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Threshold overrides shared by report commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Minimum support (inclusive)
    #[arg(long, value_name = "VALUE")]
    pub min_support: Option<f64>,

    /// Minimum confidence (inclusive)
    #[arg(long, value_name = "VALUE")]
    pub min_confidence: Option<f64>,

    /// Minimum lift (inclusive)
    #[arg(long, value_name = "VALUE")]
    pub min_lift: Option<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Item to show recommendations for
    #[arg(long)]
    pub item: Option<String>,

    /// Detail sections to show below the summary
    #[arg(long, value_enum, default_value = "both")]
    pub view: ViewArg,

    /// Where to write the graph (default from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RecommendArgs {
    /// Item bought by the customer
    pub item: String,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Maximum number of recommendations
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Number of highest-lift rules to draw
    #[arg(long)]
    pub limit: Option<usize>,

    /// Where to write the graph (default from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Detail view selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Graph,
    Table,
    Both,
    /// Summary and recommendations only
    None,
}

impl From<ViewArg> for Option<View> {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Graph => Some(View::Graph),
            ViewArg::Table => Some(View::Table),
            ViewArg::Both => Some(View::Both),
            ViewArg::None => None,
        }
    }
}

/// Subcommands for `rulelens config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Destination path
    #[arg(default_value = "rulelens.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
