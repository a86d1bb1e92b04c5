//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. The
//! configuration is read from a TOML file; every section is optional and
//! falls back to the built-in defaults. The `RULELENS_RULES` environment
//! variable overrides the rules path.
//!
//! # Example
//!
//! ```no_run
//! use rulelens::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("rulelens.toml")?;
//!     config.init_logging(0);
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use crate::adapter::outbound::render::GraphStyle;
use crate::application::graph::{LayoutParams, DEFAULT_GRAPH_LIMIT};
use crate::application::DEFAULT_RECOMMENDATION_LIMIT;
use crate::domain::Thresholds;
use crate::error::{ConfigError, Result};

/// Environment variable that overrides `[rules] path`.
pub const RULES_PATH_ENV: &str = "RULELENS_RULES";

/// Config file looked up in the working directory when none is given.
pub const LOCAL_CONFIG_FILE: &str = "rulelens.toml";

/// Where the rules artifact lives.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RulesConfig {
    pub path: PathBuf,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("rules.json"),
        }
    }
}

/// Starting thresholds for a session.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    pub min_support: f64,
    pub min_confidence: f64,
    pub min_lift: f64,
}

impl FilterConfig {
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            min_support: self.min_support,
            min_confidence: self.min_confidence,
            min_lift: self.min_lift,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        let defaults = Thresholds::default();
        Self {
            min_support: defaults.min_support,
            min_confidence: defaults.min_confidence,
            min_lift: defaults.min_lift,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RecommendConfig {
    pub limit: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }
}

/// Graph selection, layout and canvas settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Number of highest-lift rules drawn.
    pub limit: usize,
    /// Spring layout optimal distance.
    pub k: f64,
    pub iterations: usize,
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    /// File the rendered graph is written to.
    pub output: PathBuf,
}

impl GraphConfig {
    #[must_use]
    pub fn layout(&self) -> LayoutParams {
        LayoutParams {
            k: self.k,
            iterations: self.iterations,
            seed: self.seed,
        }
    }

    #[must_use]
    pub fn style(&self) -> GraphStyle {
        GraphStyle {
            width: self.width,
            height: self.height,
            ..GraphStyle::default()
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        let layout = LayoutParams::default();
        let style = GraphStyle::default();
        Self {
            limit: DEFAULT_GRAPH_LIMIT,
            k: layout.k,
            iterations: layout.iterations,
            seed: layout.seed,
            width: style.width,
            height: style.height,
            output: PathBuf::from("association_graph.svg"),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub rules: RulesConfig,

    /// Default thresholds applied before any user adjustment.
    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub recommend: RecommendConfig,

    #[serde(default)]
    pub graph: GraphConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse and validate configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable, the TOML is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist. Without one, `rulelens.toml` in the
    /// working directory and then the per-user config file are tried, and
    /// the built-in defaults are used if neither exists. Environment
    /// overrides are applied last. Returns the file that was read, if any.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let candidate = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => [
                PathBuf::from(LOCAL_CONFIG_FILE),
                crate::adapter::inbound::cli::paths::default_config(),
            ]
            .into_iter()
            .find(|path| path.is_file()),
        };

        let mut config = match &candidate {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok((config, candidate))
    }

    /// Apply environment overrides.
    pub fn apply_env(&mut self) {
        if let Some(path) = std::env::var_os(RULES_PATH_ENV).filter(|v| !v.is_empty()) {
            self.rules.path = PathBuf::from(path);
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        self.filter
            .thresholds()
            .validate()
            .map_err(|err| ConfigError::InvalidValue {
                field: "filter",
                reason: err.to_string(),
            })?;

        if self.rules.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "rules.path",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if self.recommend.limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "recommend.limit",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.graph.limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "graph.limit",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !self.graph.k.is_finite() || self.graph.k <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "graph.k",
                reason: "must be a positive number".to_string(),
            }
            .into());
        }
        if self.graph.iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "graph.iterations",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        let style = self.graph.style();
        if !style.fits_canvas() {
            return Err(ConfigError::InvalidValue {
                field: "graph.width/height",
                reason: format!(
                    "canvas {}x{} leaves no room to draw; each side must exceed {} px",
                    style.width,
                    style.height,
                    style.min_side()
                ),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected 'pretty' or 'json', got '{}'", self.logging.format),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self, verbosity: u8) {
        self.logging.init(verbosity);
    }
}
