//! Miette-based diagnostics for errors that end a session.
//!
//! The struct fields are read by miette's derive macros when the report is
//! rendered.

use std::path::Path;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError, Error, StoreError};

/// The rules artifact does not exist.
#[derive(Debug, Error, Diagnostic)]
#[error("rules file not found: {path}")]
#[diagnostic(code(rulelens::rules::missing))]
pub struct MissingRules {
    pub path: String,

    #[help]
    pub help: Option<String>,
}

impl MissingRules {
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            help: Some(format!(
                "run the rule-generation step first to produce {}, or point --rules, \
                 RULELENS_RULES or [rules] path at an existing file",
                path.display()
            )),
        }
    }
}

/// The rules artifact exists but cannot be interpreted.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(rulelens::rules::malformed))]
pub struct MalformedRules {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(rulelens::config))]
pub struct ConfigProblem {
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,
}

/// Build a rich diagnostic for errors that have one.
///
/// `config_path` is the file the configuration was read from, used to show
/// the offending TOML.
#[must_use]
pub fn for_error(err: &Error, config_path: Option<&Path>) -> Option<miette::Report> {
    match err {
        Error::RulesAbsent { location } => Some(miette::Report::new(MissingRules::new(location))),
        Error::Store(store) if store.is_data_format() => {
            Some(miette::Report::new(MalformedRules {
                message: store.to_string(),
                help: Some(malformed_help(store)),
            }))
        }
        Error::Config(ConfigError::Parse(parse)) => {
            let src = config_path
                .and_then(|path| std::fs::read_to_string(path).ok())
                .unwrap_or_default();
            let span = parse
                .span()
                .filter(|_| !src.is_empty())
                .map(|range| SourceSpan::from(range.start..range.end));
            Some(miette::Report::new(ConfigProblem {
                message: "failed to parse config".to_string(),
                src,
                span,
                help: Some(parse.message().to_string()),
            }))
        }
        _ => None,
    }
}

fn malformed_help(err: &StoreError) -> String {
    match err {
        StoreError::InvalidRow { .. } => {
            "support and confidence must lie in [0, 1], lift must be non-negative, \
             and item names must not be empty"
                .to_string()
        }
        _ => "expected a JSON array of objects with antecedent, consequent, support, \
              confidence and lift"
            .to_string(),
    }
}
