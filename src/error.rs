use std::path::PathBuf;

use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised while reading the persisted rule table.
///
/// A missing file is deliberately absent from this list: it is reported as
/// [`crate::port::LoadOutcome::Absent`], not as a failure.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read rules from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed rules file {}: {reason}", path.display())]
    DataFormat { path: PathBuf, reason: String },

    #[error("malformed rule at row {row} of {}: {source}", path.display())]
    InvalidRow {
        path: PathBuf,
        row: usize,
        #[source]
        source: DomainError,
    },
}

impl StoreError {
    /// True for errors caused by the artifact's contents rather than I/O.
    #[must_use]
    pub fn is_data_format(&self) -> bool {
        matches!(self, Self::DataFormat { .. } | Self::InvalidRow { .. })
    }
}

/// Graph rendering errors. These are scoped to the graph section.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("graph has no nodes to draw")]
    Empty,

    #[error("layout produced a non-finite position for node '{node}'")]
    NonFinitePosition { node: String },

    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("failed to write graph to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The session cannot start because no rules artifact exists.
    #[error("no rules file at {}", location.display())]
    RulesAbsent { location: PathBuf },

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt error: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}
