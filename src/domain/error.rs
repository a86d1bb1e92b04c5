//! Domain validation errors for rule data and filter thresholds.
//!
//! # Examples
//!
//! ```
//! use rulelens::domain::error::DomainError;
//! use rulelens::domain::Rule;
//!
//! let result = Rule::try_new("bread", "butter", 1.4, 0.5, 2.0);
//! assert!(matches!(result, Err(DomainError::MetricOutOfRange { metric: "support", .. })));
//! ```

use thiserror::Error;

/// Errors that occur when rule or threshold invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A quality metric fell outside its valid range.
    #[error("{metric} must be within {expected}, got {value}")]
    MetricOutOfRange {
        /// Metric name (`support`, `confidence` or `lift`).
        metric: &'static str,
        /// The offending value.
        value: f64,
        /// Human-readable description of the valid range.
        expected: &'static str,
    },

    /// Item identifiers must be non-empty.
    #[error("{side} item cannot be empty")]
    EmptyItem {
        /// Which side of the rule was empty.
        side: &'static str,
    },

    /// Filter thresholds must be finite and non-negative.
    #[error("minimum {metric} must be a non-negative number, got {value}")]
    InvalidThreshold { metric: &'static str, value: f64 },

    /// Result caps must allow at least one row.
    #[error("{name} limit must be at least 1")]
    ZeroLimit { name: &'static str },
}
