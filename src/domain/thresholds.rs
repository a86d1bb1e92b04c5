//! Lower-bound thresholds on the three rule quality metrics.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::rule::Rule;

/// Suggested bounds and default for one interactive threshold control.
///
/// These shape prompts only; [`Thresholds`] itself accepts any
/// non-negative value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdRange {
    pub metric: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl ThresholdRange {
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const SUPPORT_RANGE: ThresholdRange = ThresholdRange {
    metric: "support",
    min: 0.01,
    max: 0.2,
    step: 0.01,
    default: 0.03,
};

pub const CONFIDENCE_RANGE: ThresholdRange = ThresholdRange {
    metric: "confidence",
    min: 0.1,
    max: 1.0,
    step: 0.05,
    default: 0.3,
};

pub const LIFT_RANGE: ThresholdRange = ThresholdRange {
    metric: "lift",
    min: 1.0,
    max: 10.0,
    step: 0.1,
    default: 1.0,
};

/// Inclusive minimums for support, confidence and lift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub min_support: f64,
    pub min_confidence: f64,
    pub min_lift: f64,
}

impl Thresholds {
    /// Create thresholds, rejecting negative or non-finite values.
    pub fn try_new(
        min_support: f64,
        min_confidence: f64,
        min_lift: f64,
    ) -> Result<Self, DomainError> {
        let thresholds = Self {
            min_support,
            min_confidence,
            min_lift,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        for (metric, value) in [
            ("support", self.min_support),
            ("confidence", self.min_confidence),
            ("lift", self.min_lift),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::InvalidThreshold { metric, value });
            }
        }
        Ok(())
    }

    /// True when the rule meets all three minimums.
    #[must_use]
    pub fn admits(&self, rule: &Rule) -> bool {
        rule.support >= self.min_support
            && rule.confidence >= self.min_confidence
            && rule.lift >= self.min_lift
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_support: SUPPORT_RANGE.default,
            min_confidence: CONFIDENCE_RANGE.default,
            min_lift: LIFT_RANGE.default,
        }
    }
}
