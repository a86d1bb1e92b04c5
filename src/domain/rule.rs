//! Association rules and the immutable rule store.

use std::fmt;
use std::slice;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// One mined association rule: "customers who buy `antecedent` also buy
/// `consequent`", with its quality metrics.
///
/// The mining tool writes plural column names (`antecedents`,
/// `consequents`); both spellings deserialize into the same fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(alias = "antecedents")]
    pub antecedent: String,
    #[serde(alias = "consequents")]
    pub consequent: String,
    /// Share of all transactions containing both items, in `[0, 1]`.
    pub support: f64,
    /// P(consequent | antecedent), in `[0, 1]`.
    pub confidence: f64,
    /// Observed over expected co-occurrence. 1.0 means independence.
    pub lift: f64,
}

impl Rule {
    /// Create a rule without validating its metrics.
    ///
    /// Use [`Rule::try_new`] for data coming from outside the process.
    pub fn new(
        antecedent: impl Into<String>,
        consequent: impl Into<String>,
        support: f64,
        confidence: f64,
        lift: f64,
    ) -> Self {
        Self {
            antecedent: antecedent.into(),
            consequent: consequent.into(),
            support,
            confidence,
            lift,
        }
    }

    /// Create a rule, rejecting out-of-range metrics and empty items.
    pub fn try_new(
        antecedent: impl Into<String>,
        consequent: impl Into<String>,
        support: f64,
        confidence: f64,
        lift: f64,
    ) -> Result<Self, DomainError> {
        let rule = Self::new(antecedent, consequent, support, confidence, lift);
        rule.validate()?;
        Ok(rule)
    }

    /// Check the rule's invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.antecedent.is_empty() {
            return Err(DomainError::EmptyItem { side: "antecedent" });
        }
        if self.consequent.is_empty() {
            return Err(DomainError::EmptyItem { side: "consequent" });
        }
        check_fraction("support", self.support)?;
        check_fraction("confidence", self.confidence)?;
        if !self.lift.is_finite() || self.lift < 0.0 {
            return Err(DomainError::MetricOutOfRange {
                metric: "lift",
                value: self.lift,
                expected: "[0, inf)",
            });
        }
        Ok(())
    }
}

fn check_fraction(metric: &'static str, value: f64) -> Result<(), DomainError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::MetricOutOfRange {
            metric,
            value,
            expected: "[0, 1]",
        })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} (support {:.3}, confidence {:.3}, lift {:.2})",
            self.antecedent, self.consequent, self.support, self.confidence, self.lift
        )
    }
}

/// Ordered, immutable sequence of rules as read from the artifact.
///
/// Duplicate (antecedent, consequent) pairs are kept as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleStore {
    rules: Vec<Rule>,
}

impl RuleStore {
    /// Wrap already-validated rules.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Validate every rule, reporting the zero-based row of the first
    /// violation.
    pub fn try_new(rules: Vec<Rule>) -> Result<Self, (usize, DomainError)> {
        for (row, rule) in rules.iter().enumerate() {
            rule.validate().map_err(|err| (row, err))?;
        }
        Ok(Self { rules })
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleStore {
    type Item = &'a Rule;
    type IntoIter = slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
