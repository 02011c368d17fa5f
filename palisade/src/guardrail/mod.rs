//! Guardrail module — safety checks for chat inputs and outputs.
//!
//! Guardrails are validation checks that run around agent response
//! generation to ensure both the user's request and the generated reply
//! meet topic, length, and content policy.
//!
//! The module provides a fixed, small set of validators behind a tagged
//! enum dispatch:
//!
//! - **[`TopicRestriction`]** — keeps the conversation on an allow-listed
//!   set of topics (input side by default).
//! - **[`ReadingTime`]** — rejects replies that would take too long to
//!   read (output side by default).
//! - **[`ForbiddenContent`]** — blocks dark web-related terms in either
//!   direction.
//!
//! # Evaluation
//!
//! The [`Evaluator`] runs every validator applicable to a
//! [`Direction`] in a fixed deterministic order (topic, reading time,
//! forbidden content) and aggregates the results into an [`Outcome`].
//! Every applicable validator always runs, even after the first failure,
//! so the audit trail reports every triggered check; only the first
//! [`Violation`] selects the user-facing substitution.
//!
//! A validator that cannot run (bad configuration, unreachable
//! classifier) is a hard [`ValidatorError`](crate::error::ValidatorError),
//! never a silent pass.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use palisade::prelude::*;
//!
//! let config = GuardrailConfig::default();
//! let evaluator = Evaluator::from_config(&config)?;
//!
//! let outcome = evaluator.evaluate("Tell me about the World Cup final.", Direction::Input)?;
//! assert!(!outcome.passed());
//! assert_eq!(outcome.violations()[0].category, Category::Topic);
//! ```

mod evaluator;
mod forbidden;
mod reading_time;
mod topic;

pub use evaluator::{Evaluator, ValidatorSpec};
pub use forbidden::ForbiddenContent;
pub(crate) use forbidden::DEFAULT_FORBIDDEN_TERMS;
pub use reading_time::{ReadingTime, WORDS_PER_MINUTE};
pub use topic::{KeywordTopicClassifier, TopicClassifier, TopicRestriction};

use serde::{Deserialize, Serialize};

/// Which side of the exchange a text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The user's inbound message, before the agent sees it.
    Input,
    /// The agent's draft reply, before the user sees it.
    Output,
}

impl Direction {
    /// String form used in logs and monitoring records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which directions a validator applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Applicability {
    /// Check inbound user messages only.
    Input,
    /// Check agent draft replies only.
    Output,
    /// Check both directions.
    Both,
}

impl Applicability {
    /// Returns `true` if a validator with this applicability should run
    /// for the given direction.
    #[must_use]
    pub const fn matches(self, direction: Direction) -> bool {
        match self {
            Self::Both => true,
            Self::Input => matches!(direction, Direction::Input),
            Self::Output => matches!(direction, Direction::Output),
        }
    }
}

/// The fixed category vocabulary for guardrail checks.
///
/// A blocked [`ChatResponse`](crate::message::ChatResponse) carries its
/// category in the source tag as `guardrail:<category>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Subject matter outside the allowed topic list.
    Topic,
    /// Estimated reading time above the configured ceiling.
    ReadingTime,
    /// Dark web-related content.
    #[serde(rename = "darkweb")]
    DarkWeb,
}

impl Category {
    /// String form used in source tags (`guardrail:<category>`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Topic => "topic",
            Self::ReadingTime => "reading_time",
            Self::DarkWeb => "darkweb",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How serious a violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Recorded for monitoring but does not block on its own.
    Informational,
    /// Blocks the exchange and triggers substitution.
    Blocking,
}

/// A structured record of one failed validator check.
///
/// Produced only when a check fails; never persisted beyond the single
/// exchange it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Name of the validator that failed.
    pub validator: String,
    /// Category of the failed check.
    pub category: Category,
    /// Human-readable failure detail.
    pub detail: String,
    /// Severity of the violation.
    pub severity: Severity,
}

impl Violation {
    /// Create a blocking violation.
    #[must_use]
    pub fn blocking(
        validator: impl Into<String>,
        category: Category,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            validator: validator.into(),
            category,
            detail: detail.into(),
            severity: Severity::Blocking,
        }
    }
}

/// The aggregated result of running all applicable validators once.
///
/// One `Outcome` per [`Evaluator::evaluate`] call; immutable after
/// construction. The violation list preserves evaluation order, so the
/// first entry is the one that selects the substitution message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    passed: bool,
    violations: Vec<Violation>,
    text: String,
    direction: Direction,
}

impl Outcome {
    /// Build an outcome from the violations collected during evaluation.
    ///
    /// An empty violation list means the text passed.
    #[must_use]
    pub fn new(text: impl Into<String>, direction: Direction, violations: Vec<Violation>) -> Self {
        Self {
            passed: violations.is_empty(),
            violations,
            text: text.into(),
            direction,
        }
    }

    /// Whether every applicable validator passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.passed
    }

    /// All violations, in evaluation order (empty on pass).
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The first violation, which determines the substitution message.
    #[must_use]
    pub fn leading_violation(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// The text that was evaluated.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Which direction was checked.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applicability_matching() {
        assert!(Applicability::Both.matches(Direction::Input));
        assert!(Applicability::Both.matches(Direction::Output));
        assert!(Applicability::Input.matches(Direction::Input));
        assert!(!Applicability::Input.matches(Direction::Output));
        assert!(!Applicability::Output.matches(Direction::Input));
    }

    #[test]
    fn test_category_tags() {
        assert_eq!(Category::Topic.as_str(), "topic");
        assert_eq!(Category::ReadingTime.as_str(), "reading_time");
        assert_eq!(Category::DarkWeb.as_str(), "darkweb");
    }

    #[test]
    fn test_outcome_pass_fail() {
        let pass = Outcome::new("hello", Direction::Input, Vec::new());
        assert!(pass.passed());
        assert!(pass.leading_violation().is_none());

        let violation = Violation::blocking("topic_restriction", Category::Topic, "off-topic");
        let fail = Outcome::new("hello", Direction::Input, vec![violation]);
        assert!(!fail.passed());
        assert_eq!(
            fail.leading_violation().map(|v| v.category),
            Some(Category::Topic)
        );
    }
}
