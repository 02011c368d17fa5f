//! Evaluator — ordered validator dispatch per direction.
//!
//! The [`Evaluator`] owns the configured validator set and runs the
//! applicable subset for a direction in a fixed deterministic order:
//! topic restriction, reading time, forbidden content. The order matches
//! the presentation order of the checks everywhere they are surfaced, so
//! results are reproducible for tests and screenshots.

use std::sync::Arc;

use tracing::debug;

use crate::config::GuardrailConfig;
use crate::error::ValidatorResult;

use super::{
    Applicability, Category, Direction, ForbiddenContent, Outcome, ReadingTime, TopicClassifier,
    TopicRestriction, Violation,
};

/// One configured guardrail check.
///
/// Tagged-variant dispatch over the fixed validator set; there is no
/// registry and no late-bound plugin discovery. Adding a check means
/// adding a variant here.
#[derive(Debug, Clone)]
pub enum ValidatorSpec {
    /// Allow-listed topic restriction.
    TopicRestriction(TopicRestriction),
    /// Reading time ceiling.
    ReadingTime(ReadingTime),
    /// Dark web term blocking.
    ForbiddenContent(ForbiddenContent),
}

impl ValidatorSpec {
    /// The category this validator reports under.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::TopicRestriction(_) => Category::Topic,
            Self::ReadingTime(_) => Category::ReadingTime,
            Self::ForbiddenContent(_) => Category::DarkWeb,
        }
    }

    /// Which directions this validator applies to.
    #[must_use]
    pub const fn applicability(&self) -> Applicability {
        match self {
            Self::TopicRestriction(v) => v.applicability(),
            Self::ReadingTime(v) => v.applicability(),
            Self::ForbiddenContent(v) => v.applicability(),
        }
    }

    /// Run this validator's check against a text.
    ///
    /// `Ok(None)` is a pass, `Ok(Some(violation))` an expected validation
    /// failure; `Err` means the check could not run at all.
    ///
    /// # Errors
    ///
    /// Propagates the validator's configuration or classifier error.
    pub fn check(&self, text: &str) -> ValidatorResult<Option<Violation>> {
        match self {
            Self::TopicRestriction(v) => v.check(text),
            Self::ReadingTime(v) => v.check(text),
            Self::ForbiddenContent(v) => v.check(text),
        }
    }
}

/// Runs the configured validator set against a text and aggregates the
/// results into an [`Outcome`].
///
/// The evaluator is immutable after construction and safe to share via
/// [`Arc`] across concurrently in-flight exchanges.
#[derive(Debug, Clone)]
pub struct Evaluator {
    specs: Vec<ValidatorSpec>,
}

impl Evaluator {
    /// Create an evaluator over an explicit validator list.
    ///
    /// The list order is the evaluation order; prefer
    /// [`Evaluator::from_config`] for the standard set.
    #[must_use]
    pub fn new(specs: Vec<ValidatorSpec>) -> Self {
        Self { specs }
    }

    /// Build the standard validator set from configuration, in the fixed
    /// order topic → reading time → forbidden content.
    ///
    /// # Errors
    ///
    /// Returns the underlying error if the forbidden term set fails to
    /// compile.
    pub fn from_config(config: &GuardrailConfig) -> ValidatorResult<Self> {
        let topic = TopicRestriction::new(config.allowed_topics.iter().cloned());
        Self::build(config, topic)
    }

    /// Like [`Evaluator::from_config`], but with an injected topic
    /// classifier in place of the built-in keyword table.
    ///
    /// # Errors
    ///
    /// Returns the underlying error if the forbidden term set fails to
    /// compile.
    pub fn from_config_with_classifier(
        config: &GuardrailConfig,
        classifier: Arc<dyn TopicClassifier>,
    ) -> ValidatorResult<Self> {
        let topic =
            TopicRestriction::new(config.allowed_topics.iter().cloned()).with_classifier(classifier);
        Self::build(config, topic)
    }

    fn build(config: &GuardrailConfig, topic: TopicRestriction) -> ValidatorResult<Self> {
        let reading_time = ReadingTime::new(config.reading_time_limit_minutes)
            .words_per_minute(config.words_per_minute);
        let forbidden = ForbiddenContent::new(config.forbidden_terms.iter().cloned())?;

        Ok(Self::new(vec![
            ValidatorSpec::TopicRestriction(topic),
            ValidatorSpec::ReadingTime(reading_time),
            ValidatorSpec::ForbiddenContent(forbidden),
        ]))
    }

    /// The configured validators, in evaluation order.
    #[must_use]
    pub fn specs(&self) -> &[ValidatorSpec] {
        &self.specs
    }

    /// Evaluate a text for one direction.
    ///
    /// Every validator whose applicability matches `direction` runs, even
    /// after a failure, so the outcome carries the complete violation
    /// list; the first violation is the one that drives substitution.
    ///
    /// # Errors
    ///
    /// Returns a hard error if any applicable validator cannot run
    /// (fail-closed, never fail-open on an inability to check).
    pub fn evaluate(&self, text: &str, direction: Direction) -> ValidatorResult<Outcome> {
        let mut violations = Vec::new();

        for spec in self
            .specs
            .iter()
            .filter(|s| s.applicability().matches(direction))
        {
            match spec.check(text)? {
                Some(violation) => {
                    debug!(
                        category = %violation.category,
                        direction = %direction,
                        "guardrail triggered"
                    );
                    violations.push(violation);
                }
                None => {
                    debug!(category = %spec.category(), direction = %direction, "check passed");
                }
            }
        }

        Ok(Outcome::new(text, direction, violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator() -> Evaluator {
        Evaluator::from_config(&GuardrailConfig::default()).expect("default config builds")
    }

    #[test]
    fn test_standard_order() {
        let e = evaluator();
        let categories: Vec<Category> = e.specs().iter().map(ValidatorSpec::category).collect();
        assert_eq!(
            categories,
            vec![Category::Topic, Category::ReadingTime, Category::DarkWeb]
        );
    }

    #[test]
    fn test_on_topic_input_passes() {
        let outcome = evaluator()
            .evaluate("How do I deploy a FastAPI app on Render?", Direction::Input)
            .expect("evaluation runs");
        assert!(outcome.passed());
        assert_eq!(outcome.direction(), Direction::Input);
    }

    #[test]
    fn test_reading_time_skipped_on_input() {
        // A very long user message is not bounded by the reading time check.
        let long = "deploy ".repeat(500);
        let outcome = evaluator()
            .evaluate(&long, Direction::Input)
            .expect("evaluation runs");
        assert!(outcome.passed());
    }

    #[test]
    fn test_all_violations_accumulate() {
        // Off-topic AND forbidden on the input side: both are recorded,
        // topic leads because of the fixed order.
        let outcome = evaluator()
            .evaluate(
                "Where can I buy concert tickets on the dark web?",
                Direction::Input,
            )
            .expect("evaluation runs");
        assert!(!outcome.passed());
        assert_eq!(outcome.violations().len(), 2);
        assert_eq!(
            outcome.leading_violation().map(|v| v.category),
            Some(Category::Topic)
        );
        assert_eq!(outcome.violations()[1].category, Category::DarkWeb);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let e = evaluator();
        let text = "Tell me about the World Cup final.";
        let first = e.evaluate(text, Direction::Input).expect("evaluation runs");
        let second = e.evaluate(text, Direction::Input).expect("evaluation runs");
        assert_eq!(first.passed(), second.passed());
        assert_eq!(first.violations().len(), second.violations().len());
        assert_eq!(
            first.leading_violation().map(|v| v.detail.clone()),
            second.leading_violation().map(|v| v.detail.clone())
        );
    }

    #[test]
    fn test_long_draft_fails_on_output() {
        let draft = "word ".repeat(400);
        let outcome = evaluator()
            .evaluate(&draft, Direction::Output)
            .expect("evaluation runs");
        assert_eq!(
            outcome.leading_violation().map(|v| v.category),
            Some(Category::ReadingTime)
        );
    }
}
