//! Reading time validator.
//!
//! Estimates how long a text takes to read from its word count and fails
//! when the estimate exceeds a configured ceiling. Keeps agent replies
//! short enough to be read at a glance.

use crate::error::{ValidatorError, ValidatorResult};

use super::{Applicability, Category, Violation};

/// Name used for this validator in violations and logs.
const VALIDATOR_NAME: &str = "reading_time";

/// Average adult reading speed used for the estimate.
pub const WORDS_PER_MINUTE: f64 = 200.0;

/// Validator that bounds the estimated reading time of a text.
///
/// The estimate is `word count / words per minute`; whitespace-separated
/// tokens count as words. Failure details report both the configured
/// limit and the computed estimate to two decimal places, so a failure is
/// reproducible from the detail alone.
#[derive(Debug, Clone, Copy)]
pub struct ReadingTime {
    limit_minutes: f64,
    words_per_minute: f64,
    applies: Applicability,
}

impl ReadingTime {
    /// Create a reading time validator with the given ceiling in minutes.
    ///
    /// Uses [`WORDS_PER_MINUTE`] and applies to the output direction by
    /// default.
    #[must_use]
    pub const fn new(limit_minutes: f64) -> Self {
        Self {
            limit_minutes,
            words_per_minute: WORDS_PER_MINUTE,
            applies: Applicability::Output,
        }
    }

    /// Override the words-per-minute constant.
    #[must_use]
    pub const fn words_per_minute(mut self, wpm: f64) -> Self {
        self.words_per_minute = wpm;
        self
    }

    /// Set which directions this validator applies to.
    #[must_use]
    pub const fn applies(mut self, applies: Applicability) -> Self {
        self.applies = applies;
        self
    }

    /// Returns this validator's direction applicability.
    #[must_use]
    pub const fn applicability(&self) -> Applicability {
        self.applies
    }

    /// Estimated reading time of `text` in minutes.
    #[must_use]
    pub fn estimate_minutes(&self, text: &str) -> f64 {
        let words = text.split_whitespace().count();
        words as f64 / self.words_per_minute
    }

    /// Check a text against the reading time ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::Config`] when the limit or reading speed
    /// is not a positive finite number.
    pub fn check(&self, text: &str) -> ValidatorResult<Option<Violation>> {
        if !(self.limit_minutes.is_finite() && self.limit_minutes > 0.0) {
            return Err(ValidatorError::config(
                VALIDATOR_NAME,
                format!("limit must be a positive number of minutes, got {}", self.limit_minutes),
            ));
        }
        if !(self.words_per_minute.is_finite() && self.words_per_minute > 0.0) {
            return Err(ValidatorError::config(
                VALIDATOR_NAME,
                format!("words per minute must be positive, got {}", self.words_per_minute),
            ));
        }

        let estimate = self.estimate_minutes(text);
        if estimate <= self.limit_minutes {
            return Ok(None);
        }

        let detail = format!(
            "estimated reading time {estimate:.2} min exceeds the {:.2} min limit",
            self.limit_minutes
        );
        Ok(Some(Violation::blocking(
            VALIDATOR_NAME,
            Category::ReadingTime,
            detail,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_short_text_passes() {
        let v = ReadingTime::new(1.5);
        assert!(v.check(&words(200)).is_ok_and(|v| v.is_none()));
    }

    #[test]
    fn test_long_text_fails_with_both_numbers() {
        let v = ReadingTime::new(1.5);
        let violation = v
            .check(&words(400))
            .ok()
            .flatten()
            .expect("400 words at 200 wpm is 2 minutes");
        assert_eq!(violation.category, Category::ReadingTime);
        assert!(violation.detail.contains("2.00"));
        assert!(violation.detail.contains("1.50"));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        // Exactly at the limit (300 words / 200 wpm = 1.5 min) passes.
        let v = ReadingTime::new(1.5);
        assert!(v.check(&words(300)).is_ok_and(|v| v.is_none()));
    }

    #[test]
    fn test_invalid_limit_is_config_error() {
        let v = ReadingTime::new(0.0);
        assert!(matches!(v.check("hi"), Err(ValidatorError::Config { .. })));

        let v = ReadingTime::new(1.5).words_per_minute(-10.0);
        assert!(matches!(v.check("hi"), Err(ValidatorError::Config { .. })));
    }
}
