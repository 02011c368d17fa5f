//! Forbidden content validator.
//!
//! Matches a text against a fixed set of dark web-related terms,
//! case-insensitively, and fails on the first hit. The term set is
//! compiled into a [`RegexSet`] once at construction, so the per-check
//! cost is a single scan regardless of list size.

use regex::RegexSet;

use crate::error::{ValidatorError, ValidatorResult};

use super::{Applicability, Category, Violation};

/// Name used for this validator in violations and logs.
const VALIDATOR_NAME: &str = "forbidden_content";

/// Default dark web-related term set.
pub(crate) const DEFAULT_FORBIDDEN_TERMS: &[&str] = &[
    "dark web",
    "darkweb",
    "dark-web",
    "darknet",
    "silk road",
    "onion market",
    "hidden wiki",
];

/// Validator that blocks texts containing forbidden terms.
///
/// Matching is a case-insensitive substring test over the configured
/// terms. The failure detail names the matched term under the
/// "dark web-related content" tag.
#[derive(Debug, Clone)]
pub struct ForbiddenContent {
    terms: Vec<String>,
    matcher: RegexSet,
    applies: Applicability,
}

impl ForbiddenContent {
    /// Compile a forbidden content validator from a term list.
    ///
    /// Applies to both directions by default.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::Config`] if the term set cannot be
    /// compiled (fail-closed: a broken list never degrades to a pass).
    pub fn new(terms: impl IntoIterator<Item = impl Into<String>>) -> ValidatorResult<Self> {
        let terms: Vec<String> = terms.into_iter().map(Into::into).collect();
        let patterns: Vec<String> = terms
            .iter()
            .map(|t| format!("(?i){}", regex::escape(t)))
            .collect();
        let matcher = RegexSet::new(&patterns)
            .map_err(|e| ValidatorError::config(VALIDATOR_NAME, e.to_string()))?;

        Ok(Self {
            terms,
            matcher,
            applies: Applicability::Both,
        })
    }

    /// Compile the validator over the built-in dark web term set.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::Config`] if compilation fails.
    pub fn default_terms() -> ValidatorResult<Self> {
        Self::new(DEFAULT_FORBIDDEN_TERMS.iter().copied())
    }

    /// Set which directions this validator applies to.
    #[must_use]
    pub fn applies(mut self, applies: Applicability) -> Self {
        self.applies = applies;
        self
    }

    /// Returns this validator's direction applicability.
    #[must_use]
    pub const fn applicability(&self) -> Applicability {
        self.applies
    }

    /// Check a text against the forbidden term set.
    pub fn check(&self, text: &str) -> ValidatorResult<Option<Violation>> {
        let Some(index) = self.matcher.matches(text).into_iter().next() else {
            return Ok(None);
        };

        let term = self.terms.get(index).map_or("<unknown>", String::as_str);
        let detail = format!("dark web-related content: matched term \"{term}\"");
        Ok(Some(Violation::blocking(
            VALIDATOR_NAME,
            Category::DarkWeb,
            detail,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_passes() {
        let v = ForbiddenContent::default_terms().expect("default terms compile");
        let result = v.check("How do I deploy a FastAPI app?");
        assert!(result.is_ok_and(|v| v.is_none()));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let v = ForbiddenContent::default_terms().expect("default terms compile");
        let violation = v
            .check("How do I access Dark Web markets?")
            .ok()
            .flatten()
            .expect("dark web text should fail");
        assert_eq!(violation.category, Category::DarkWeb);
        assert!(violation.detail.contains("dark web"));
    }

    #[test]
    fn test_context_length_does_not_matter() {
        let v = ForbiddenContent::default_terms().expect("default terms compile");
        let padded = format!("{} silk road {}", "filler ".repeat(500), "filler ".repeat(500));
        assert!(v.check(&padded).is_ok_and(|v| v.is_some()));
    }

    #[test]
    fn test_terms_with_regex_metacharacters_are_literal() {
        let v = ForbiddenContent::new([".onion"]).expect("escaped term compiles");
        assert!(v.check("visit example.onion now").is_ok_and(|v| v.is_some()));
        // The dot must not act as a wildcard.
        assert!(v.check("visit exampleXonion now").is_ok_and(|v| v.is_none()));
    }

    #[test]
    fn test_empty_term_list_never_matches() {
        let v = ForbiddenContent::new(Vec::<String>::new()).expect("empty set compiles");
        assert!(v.check("dark web").is_ok_and(|v| v.is_none()));
    }
}
