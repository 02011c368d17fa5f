//! Topic restriction validator.
//!
//! Classifies a text's subject matter against an allow-list of topics and
//! fails when anything off-list is detected. Classification is delegated
//! to an injected [`TopicClassifier`] so the validator itself stays pure;
//! the shipped [`KeywordTopicClassifier`] is a fixed keyword table, but a
//! remote classifier can be plugged in behind the same trait.

use std::sync::Arc;

use crate::error::{ValidatorError, ValidatorResult};

use super::{Applicability, Category, Violation};

/// Name used for this validator in violations and logs.
const VALIDATOR_NAME: &str = "topic_restriction";

/// Detects which topics a text is about.
///
/// Implementations must be pure with respect to their inputs: same text,
/// same configuration, same detected topics. An implementation that
/// delegates to a remote service reports inability to classify as
/// [`ValidatorError::Classifier`], which the pipeline treats as a hard
/// error (fail-closed) rather than a pass.
pub trait TopicClassifier: Send + Sync {
    /// Return the topics detected in `text`, lowercase.
    ///
    /// An empty list means no recognizable topic, which the validator
    /// treats as a pass.
    fn classify(&self, text: &str) -> ValidatorResult<Vec<String>>;
}

/// Keyword-table topic classifier.
///
/// Maps case-insensitive keyword hits to topic labels. The built-in table
/// covers the deployment-assistant domain (streamlit, fastapi,
/// programming) plus the off-limits topics the service is commonly probed
/// with (politics, music, sports).
#[derive(Debug, Clone)]
pub struct KeywordTopicClassifier {
    table: Vec<(String, Vec<String>)>,
}

impl KeywordTopicClassifier {
    /// Create a classifier from an explicit topic → keywords table.
    #[must_use]
    pub fn new(table: Vec<(String, Vec<String>)>) -> Self {
        Self { table }
    }
}

impl Default for KeywordTopicClassifier {
    fn default() -> Self {
        let table = [
            ("streamlit", vec!["streamlit", "st.session_state"]),
            ("fastapi", vec!["fastapi", "uvicorn", "pydantic"]),
            (
                "programming",
                vec![
                    "programming", "code", "python", "rust", "deploy", "deployment", "api",
                    "server", "debug", "function",
                ],
            ),
            (
                "politics",
                vec!["politics", "election", "senate", "parliament", "president"],
            ),
            ("music", vec!["music", "concert", "album", "song", "playlist"]),
            (
                "sports",
                vec![
                    "sports", "world cup", "football", "soccer", "basketball", "tennis",
                    "olympics", "championship",
                ],
            ),
        ];

        Self::new(
            table
                .into_iter()
                .map(|(topic, keywords)| {
                    (
                        topic.to_owned(),
                        keywords.into_iter().map(str::to_owned).collect(),
                    )
                })
                .collect(),
        )
    }
}

impl TopicClassifier for KeywordTopicClassifier {
    fn classify(&self, text: &str) -> ValidatorResult<Vec<String>> {
        let haystack = text.to_lowercase();
        let mut detected = Vec::new();
        for (topic, keywords) in &self.table {
            if keywords.iter().any(|k| haystack.contains(k.as_str())) {
                detected.push(topic.clone());
            }
        }
        Ok(detected)
    }
}

/// Validator that restricts conversations to an allow-listed topic set.
///
/// Multi-topic texts are handled conservatively: the check fails if ANY
/// detected topic is outside the allow-list, and the detail reports every
/// offending topic. Text with no recognizable topic passes.
#[derive(Clone)]
pub struct TopicRestriction {
    allowed: Vec<String>,
    classifier: Arc<dyn TopicClassifier>,
    applies: Applicability,
}

impl TopicRestriction {
    /// Create a topic restriction over the given allow-list, using the
    /// built-in keyword classifier.
    ///
    /// Applies to the input direction by default.
    #[must_use]
    pub fn new(allowed: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            allowed: allowed
                .into_iter()
                .map(|t| t.into().to_lowercase())
                .collect(),
            classifier: Arc::new(KeywordTopicClassifier::default()),
            applies: Applicability::Input,
        }
    }

    /// Replace the classifier (e.g. with a remote one).
    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn TopicClassifier>) -> Self {
        self.classifier = classifier;
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

    /// The allow-listed topics, lowercase.
    #[must_use]
    pub fn allowed_topics(&self) -> &[String] {
        &self.allowed
    }

    /// Check a text against the allow-list.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::Config`] when the allow-list is empty and
    /// propagates classifier failures.
    pub fn check(&self, text: &str) -> ValidatorResult<Option<Violation>> {
        if self.allowed.is_empty() {
            return Err(ValidatorError::config(
                VALIDATOR_NAME,
                "allowed topic list is empty",
            ));
        }

        let detected = self.classifier.classify(text)?;
        let offending: Vec<String> = detected
            .into_iter()
            .filter(|topic| !self.allowed.iter().any(|a| a == topic))
            .collect();

        if offending.is_empty() {
            return Ok(None);
        }

        let detail = format!(
            "off-topic content detected: {} (allowed: {})",
            offending.join(", "),
            self.allowed.join(", ")
        );
        Ok(Some(Violation::blocking(
            VALIDATOR_NAME,
            Category::Topic,
            detail,
        )))
    }
}

impl std::fmt::Debug for TopicRestriction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicRestriction")
            .field("allowed", &self.allowed)
            .field("applies", &self.applies)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> TopicRestriction {
        TopicRestriction::new(["streamlit", "fastapi", "programming"])
    }

    #[test]
    fn test_allowed_topic_passes() {
        let v = validator();
        let result = v.check("How do I deploy a FastAPI app on Render?");
        assert!(result.is_ok_and(|v| v.is_none()));
    }

    #[test]
    fn test_off_topic_fails_with_detail() {
        let v = validator();
        let violation = v
            .check("Tell me about the World Cup final.")
            .ok()
            .flatten()
            .expect("sports text should be off-topic");
        assert_eq!(violation.category, Category::Topic);
        assert!(violation.detail.contains("sports"));
    }

    #[test]
    fn test_mixed_topics_fail_conservatively() {
        // Streamlit is allowed, music is not; ANY off-list topic fails.
        let v = validator();
        let violation = v
            .check("Build a Streamlit app that shows my music playlist")
            .ok()
            .flatten()
            .expect("mixed text should fail");
        assert!(violation.detail.contains("music"));
    }

    #[test]
    fn test_unrecognized_text_passes() {
        let v = validator();
        assert!(v.check("Hello there!").is_ok_and(|v| v.is_none()));
    }

    #[test]
    fn test_empty_allow_list_is_config_error() {
        let v = TopicRestriction::new(Vec::<String>::new());
        assert!(matches!(
            v.check("anything"),
            Err(ValidatorError::Config { .. })
        ));
    }

    #[test]
    fn test_failing_classifier_propagates() {
        struct Unreachable;
        impl TopicClassifier for Unreachable {
            fn classify(&self, _text: &str) -> ValidatorResult<Vec<String>> {
                Err(ValidatorError::classifier("connection refused"))
            }
        }

        let v = validator().with_classifier(Arc::new(Unreachable));
        assert!(matches!(
            v.check("anything"),
            Err(ValidatorError::Classifier(_))
        ));
    }
}
