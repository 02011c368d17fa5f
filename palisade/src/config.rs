//! Guardrail configuration.
//!
//! Configuration is loaded once at process start and treated as immutable
//! for the process lifetime; changing it requires a restart. The guardrail
//! pipeline never reads configuration from a hidden global — the loaded
//! [`GuardrailConfig`] is passed explicitly into
//! [`Evaluator::from_config`](crate::guardrail::Evaluator::from_config).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::guardrail::{DEFAULT_FORBIDDEN_TERMS, WORDS_PER_MINUTE};

/// Configuration for the guardrail pipeline and agent mediation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardrailConfig {
    /// Topics the conversation is allowed to cover.
    pub allowed_topics: Vec<String>,
    /// Ceiling on the estimated reading time of a reply, in minutes.
    pub reading_time_limit_minutes: f64,
    /// Reading speed used for the estimate.
    pub words_per_minute: f64,
    /// Terms that block an exchange in either direction.
    pub forbidden_terms: Vec<String>,
    /// Deadline for a single agent invocation, in seconds.
    pub agent_timeout_secs: u64,
}

impl Default for GuardrailConfig {
    fn default() -> Self {
        Self {
            allowed_topics: ["streamlit", "fastapi", "programming"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            reading_time_limit_minutes: 1.5,
            words_per_minute: WORDS_PER_MINUTE,
            forbidden_terms: DEFAULT_FORBIDDEN_TERMS
                .iter()
                .map(|t| (*t).to_owned())
                .collect(),
            agent_timeout_secs: 300,
        }
    }
}

impl GuardrailConfig {
    /// Load configuration from a JSON file and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] on malformed JSON, and the validation
    /// errors below.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for an empty topic allow-list and
    /// [`ConfigError::Invalid`] for non-positive numeric settings.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.allowed_topics.is_empty() {
            return Err(ConfigError::missing("allowed_topics"));
        }
        if !(self.reading_time_limit_minutes.is_finite() && self.reading_time_limit_minutes > 0.0) {
            return Err(ConfigError::invalid(format!(
                "reading_time_limit_minutes must be positive, got {}",
                self.reading_time_limit_minutes
            )));
        }
        if !(self.words_per_minute.is_finite() && self.words_per_minute > 0.0) {
            return Err(ConfigError::invalid(format!(
                "words_per_minute must be positive, got {}",
                self.words_per_minute
            )));
        }
        if self.agent_timeout_secs == 0 {
            return Err(ConfigError::invalid("agent_timeout_secs must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GuardrailConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.allowed_topics.len(), 3);
        assert!((config.reading_time_limit_minutes - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: GuardrailConfig =
            serde_json::from_str(r#"{"reading_time_limit_minutes": 0.25}"#)
                .expect("partial config parses");
        assert!((config.reading_time_limit_minutes - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.allowed_topics.len(), 3);
    }

    #[test]
    fn test_validation_rejects_empty_topics() {
        let config = GuardrailConfig {
            allowed_topics: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Missing(_))));
    }

    #[test]
    fn test_validation_rejects_bad_numbers() {
        let config = GuardrailConfig {
            words_per_minute: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = GuardrailConfig {
            reading_time_limit_minutes: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
