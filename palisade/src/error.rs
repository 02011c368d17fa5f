//! Unified error types for palisade.
//!
//! This module provides the error hierarchy for the guardrail pipeline.
//! All module-specific errors can be converted into the main `Error` type.
//!
//! A failed guardrail check is NOT an error: it surfaces as a
//! [`Violation`](crate::guardrail::Violation) inside a successful
//! [`Outcome`](crate::guardrail::Outcome). The variants here cover the
//! cases where the pipeline itself cannot do its job — a malformed
//! validator configuration, an unreachable classifier, or a failing
//! agent collaborator.

// ============================================================================
// Main Error Type
// ============================================================================

/// The main error type for palisade operations.
///
/// This enum consolidates all error types from various modules into a single
/// type that can be used throughout the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A validator could not run its check (fail-closed).
    #[error("validator: {0}")]
    Validator(#[from] ValidatorError),

    /// The agent collaborator failed to produce a draft reply.
    #[error("agent: {0}")]
    Agent(#[from] AgentError),

    /// Configuration error.
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// The inbound message was empty or whitespace-only.
    #[error("message cannot be empty")]
    EmptyMessage,

    /// Serialization error.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an agent error from a string.
    #[inline]
    pub fn agent(msg: impl Into<String>) -> Self {
        Self::Agent(AgentError::Generation(msg.into()))
    }

    /// Create a config error from a string.
    #[inline]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(ConfigError::Invalid(msg.into()))
    }
}

/// Result type alias for palisade operations.
pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// Validator Errors
// ============================================================================

/// Error type for validator execution failures.
///
/// These are configuration errors, not validation failures: a validator
/// that cannot run propagates a hard error rather than silently passing.
#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    /// The validator's configuration is malformed.
    #[error("invalid configuration for '{validator}': {message}")]
    Config {
        /// Name of the validator with the bad configuration.
        validator: String,
        /// What is wrong with it.
        message: String,
    },

    /// The topic classifier dependency failed or is unreachable.
    #[error("classifier: {0}")]
    Classifier(String),
}

impl ValidatorError {
    /// Create a configuration error for the named validator.
    #[inline]
    pub fn config(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            validator: validator.into(),
            message: message.into(),
        }
    }

    /// Create a classifier error.
    #[inline]
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }
}

/// Result type for validator operations.
pub type ValidatorResult<T> = std::result::Result<T, ValidatorError>;

// ============================================================================
// Agent Errors
// ============================================================================

/// Error type for the agent collaborator.
///
/// Distinct from a guardrail block so callers can tell "we blocked this"
/// apart from "something went wrong".
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The agent failed to generate a reply (tool error, quota, etc.).
    #[error("{0}")]
    Generation(String),

    /// The agent did not answer within the configured deadline.
    #[error("timeout after {0}s")]
    Timeout(u64),
}

impl AgentError {
    /// Create a generation error.
    #[inline]
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }
}

/// Result type for agent operations.
pub type AgentResult<T> = std::result::Result<T, AgentError>;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("parse: {0}")]
    Parse(#[from] serde_json::Error),

    /// Missing required field.
    #[error("missing: {0}")]
    Missing(String),

    /// Invalid value.
    #[error("invalid: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create a missing field error.
    #[inline]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing(field.into())
    }

    /// Create an invalid value error.
    #[inline]
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let validator_err = ValidatorError::classifier("connection refused");
        let err: Error = validator_err.into();
        assert!(matches!(err, Error::Validator(_)));

        let agent_err = AgentError::Timeout(30);
        let err: Error = agent_err.into();
        assert!(matches!(err, Error::Agent(_)));
    }

    #[test]
    fn test_error_helpers() {
        let err = Error::agent("model unavailable");
        assert!(matches!(err, Error::Agent(AgentError::Generation(_))));

        let err = Error::config("bad threshold");
        assert!(matches!(err, Error::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validator_error_display() {
        let err = ValidatorError::config("reading_time", "limit must be positive");
        assert_eq!(
            err.to_string(),
            "invalid configuration for 'reading_time': limit must be positive"
        );
    }
}
