//! Chat message and response types.
//!
//! This module defines the request-scoped records that flow through one
//! exchange: the inbound/outbound [`Message`] and the final
//! [`ChatResponse`] handed back to the serving layer. All of them are
//! immutable once created and owned exclusively by the exchange that
//! created them.

use std::time::SystemTime;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::guardrail::Category;

/// Generate a unique message identifier.
#[must_use]
pub fn generate_message_id() -> String {
    format!("msg-{}", Uuid::new_v4())
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The end user.
    User,
    /// The agent.
    Assistant,
}

/// One message in a chat exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID.
    pub id: String,
    /// Who authored the message.
    pub role: Role,
    /// Message text content.
    pub body: String,
    /// When the message was created.
    pub timestamp: SystemTime,
    /// Conversation this message belongs to.
    pub session_id: String,
}

impl Message {
    /// Create a user message.
    #[must_use]
    pub fn user(session_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Role::User, session_id, body)
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(session_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Role::Assistant, session_id, body)
    }

    fn new(role: Role, session_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: generate_message_id(),
            role,
            body: body.into(),
            timestamp: SystemTime::now(),
            session_id: session_id.into(),
        }
    }
}

/// Where a reply came from.
///
/// Serialized as the fixed tag vocabulary: `"agent"` for a delivered
/// agent reply, `"guardrail:<category>"` for a substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    /// The reply is the agent's draft, delivered verbatim.
    Agent,
    /// The reply is a canned substitution for the blocking category.
    Guardrail(Category),
}

impl ResponseSource {
    /// The wire tag for this source.
    #[must_use]
    pub fn as_tag(self) -> String {
        match self {
            Self::Agent => "agent".to_owned(),
            Self::Guardrail(category) => format!("guardrail:{category}"),
        }
    }

    /// Returns `true` for a guardrail substitution.
    #[must_use]
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Guardrail(_))
    }
}

impl std::fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_tag())
    }
}

impl Serialize for ResponseSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_tag())
    }
}

impl<'de> Deserialize<'de> for ResponseSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        match tag.as_str() {
            "agent" => Ok(Self::Agent),
            "guardrail:topic" => Ok(Self::Guardrail(Category::Topic)),
            "guardrail:reading_time" => Ok(Self::Guardrail(Category::ReadingTime)),
            "guardrail:darkweb" => Ok(Self::Guardrail(Category::DarkWeb)),
            other => Err(serde::de::Error::custom(format!(
                "unknown response source tag: {other}"
            ))),
        }
    }
}

/// The final response for one exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Reply text — the agent's draft verbatim, or a substitution.
    pub reply: String,
    /// Where the reply came from.
    pub source: ResponseSource,
    /// Whether the exchange reached the agent stage and was reported to
    /// the monitoring collaborator.
    pub monitored: bool,
    /// Conversation this response belongs to.
    pub session_id: String,
}

impl ChatResponse {
    /// Returns `true` when a guardrail substituted the reply.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.source.is_blocked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let msg = Message::user("session-1", "Hello!");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.session_id, "session-1");
        assert_eq!(msg.body, "Hello!");

        let reply = Message::assistant("session-1", "Hi there");
        assert_eq!(reply.role, Role::Assistant);
        assert_ne!(msg.id, reply.id);
    }

    #[test]
    fn test_source_tags() {
        assert_eq!(ResponseSource::Agent.as_tag(), "agent");
        assert_eq!(
            ResponseSource::Guardrail(Category::ReadingTime).as_tag(),
            "guardrail:reading_time"
        );
        assert!(ResponseSource::Guardrail(Category::DarkWeb).is_blocked());
        assert!(!ResponseSource::Agent.is_blocked());
    }

    #[test]
    fn test_source_serde_round_trip() {
        let source = ResponseSource::Guardrail(Category::Topic);
        let json = serde_json::to_string(&source).expect("serializes");
        assert_eq!(json, r#""guardrail:topic""#);

        let back: ResponseSource = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, source);

        assert!(serde_json::from_str::<ResponseSource>(r#""guardrail:unknown""#).is_err());
    }
}
