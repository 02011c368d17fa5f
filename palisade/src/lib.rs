//! Palisade - a guardrailed chat-agent backend core.
//!
//! This crate provides the decision pipeline of a deployment-assistant
//! chat service: every inbound message and every generated reply passes a
//! fixed set of guardrail checks before anything reaches the user, and
//! blocked content is replaced by a canned safe message tagged with the
//! violated check's category.
//!
//! # Architecture
//!
//! The pipeline is organized around these core components:
//!
//! - **Validators** ([`guardrail`]) - topic restriction, reading time,
//!   and forbidden content checks behind tagged-variant dispatch
//! - **Evaluator** ([`guardrail::Evaluator`]) - ordered, per-direction
//!   evaluation producing one [`Outcome`](guardrail::Outcome) per call
//! - **Mediator** ([`mediator`]) - input check → agent → output check
//!   orchestration with safe substitution
//! - **Agent** ([`agent`]) - the injected reply-generation collaborator
//! - **Monitor** ([`monitor`]) - the injected tracing collaborator seam
//!
//! The serving layer (HTTP, UI, auth) is out of scope: it calls
//! [`ResponseMediator::process_message`](mediator::ResponseMediator::process_message)
//! and returns the [`ChatResponse`](message::ChatResponse) as its payload.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use palisade::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = GuardrailConfig::default();
//!     let mediator = ResponseMediator::from_config(&config, Arc::new(OfflineAgent))?
//!         .monitor(Arc::new(TracingMonitor));
//!
//!     let response = mediator
//!         .process_message("session-1", "How do I deploy a FastAPI app?")
//!         .await?;
//!     assert_eq!(response.source.as_tag(), "agent");
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod guardrail;
pub mod mediator;
pub mod message;
pub mod monitor;

/// Prelude module for convenient imports.
pub mod prelude {
    // Error types (centralized)
    pub use crate::error::{
        AgentError, AgentResult, ConfigError, ConfigResult, Error, Result, ValidatorError,
        ValidatorResult,
    };

    // Guardrail pipeline
    pub use crate::guardrail::{
        Applicability, Category, Direction, Evaluator, ForbiddenContent, KeywordTopicClassifier,
        Outcome, ReadingTime, Severity, TopicClassifier, TopicRestriction, ValidatorSpec,
        Violation, WORDS_PER_MINUTE,
    };

    // Mediation
    pub use crate::mediator::ResponseMediator;

    // Messages
    pub use crate::message::{ChatResponse, Message, ResponseSource, Role, generate_message_id};

    // Collaborator seams
    pub use crate::agent::{OfflineAgent, ReplyAgent};
    pub use crate::monitor::{ExchangeMonitor, ExchangeRecord, NoopMonitor, TracingMonitor};

    // Config
    pub use crate::config::GuardrailConfig;
}
