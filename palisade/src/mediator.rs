//! Response mediator — drives one chat exchange end to end.
//!
//! The [`ResponseMediator`] sequences the exchange lifecycle:
//!
//! 1. Evaluate the inbound text (input direction)
//! 2. Only if the input passes, invoke the agent for a draft reply
//! 3. Evaluate the draft (output direction)
//! 4. Deliver the draft verbatim, or substitute a canned safe message
//!
//! A failure at either check stage short-circuits to the substitution
//! path: the response is tagged `guardrail:<category>` after the first
//! violation, and a rejected input is never sent to the agent. The
//! mediator performs no I/O of its own beyond calling its two injected
//! collaborators (the evaluator is pure; the agent may be slow).
//!
//! All per-exchange state lives in local variables inside
//! [`ResponseMediator::process_message`], so the mediator is safe to
//! share across concurrently in-flight exchanges and dropping the future
//! mid-call leaves nothing inconsistent — a cancelled exchange simply
//! produces no response.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::agent::ReplyAgent;
use crate::config::GuardrailConfig;
use crate::error::{AgentError, Error, Result, ValidatorResult};
use crate::guardrail::{Category, Direction, Evaluator, Outcome};
use crate::message::{ChatResponse, Message, ResponseSource};
use crate::monitor::{ExchangeMonitor, ExchangeRecord, NoopMonitor};

/// Orchestrates guardrail evaluation around agent response generation.
pub struct ResponseMediator {
    evaluator: Arc<Evaluator>,
    agent: Arc<dyn ReplyAgent>,
    monitor: Arc<dyn ExchangeMonitor>,
    agent_timeout: Duration,
}

impl ResponseMediator {
    /// Create a mediator over an evaluator and an agent collaborator.
    ///
    /// Monitoring defaults to [`NoopMonitor`]; the agent deadline
    /// defaults to the [`GuardrailConfig`] default.
    #[must_use]
    pub fn new(evaluator: Evaluator, agent: Arc<dyn ReplyAgent>) -> Self {
        Self {
            evaluator: Arc::new(evaluator),
            agent,
            monitor: Arc::new(NoopMonitor),
            agent_timeout: Duration::from_secs(GuardrailConfig::default().agent_timeout_secs),
        }
    }

    /// Build the standard pipeline from configuration.
    ///
    /// # Errors
    ///
    /// Returns the underlying error when the validator set cannot be
    /// built from `config`.
    pub fn from_config(config: &GuardrailConfig, agent: Arc<dyn ReplyAgent>) -> ValidatorResult<Self> {
        let evaluator = Evaluator::from_config(config)?;
        Ok(Self::new(evaluator, agent).agent_timeout(Duration::from_secs(config.agent_timeout_secs)))
    }

    /// Set the monitoring collaborator.
    #[must_use]
    pub fn monitor(mut self, monitor: Arc<dyn ExchangeMonitor>) -> Self {
        self.monitor = monitor;
        self
    }

    /// Set the deadline for a single agent invocation.
    #[must_use]
    pub const fn agent_timeout(mut self, timeout: Duration) -> Self {
        self.agent_timeout = timeout;
        self
    }

    /// Process one chat exchange.
    ///
    /// Returns a [`ChatResponse`] whose source is `agent` only when both
    /// the input and the draft reply passed every applicable check; a
    /// guardrail block is a designed outcome and still returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMessage`] for whitespace-only input,
    /// [`Error::Validator`] when a check cannot run (fail-closed), and
    /// [`Error::Agent`] when the agent collaborator fails or times out —
    /// all genuine service errors, distinct from a block.
    pub async fn process_message(&self, session_id: &str, user_text: &str) -> Result<ChatResponse> {
        let trimmed = user_text.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyMessage);
        }

        let inbound = Message::user(session_id, trimmed);
        debug!(session = %session_id, message = %inbound.id, stage = "input_check", "exchange started");

        let input_outcome = self.evaluator.evaluate(&inbound.body, Direction::Input)?;
        if !input_outcome.passed() {
            // Blocked at input: the agent is never invoked.
            let response = self.substitute(&input_outcome, session_id, false);
            self.report(&inbound, &response, vec![input_outcome]).await;
            return Ok(response);
        }

        debug!(session = %session_id, stage = "agent", "input passed, generating draft");
        let draft = self.invoke_agent(&inbound.body).await?;
        let draft_message = Message::assistant(session_id, draft);

        debug!(session = %session_id, message = %draft_message.id, stage = "output_check", "draft ready");
        let output_outcome = self.evaluator.evaluate(&draft_message.body, Direction::Output)?;
        if !output_outcome.passed() {
            // The draft is discarded and never surfaced to the user; the
            // output outcome still carries it for the audit trail.
            let response = self.substitute(&output_outcome, session_id, true);
            self.report(&inbound, &response, vec![input_outcome, output_outcome])
                .await;
            return Ok(response);
        }

        let response = ChatResponse {
            reply: draft_message.body,
            source: ResponseSource::Agent,
            monitored: true,
            session_id: session_id.to_owned(),
        };
        self.report(&inbound, &response, vec![input_outcome, output_outcome])
            .await;

        debug!(session = %session_id, stage = "delivered", "exchange complete");
        Ok(response)
    }

    /// Invoke the agent collaborator under the configured deadline.
    async fn invoke_agent(&self, user_text: &str) -> Result<String> {
        let generation = self.agent.generate_reply(user_text);
        match tokio::time::timeout(self.agent_timeout, generation).await {
            Ok(Ok(draft)) => Ok(draft),
            Ok(Err(e)) => {
                warn!(error = %e, "agent invocation failed");
                Err(e.into())
            }
            Err(_) => {
                warn!(timeout_secs = self.agent_timeout.as_secs(), "agent invocation timed out");
                Err(AgentError::Timeout(self.agent_timeout.as_secs()).into())
            }
        }
    }

    /// Build the substitution response for a failed outcome.
    fn substitute(&self, outcome: &Outcome, session_id: &str, monitored: bool) -> ChatResponse {
        // Outcomes reach this path only when at least one check failed.
        let category = outcome
            .leading_violation()
            .map_or(Category::Topic, |v| v.category);

        info!(
            session = %session_id,
            category = %category,
            direction = %outcome.direction(),
            violations = outcome.violations().len(),
            "guardrail blocked exchange"
        );

        ChatResponse {
            reply: substitution_reply(category).to_owned(),
            source: ResponseSource::Guardrail(category),
            monitored,
            session_id: session_id.to_owned(),
        }
    }

    /// Hand the completed exchange to the monitoring collaborator.
    async fn report(&self, inbound: &Message, response: &ChatResponse, outcomes: Vec<Outcome>) {
        let record = ExchangeRecord {
            session_id: response.session_id.clone(),
            user_text: inbound.body.clone(),
            delivered_text: response.reply.clone(),
            monitored: response.monitored,
            outcomes,
        };
        self.monitor.record(record).await;
    }
}

impl std::fmt::Debug for ResponseMediator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseMediator")
            .field("agent_timeout", &self.agent_timeout)
            .finish_non_exhaustive()
    }
}

/// Canned safe reply for each guardrail category.
fn substitution_reply(category: Category) -> &'static str {
    match category {
        Category::Topic => {
            "Sorry, I can only discuss topics related to Streamlit, FastAPI, or general \
             programming. Please adjust your question."
        }
        Category::ReadingTime => {
            "That answer came out longer than I am allowed to send in one reply. Please narrow \
             down your question so I can keep the response short and focused."
        }
        Category::DarkWeb => {
            "I can't help with that. Let's keep the conversation to Streamlit, FastAPI, and \
             general programming."
        }
    }
}
