//! The monitoring collaborator seam.
//!
//! Per exchange, the mediator hands the monitoring collaborator one
//! [`ExchangeRecord`]. What the collaborator does with it (tracing
//! backend, dashboard, nothing) is its own policy; a monitor failure is
//! logged and never affects the response.

use async_trait::async_trait;
use tracing::info;

use crate::guardrail::Outcome;

/// Everything the monitoring collaborator sees about one exchange.
#[derive(Debug, Clone)]
pub struct ExchangeRecord {
    /// Conversation the exchange belongs to.
    pub session_id: String,
    /// The user's inbound text.
    pub user_text: String,
    /// The text that was delivered — the agent draft on success, the
    /// substitution on a block. A blocked draft is still auditable via
    /// the output [`Outcome`]'s evaluated text.
    pub delivered_text: String,
    /// True only when the exchange reached the agent stage; an exchange
    /// blocked at input produces no meaningful trace.
    pub monitored: bool,
    /// Every guardrail outcome produced during the exchange, in order.
    pub outcomes: Vec<Outcome>,
}

/// Receives one record per completed exchange.
#[async_trait]
pub trait ExchangeMonitor: Send + Sync {
    /// Record an exchange. Must not fail the exchange: implementations
    /// swallow their own errors.
    async fn record(&self, record: ExchangeRecord);
}

/// Monitor that discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor;

#[async_trait]
impl ExchangeMonitor for NoopMonitor {
    async fn record(&self, _record: ExchangeRecord) {}
}

/// Monitor that emits each exchange as a structured tracing event.
///
/// Stands in for an external tracing backend during development and
/// tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMonitor;

#[async_trait]
impl ExchangeMonitor for TracingMonitor {
    async fn record(&self, record: ExchangeRecord) {
        let triggered: Vec<String> = record
            .outcomes
            .iter()
            .flat_map(Outcome::violations)
            .map(|v| v.category.to_string())
            .collect();

        info!(
            session = %record.session_id,
            monitored = record.monitored,
            outcomes = record.outcomes.len(),
            triggered = ?triggered,
            "exchange recorded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guardrail::Direction;

    #[tokio::test]
    async fn test_monitors_accept_records() {
        let record = ExchangeRecord {
            session_id: "session-1".into(),
            user_text: "hi".into(),
            delivered_text: "hello".into(),
            monitored: true,
            outcomes: vec![Outcome::new("hi", Direction::Input, Vec::new())],
        };

        NoopMonitor.record(record.clone()).await;
        TracingMonitor.record(record).await;
    }
}
