//! The agent collaborator seam.
//!
//! The mediator treats reply generation as an opaque, injected
//! collaborator behind a single call: the agent's internal reasoning loop
//! (tool selection, multi-turn steps) is out of scope for the guardrail
//! pipeline and never reproduced inside it.

use async_trait::async_trait;

use crate::error::AgentResult;

/// Produces a draft reply for a user message.
///
/// An implementation failure (tool error, timeout, quota) is an
/// [`AgentError`](crate::error::AgentError) — a service-level error, not
/// a guardrail violation.
#[async_trait]
pub trait ReplyAgent: Send + Sync {
    /// Generate a draft reply for the given user text.
    async fn generate_reply(&self, user_text: &str) -> AgentResult<String>;
}

/// Rule-based agent that answers without any model.
///
/// Routes on keywords and returns short directed tips for the
/// deployment-assistant domain. Useful as a fallback when no LLM-backed
/// agent is wired in, and as a deterministic collaborator in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAgent;

impl OfflineAgent {
    fn reply_for(message: &str) -> &'static str {
        let text = message.to_lowercase();
        if text.contains("streamlit") {
            return "Streamlit reruns your script after every click. Keep anything you need in st.session_state.";
        }
        if text.contains("fastapi") {
            return "FastAPI ships with automatic docs at /docs. Try them once the server is running!";
        }
        if text.contains("monitor") || text.contains("trace") {
            return "Wire up a tracing collaborator to link inputs and outputs, then watch the exchanges appear in its dashboard.";
        }
        if text.contains("deploy") {
            return "Deploy the API first, then point your UI at the live URL to share it.";
        }
        "I am in offline mode. Ask about Streamlit, FastAPI, or deployment to see directed tips."
    }
}

#[async_trait]
impl ReplyAgent for OfflineAgent {
    async fn generate_reply(&self, user_text: &str) -> AgentResult<String> {
        Ok(Self::reply_for(user_text).to_owned())
    }
}
