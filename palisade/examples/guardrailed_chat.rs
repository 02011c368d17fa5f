//! Guardrailed chat exchange using the offline agent.
//!
//! Demonstrates the full pipeline: input check, agent invocation, output
//! check, and substitution for blocked exchanges.
//!
//! ```bash
//! cargo run --example guardrailed_chat
//! ```

#![allow(clippy::print_stdout)]

use std::sync::Arc;

use palisade::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palisade=debug".into()),
        )
        .init();

    let config = GuardrailConfig::default();
    let mediator = ResponseMediator::from_config(&config, Arc::new(OfflineAgent))?
        .monitor(Arc::new(TracingMonitor));

    let messages = [
        "How do I deploy a FastAPI app on Render?",
        "Tell me about the World Cup final.",
        "How do I access dark web markets?",
    ];

    for (i, message) in messages.iter().enumerate() {
        let session_id = format!("demo-{i}");
        let response = mediator.process_message(&session_id, message).await?;
        println!("> {message}");
        println!("[{}] {}\n", response.source, response.reply);
    }

    Ok(())
}
