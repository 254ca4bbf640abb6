//! Text-generation collaborator boundary.
//!
//! The core treats the critique generator as an opaque function from a
//! prompt string to a response string. [`CritiqueGenerator`] is that seam;
//! [`ModelGenerator`] is the production implementation, wrapping a rig
//! completion model behind a time budget. Transport concerns (timeouts,
//! provider errors) live here so the parsing and reconciliation layers only
//! ever see completed strings.

use rig::agent::AgentBuilder;
use rig::completion::{CompletionModel, Prompt};
use tokio::time::Duration;

use std::future::Future;

/// Preamble for critique agents when the caller does not supply one.
const DEFAULT_PREAMBLE: &str = "You are a critique engine for an experience-driven \
learning loop. Respond with operations in the exact format requested by the prompt.";

/// An opaque prompt-to-text generator.
///
/// Implementations may be slow or unreliable; the caller gets either a
/// completed response string or an error, never a partial stream. Output is
/// untrusted free text and is validated downstream by the parser.
pub trait CritiqueGenerator: Send + Sync {
    /// Produce a critique for the rendered prompt.
    fn generate(&self, prompt: &str) -> impl Future<Output = anyhow::Result<String>> + Send;
}

/// Rig-backed critique generator with a per-call time budget.
pub struct ModelGenerator<M: CompletionModel + Clone + Send + Sync> {
    model: M,
    preamble: String,
    budget_ms: u64,
}

impl<M: CompletionModel + Clone + Send + Sync> ModelGenerator<M> {
    pub fn new(model: M, budget_ms: u64) -> Self {
        Self {
            model,
            preamble: DEFAULT_PREAMBLE.to_owned(),
            budget_ms,
        }
    }

    /// Replace the default preamble.
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }
}

impl<M: CompletionModel + Clone + Send + Sync> CritiqueGenerator for ModelGenerator<M> {
    fn generate(&self, prompt: &str) -> impl Future<Output = anyhow::Result<String>> + Send {
        let agent = AgentBuilder::new(self.model.clone())
            .preamble(&self.preamble)
            .build();
        let prompt_text = prompt.to_owned();
        let budget_ms = self.budget_ms;

        async move {
            let generation = async move { agent.prompt(&prompt_text).await };
            let response =
                match tokio::time::timeout(Duration::from_millis(budget_ms), generation).await {
                    Ok(Ok(response)) => response,
                    Ok(Err(error)) => {
                        tracing::debug!(%error, "critique generation failed");
                        return Err(anyhow::anyhow!("critique model error: {error}"));
                    }
                    Err(_elapsed) => {
                        tracing::debug!(budget_ms, "critique generation timed out");
                        return Err(anyhow::anyhow!(
                            "critique generation exceeded {budget_ms}ms budget"
                        ));
                    }
                };

            // Strip the leading/trailing whitespace models love to emit.
            Ok(response.trim_matches('\n').trim().to_owned())
        }
    }
}
