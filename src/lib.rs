//! Experience-driven insight extraction for question-answering agents.
//!
//! Turns a batch of past attempt trajectories into a curated, ordered set of
//! natural-language insights that bias future attempts. The deterministic
//! bookkeeping lives here: trajectory categorization, stratified fold
//! assignment, critique-to-operation parsing, and reconciliation of parsed
//! operations against the current insight list. Trajectory generation and
//! the text-generation model itself are external collaborators.

pub mod category;
pub mod config;
pub mod experience;
pub mod folds;
pub mod insight;
pub mod llm;
pub mod operations;
pub mod pipeline;
pub mod prompts;
pub mod reconcile;

pub use category::{categorize, categorize_batch, Category, CategoryPartition};
pub use config::ExtractionConfig;
pub use experience::{Experience, ExperienceBatch, Trial};
pub use folds::assign_folds;
pub use insight::{Insight, InsightList};
pub use llm::{CritiqueGenerator, ModelGenerator};
pub use operations::{parse_operations, Operation, OperationKind};
pub use pipeline::{ExtractionReport, InsightExtractor};
pub use reconcile::reconcile;

use thiserror::Error;

/// Insight engine errors.
///
/// Only true invariant violations surface here. Noisy critique text and
/// stale operations are filtered silently by the parser and reconciler —
/// they are expected generator behavior, not errors.
#[derive(Debug, Error)]
pub enum InsightError {
    /// A trajectory's trial pattern matched none of the category rules.
    /// Indicates malformed experience data upstream.
    #[error("classification failed: {0}")]
    Classification(String),

    /// The text-generation collaborator failed to produce a critique.
    #[error("critique generation failed: {0}")]
    Generation(#[from] anyhow::Error),
}
