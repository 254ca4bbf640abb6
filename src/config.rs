//! Insight extraction configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the insight extraction pipeline.
///
/// All fields have fixed defaults so repeated runs over the same experience
/// batch are reproducible out of the box.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExtractionConfig {
    /// Number of stratified cross-validation folds.
    pub n_folds: usize,
    /// Seed for the fold-shuffle generator.
    pub seed: u64,
    /// Whether critique prompts carry the full-length summary suffix.
    pub is_full: bool,
    /// Number of successful trajectories batched into one critique round.
    pub success_batch_size: usize,
    /// Time budget in milliseconds for a single critique generation.
    pub critique_budget_ms: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            n_folds: 2,
            seed: 42,
            is_full: false,
            success_batch_size: 8,
            critique_budget_ms: 30_000,
        }
    }
}
