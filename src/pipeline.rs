//! The insight extraction pipeline.
//!
//! Drives critique rounds over a categorized experience batch: compare
//! rounds first (one per failed trial against the final successful trial),
//! then success rounds over batched successful trajectories. Rounds are
//! strictly sequential. Each round's reconciliation is computed against the
//! insight list as mutated by every previous round, and its accepted
//! operations are applied before the next round begins.

use crate::category::{categorize_batch, Category};
use crate::config::ExtractionConfig;
use crate::experience::ExperienceBatch;
use crate::insight::InsightList;
use crate::llm::CritiqueGenerator;
use crate::operations::parse_operations;
use crate::prompts;
use crate::reconcile::reconcile;
use crate::InsightError;

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Accounting for one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Critique rounds run over compare-category experiences.
    pub compare_rounds: usize,
    /// Critique rounds run over success-category batches.
    pub success_rounds: usize,
    /// Operations extracted by the parser across all rounds.
    pub operations_parsed: usize,
    /// Operations that survived reconciliation and took effect.
    pub operations_applied: usize,
}

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

/// Runs the full critique-and-apply loop over an experience batch.
pub struct InsightExtractor<G> {
    generator: G,
    config: ExtractionConfig,
}

impl<G: CritiqueGenerator> InsightExtractor<G> {
    pub fn new(generator: G, config: ExtractionConfig) -> Self {
        Self { generator, config }
    }

    /// Extract insights from a batch, mutating `insights` round by round.
    ///
    /// Compare rounds run first in ascending experience-index order, then
    /// success rounds. A generation failure aborts the pass; the insight
    /// list keeps every round applied up to that point.
    pub async fn extract(
        &self,
        batch: &ExperienceBatch,
        insights: &mut InsightList,
    ) -> Result<ExtractionReport, InsightError> {
        let partition = categorize_batch(batch)?;
        let mut report = ExtractionReport::default();

        // Compare rounds: each failed trial against the final success.
        for &index in partition.indices(Category::Compare) {
            let Some(experience) = batch.get(index) else {
                continue;
            };
            let Some(success_trial) = experience.trajectory.last() else {
                continue;
            };

            for failed_trial in experience.trajectory.iter().filter(|trial| !trial.is_correct) {
                let prompt = prompts::build_compare_prompt(
                    insights,
                    &experience.question,
                    &success_trial.raw_output,
                    &failed_trial.raw_output,
                    self.config.is_full,
                );
                self.run_round(&prompt, insights, &mut report).await?;
                report.compare_rounds += 1;
            }
        }

        // Success rounds: final trajectories, batched.
        let chunk_size = self.config.success_batch_size.max(1);
        for chunk in partition.indices(Category::Success).chunks(chunk_size) {
            let mut trajectories = Vec::with_capacity(chunk.len());
            for &index in chunk {
                let Some(experience) = batch.get(index) else {
                    continue;
                };
                if let Some(trial) = experience.trajectory.last() {
                    trajectories.push(trial.raw_output.clone());
                }
            }
            if trajectories.is_empty() {
                continue;
            }

            let prompt = prompts::build_all_success_prompt(
                insights,
                &trajectories.join("\n\n"),
                self.config.is_full,
            );
            self.run_round(&prompt, insights, &mut report).await?;
            report.success_rounds += 1;
        }

        tracing::debug!(
            compare_rounds = report.compare_rounds,
            success_rounds = report.success_rounds,
            operations_applied = report.operations_applied,
            insight_count = insights.len(),
            "extraction pass complete"
        );

        Ok(report)
    }

    /// One critique round: generate, parse, reconcile against the current
    /// snapshot, apply.
    async fn run_round(
        &self,
        prompt: &str,
        insights: &mut InsightList,
        report: &mut ExtractionReport,
    ) -> Result<(), InsightError> {
        let critique = self.generator.generate(prompt).await?;

        let parsed = parse_operations(&critique);
        let parsed_count = parsed.len();
        report.operations_parsed += parsed_count;

        let reconciled = reconcile(insights, parsed);
        let applied = insights.apply(&reconciled);
        report.operations_applied += applied;

        tracing::debug!(
            parsed = parsed_count,
            applied,
            insight_count = insights.len(),
            "critique round applied"
        );

        Ok(())
    }
}
