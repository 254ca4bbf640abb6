//! Experience data: trials, trajectories, and batches.
//!
//! An experience is one question's full attempt history as produced by the
//! external trajectory-generating agent. The batch assigns each experience a
//! stable index used by categorization and fold assignment downstream.

use serde::{Deserialize, Serialize};

/// A single attempt within a trajectory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Trial {
    /// Whether this attempt produced the correct answer.
    pub is_correct: bool,
    /// The answer the agent committed to.
    pub answer: String,
    /// The full reasoning/tool-use transcript for the attempt.
    pub raw_output: String,
}

impl Trial {
    pub fn new(is_correct: bool, answer: impl Into<String>, raw_output: impl Into<String>) -> Self {
        Self {
            is_correct,
            answer: answer.into(),
            raw_output: raw_output.into(),
        }
    }
}

/// One processed question attempt: the trajectory plus its metadata.
///
/// The trajectory is chronological; the last trial's correctness is
/// authoritative for whether the experience ultimately succeeded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Experience {
    /// Stable position in the batch.
    pub index: usize,
    /// The question posed to the agent.
    pub question: String,
    /// The gold answer used to grade trials.
    pub key: String,
    /// Ordered trial history. Must be non-empty.
    pub trajectory: Vec<Trial>,
    /// Reflection log produced alongside the trajectory.
    pub reflections: Vec<String>,
}

impl Experience {
    /// The trial-correctness sequence, in chronological order.
    pub fn correctness(&self) -> Vec<bool> {
        self.trajectory.iter().map(|trial| trial.is_correct).collect()
    }
}

/// An ordered collection of experiences with stable, batch-assigned indices.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExperienceBatch {
    experiences: Vec<Experience>,
}

impl ExperienceBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an experience, assigning it the next sequential index.
    ///
    /// Returns the assigned index.
    pub fn push(
        &mut self,
        question: impl Into<String>,
        key: impl Into<String>,
        trajectory: Vec<Trial>,
        reflections: Vec<String>,
    ) -> usize {
        let index = self.experiences.len();
        self.experiences.push(Experience {
            index,
            question: question.into(),
            key: key.into(),
            trajectory,
            reflections,
        });
        index
    }

    pub fn len(&self) -> usize {
        self.experiences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiences.is_empty()
    }

    /// Look up an experience by its batch index.
    pub fn get(&self, index: usize) -> Option<&Experience> {
        self.experiences
            .iter()
            .find(|experience| experience.index == index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Experience> {
        self.experiences.iter()
    }
}
