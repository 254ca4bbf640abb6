//! Trajectory categorization.
//!
//! Classifies each experience's trial history into one of three categories
//! based on the pattern of trial outcomes. Categorization is a pure function
//! over the correctness sequence; a pattern that matches no rule is a fatal
//! data-integrity error, never silently defaulted.

use crate::experience::ExperienceBatch;
use crate::InsightError;

use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Outcome category for one experience's trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// More than one trial with the last one correct, typically a recovery
    /// after one or more failed attempts.
    Compare,
    /// Correct on the first and only trial.
    Success,
    /// Never produced a correct answer.
    Fail,
}

impl Category {
    /// All categories in their fixed processing order.
    ///
    /// Fold assignment consumes a single seeded RNG stream while visiting
    /// categories, so this order is part of the determinism contract.
    pub const ALL: [Category; 3] = [Self::Compare, Self::Success, Self::Fail];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compare => write!(f, "compare"),
            Self::Success => write!(f, "success"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

// ---------------------------------------------------------------------------
// Categorization
// ---------------------------------------------------------------------------

/// Classify a trial-correctness sequence into exactly one category.
///
/// Rules are evaluated in order, first match wins:
/// 1. all trials correct and exactly one trial → [`Category::Success`]
/// 2. last trial correct → [`Category::Compare`]
/// 3. not all trials correct → [`Category::Fail`]
///
/// A single incorrect trial lands in `Fail` via rule 3. An empty sequence
/// violates the non-empty-trajectory invariant and is a classification error.
pub fn categorize(trials: &[bool]) -> Result<Category, InsightError> {
    let Some(&last_correct) = trials.last() else {
        return Err(InsightError::Classification("empty trajectory".to_owned()));
    };

    let all_correct = trials.iter().all(|&correct| correct);

    if all_correct && trials.len() == 1 {
        Ok(Category::Success)
    } else if last_correct {
        Ok(Category::Compare)
    } else if !all_correct {
        Ok(Category::Fail)
    } else {
        Err(InsightError::Classification(
            "trial pattern matched no category".to_owned(),
        ))
    }
}

// ---------------------------------------------------------------------------
// CategoryPartition
// ---------------------------------------------------------------------------

/// A partition of experience indices by category.
///
/// Every index appears in exactly one bucket. Buckets keep batch order so
/// downstream shuffles start from a deterministic arrangement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPartition {
    buckets: BTreeMap<Category, Vec<usize>>,
}

impl CategoryPartition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an experience index under its category.
    pub fn insert(&mut self, category: Category, index: usize) {
        self.buckets.entry(category).or_default().push(index);
    }

    /// Indices assigned to a category, in batch order.
    pub fn indices(&self, category: Category) -> &[usize] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of partitioned indices across all categories.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit every category in fixed processing order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[usize])> {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.indices(category)))
    }
}

/// Partition a whole batch of experiences by category.
///
/// Fails on the first unclassifiable trajectory, naming the offending
/// experience index.
pub fn categorize_batch(batch: &ExperienceBatch) -> Result<CategoryPartition, InsightError> {
    let mut partition = CategoryPartition::new();

    for experience in batch.iter() {
        let category = match categorize(&experience.correctness()) {
            Ok(category) => category,
            Err(InsightError::Classification(reason)) => {
                return Err(InsightError::Classification(format!(
                    "experience {}: {reason}",
                    experience.index
                )));
            }
            Err(other) => return Err(other),
        };
        partition.insert(category, experience.index);
    }

    Ok(partition)
}
