//! The insight list: an ordered, mutable set of learned heuristics.
//!
//! Order is significant — positions are the indices that `EDIT n` and
//! `AGREE n` operations refer to. Existence checks use textual containment
//! rather than exact equality; that loose matching is deliberate, observable
//! behavior, and tightening it would be a policy change.

use crate::operations::{Operation, OperationKind};

use serde::{Deserialize, Serialize};

/// Strength assigned to a freshly added insight.
pub const INITIAL_STRENGTH: i64 = 2;

/// A persistent natural-language heuristic with a reinforcement score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Insight {
    pub text: String,
    /// Reinforcement count: starts at [`INITIAL_STRENGTH`], incremented by
    /// AGREE and EDIT operations.
    pub strength: i64,
}

impl Insight {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            strength: INITIAL_STRENGTH,
        }
    }
}

/// The ordered insight list shared across critique rounds.
///
/// Reconciliation is computed against a snapshot of this list; the accepted
/// operations are then applied here before the next round's reconciliation
/// runs. Mutation order must follow a single well-defined round order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsightList {
    insights: Vec<Insight>,
}

impl InsightList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from plain texts, each at initial strength.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            insights: texts.into_iter().map(Insight::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.insights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Insight> {
        self.insights.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Insight> {
        self.insights.iter()
    }

    pub fn as_slice(&self) -> &[Insight] {
        &self.insights
    }

    /// Find the first insight whose text occurs inside `candidate`.
    ///
    /// This is the existence check used by reconciliation and application:
    /// an insight "exists" for an operation when its full text appears
    /// within the operation's payload.
    pub fn find_containing(&self, candidate: &str) -> Option<usize> {
        self.insights
            .iter()
            .position(|insight| candidate.contains(&insight.text))
    }

    /// Render the list as `"<index>. <text>"` lines for prompt embedding.
    pub fn numbered(&self) -> String {
        self.insights
            .iter()
            .enumerate()
            .map(|(index, insight)| format!("{index}. {}", insight.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Apply one round's reconciled operations, in order.
    ///
    /// - `ADD` appends a new insight at initial strength.
    /// - `REMOVE` deletes the first containment match.
    /// - `AGREE` reinforces the first containment match.
    /// - `EDIT i` replaces the text at `i` and reinforces it; an edit landing
    ///   exactly one past the end appends instead (the reconciler's index
    ///   bound is inclusive).
    ///
    /// Operations whose target vanished earlier in the same round are
    /// skipped. Returns the number of operations that took effect.
    pub fn apply(&mut self, operations: &[Operation]) -> usize {
        let mut applied = 0;

        for operation in operations {
            match &operation.kind {
                OperationKind::Add => {
                    self.insights.push(Insight::new(operation.text.clone()));
                    applied += 1;
                }
                OperationKind::Remove(_) => {
                    if let Some(index) = self.find_containing(&operation.text) {
                        self.insights.remove(index);
                        applied += 1;
                    }
                }
                OperationKind::Agree(_) => {
                    if let Some(index) = self.find_containing(&operation.text) {
                        self.insights[index].strength += 1;
                        applied += 1;
                    }
                }
                OperationKind::Edit(Some(index)) => {
                    if *index < self.insights.len() {
                        self.insights[*index].text = operation.text.clone();
                        self.insights[*index].strength += 1;
                        applied += 1;
                    } else if *index == self.insights.len() {
                        self.insights.push(Insight::new(operation.text.clone()));
                        applied += 1;
                    }
                }
                OperationKind::Edit(None) => {
                    // Indexless edits never survive reconciliation.
                }
            }
        }

        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Containment lookup ---

    #[test]
    fn find_containing_matches_the_first_occurrence() {
        let insights = InsightList::from_texts(["A is true.", "B is true."]);
        assert_eq!(insights.find_containing("Indeed, A is true."), Some(0));
        assert_eq!(insights.find_containing("B is true."), Some(1));
        assert_eq!(insights.find_containing("C is false."), None);
    }

    #[test]
    fn find_containing_is_a_substring_check_not_equality() {
        let insights = InsightList::from_texts(["check sources."]);
        assert_eq!(
            insights.find_containing("Always check sources. Then answer."),
            Some(0)
        );
    }

    // --- Rendering ---

    #[test]
    fn numbered_renders_positional_indices() {
        let insights = InsightList::from_texts(["First rule.", "Second rule."]);
        assert_eq!(insights.numbered(), "0. First rule.\n1. Second rule.");
    }

    #[test]
    fn numbered_is_empty_for_an_empty_list() {
        assert_eq!(InsightList::new().numbered(), "");
    }

    // --- Apply ---

    #[test]
    fn add_appends_at_initial_strength() {
        let mut insights = InsightList::new();
        let applied = insights.apply(&[Operation::new(OperationKind::Add, "New rule.")]);
        assert_eq!(applied, 1);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights.get(0).unwrap().strength, INITIAL_STRENGTH);
    }

    #[test]
    fn agree_increments_strength() {
        let mut insights = InsightList::from_texts(["X is true."]);
        insights.apply(&[Operation::new(OperationKind::Agree(Some(0)), "X is true.")]);
        assert_eq!(insights.get(0).unwrap().strength, INITIAL_STRENGTH + 1);
    }

    #[test]
    fn remove_deletes_by_found_index() {
        let mut insights = InsightList::from_texts(["A.", "B."]);
        insights.apply(&[Operation::new(OperationKind::Remove(None), "A.")]);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights.get(0).unwrap().text, "B.");
    }

    #[test]
    fn edit_replaces_in_place_and_reinforces() {
        let mut insights = InsightList::from_texts(["Old text."]);
        insights.apply(&[Operation::new(OperationKind::Edit(Some(0)), "New text.")]);
        assert_eq!(insights.get(0).unwrap().text, "New text.");
        assert_eq!(insights.get(0).unwrap().strength, INITIAL_STRENGTH + 1);
    }

    #[test]
    fn edit_one_past_the_end_appends() {
        let mut insights = InsightList::from_texts(["Only rule."]);
        insights.apply(&[Operation::new(OperationKind::Edit(Some(1)), "Appended rule.")]);
        assert_eq!(insights.len(), 2);
        assert_eq!(insights.get(1).unwrap().text, "Appended rule.");
    }

    #[test]
    fn operations_apply_in_sequence_within_a_round() {
        let mut insights = InsightList::from_texts(["X is true."]);
        let applied = insights.apply(&[
            Operation::new(OperationKind::Agree(Some(0)), "X is true."),
            Operation::new(OperationKind::Remove(None), "X is true."),
        ]);
        // The AGREE lands first, then the REMOVE deletes the same insight.
        assert_eq!(applied, 2);
        assert!(insights.is_empty());
    }

    #[test]
    fn operation_whose_target_vanished_mid_round_is_skipped() {
        let mut insights = InsightList::from_texts(["X is true."]);
        let applied = insights.apply(&[
            Operation::new(OperationKind::Remove(None), "X is true."),
            Operation::new(OperationKind::Agree(Some(0)), "X is true."),
        ]);
        assert_eq!(applied, 1);
        assert!(insights.is_empty());
    }
}
