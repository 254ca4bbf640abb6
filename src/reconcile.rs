//! Operation reconciliation against an insight list snapshot.
//!
//! The critique that produced a batch of operations saw the insight list as
//! it was when the prompt was built; by reconciliation time the world may
//! have moved. Each operation is validated against a single consistent
//! snapshot — kept, rewritten, or silently dropped — so that everything
//! emitted is structurally safe to apply to that snapshot.

use crate::insight::InsightList;
use crate::operations::{Operation, OperationKind};

/// Filter and rewrite parsed operations against the current insight list.
///
/// Per-operation rules, first match wins; survivors keep their input order:
/// - `ADD`: kept only if no existing insight already occurs in the payload
///   text (duplicate additions are dropped).
/// - `REMOVE` / `AGREE`: kept only if a containment match exists — the
///   insight they refer to must still be present.
/// - `EDIT` with a containment match: rewritten to `AGREE` at the *found*
///   index. A proposed edit that already matches an existing insight is
///   reinforcement, and the generator's claimed index may be stale.
/// - `EDIT` without a match: kept only if it carries an index within
///   `0..=len` — indexless or out-of-range edits are dropped.
/// - Anything else is dropped without error; stale operations are expected
///   once the list has moved since the critique was generated.
pub fn reconcile(insights: &InsightList, operations: Vec<Operation>) -> Vec<Operation> {
    let mut reconciled = Vec::with_capacity(operations.len());

    for operation in operations {
        let found = insights.find_containing(&operation.text);

        match (&operation.kind, found) {
            (OperationKind::Add, None) => reconciled.push(operation),
            (OperationKind::Remove(_), Some(_)) | (OperationKind::Agree(_), Some(_)) => {
                reconciled.push(operation);
            }
            (OperationKind::Edit(_), Some(index)) => {
                reconciled.push(Operation::new(OperationKind::Agree(Some(index)), operation.text));
            }
            (OperationKind::Edit(Some(index)), None) if *index <= insights.len() => {
                reconciled.push(operation);
            }
            _ => {
                // Stale or inapplicable operation: dropped silently.
            }
        }
    }

    reconciled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::InsightList;

    fn make_insights(texts: &[&str]) -> InsightList {
        InsightList::from_texts(texts.iter().copied())
    }

    // --- ADD ---

    #[test]
    fn duplicate_add_is_dropped() {
        let insights = make_insights(&["X is true."]);
        let operations = vec![Operation::new(OperationKind::Add, "X is true.")];
        assert!(reconcile(&insights, operations).is_empty());
    }

    #[test]
    fn novel_add_survives() {
        let insights = make_insights(&["X is true."]);
        let operations = vec![Operation::new(OperationKind::Add, "Y is also worth noting.")];
        let reconciled = reconcile(&insights, operations);
        assert_eq!(reconciled.len(), 1);
        assert_eq!(reconciled[0].kind, OperationKind::Add);
    }

    #[test]
    fn add_containing_an_existing_insight_is_a_duplicate() {
        // Containment lookup: the existing text occurs inside the payload.
        let insights = make_insights(&["X is true."]);
        let operations = vec![Operation::new(
            OperationKind::Add,
            "Note that X is true. Always remember it.",
        )];
        assert!(reconcile(&insights, operations).is_empty());
    }

    // --- REMOVE / AGREE ---

    #[test]
    fn remove_of_an_existing_insight_survives() {
        let insights = make_insights(&["X is true."]);
        let operations = vec![Operation::new(OperationKind::Remove(None), "X is true.")];
        let reconciled = reconcile(&insights, operations);
        assert_eq!(reconciled.len(), 1);
        assert_eq!(reconciled[0].kind, OperationKind::Remove(None));
    }

    #[test]
    fn remove_of_a_vanished_insight_is_dropped_silently() {
        let insights = make_insights(&["X is true."]);
        let operations = vec![Operation::new(
            OperationKind::Remove(Some(0)),
            "Something that no longer exists.",
        )];
        assert!(reconcile(&insights, operations).is_empty());
    }

    #[test]
    fn agree_without_a_match_is_dropped_silently() {
        let insights = make_insights(&["X is true."]);
        let operations = vec![Operation::new(
            OperationKind::Agree(Some(3)),
            "Completely unrelated statement.",
        )];
        assert!(reconcile(&insights, operations).is_empty());
    }

    // --- EDIT ---

    #[test]
    fn edit_matching_an_existing_insight_becomes_agree_at_found_index() {
        let insights = make_insights(&["X is true."]);
        let operations = vec![Operation::new(OperationKind::Edit(Some(5)), "X is true.")];
        let reconciled = reconcile(&insights, operations);
        assert_eq!(reconciled.len(), 1);
        // The found index wins over the generator's stale claim of 5.
        assert_eq!(reconciled[0].kind, OperationKind::Agree(Some(0)));
        assert_eq!(reconciled[0].text, "X is true.");
    }

    #[test]
    fn unmatched_edit_within_range_survives_as_is() {
        let insights = make_insights(&["A.", "B.", "C."]);
        let operations = vec![Operation::new(OperationKind::Edit(Some(1)), "brand new text.")];
        let reconciled = reconcile(&insights, operations);
        assert_eq!(reconciled.len(), 1);
        assert_eq!(reconciled[0].kind, OperationKind::Edit(Some(1)));
    }

    #[test]
    fn unmatched_edit_beyond_range_is_dropped() {
        let insights = make_insights(&["A.", "B.", "C."]);
        let operations = vec![Operation::new(OperationKind::Edit(Some(9)), "brand new text.")];
        assert!(reconcile(&insights, operations).is_empty());
    }

    #[test]
    fn unmatched_edit_at_the_inclusive_boundary_survives() {
        let insights = make_insights(&["A.", "B.", "C."]);
        let operations = vec![Operation::new(OperationKind::Edit(Some(3)), "brand new text.")];
        assert_eq!(reconcile(&insights, operations).len(), 1);
    }

    #[test]
    fn unmatched_edit_without_an_index_is_dropped() {
        let insights = make_insights(&["A.", "B."]);
        let operations = vec![Operation::new(OperationKind::Edit(None), "brand new text.")];
        assert!(reconcile(&insights, operations).is_empty());
    }

    // --- Ordering ---

    #[test]
    fn survivors_keep_their_input_order() {
        let insights = make_insights(&["X is true."]);
        let operations = vec![
            Operation::new(OperationKind::Agree(Some(0)), "X is true."),
            Operation::new(OperationKind::Add, "X is true."), // dropped: duplicate
            Operation::new(OperationKind::Add, "Y deserves a rule."),
            Operation::new(OperationKind::Remove(None), "X is true."),
        ];
        let kinds: Vec<String> = reconcile(&insights, operations)
            .iter()
            .map(|operation| operation.kind.to_string())
            .collect();
        assert_eq!(kinds, vec!["AGREE 0", "ADD", "REMOVE"]);
    }
}
