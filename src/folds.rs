//! Stratified cross-validation fold assignment.
//!
//! Partitions experience indices into folds by shuffling each category with a
//! seeded generator and round-robin-assigning shuffled indices as held-out
//! items. Each fold's training set is the complement of its held-out slice,
//! so every index is held out in exactly one fold and trains in all others.

use crate::category::CategoryPartition;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use std::collections::{BTreeMap, BTreeSet};

/// Distribute experience indices into `n_folds` stratified training sets.
///
/// The generator is locally scoped and seeded per call, so concurrent callers
/// with different seeds never interfere and a fixed
/// `(partition, n_instances, n_folds, seed)` tuple always yields a
/// bit-identical mapping. Categories are visited in their fixed processing
/// order ([`crate::Category::ALL`]) because all shuffles draw from the same
/// stream.
///
/// `n_folds` must be at least 1. Folds may receive zero held-out items from a
/// category smaller than `n_folds`; that is acceptable, not an error. The
/// caller is responsible for keeping `n_instances` consistent with the total
/// index count implied by the partition.
pub fn assign_folds(
    partition: &CategoryPartition,
    n_instances: usize,
    n_folds: usize,
    seed: u64,
) -> BTreeMap<usize, BTreeSet<usize>> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut held_out: Vec<Vec<usize>> = vec![Vec::new(); n_folds];
    for (_, indices) in partition.iter() {
        let mut shuffled = indices.to_vec();
        shuffled.shuffle(&mut rng);
        for (position, index) in shuffled.into_iter().enumerate() {
            held_out[position % n_folds].push(index);
        }
    }

    // Invert: each fold trains on everything it does not hold out.
    (0..n_folds)
        .map(|fold| {
            let held: BTreeSet<usize> = held_out[fold].iter().copied().collect();
            let training: BTreeSet<usize> = (0..n_instances)
                .filter(|index| !held.contains(index))
                .collect();
            (fold, training)
        })
        .collect()
}
