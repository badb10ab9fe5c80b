//! Per-group projection of the learned weight vector.

use std::collections::HashMap;

use crate::encoding::{GroupMapping, Grouping};

/// Learned weight per group id.
pub type GroupWeights = HashMap<String, f64>;

/// Projects per-source weights to per-group weights.
///
/// Reads the weight of one representative member per group. This is valid
/// only under the learner's tying invariant (all members of a group carry an
/// identical weight); a violated invariant is not detected here and silently
/// yields the representative's value. Groups without any member source are
/// omitted. O(N) in the number of indexed sources.
pub fn grouped_weights(
    weights: &[f64],
    grouping: &Grouping,
    group_mapping: &GroupMapping,
) -> GroupWeights {
    let mut representative: Vec<Option<usize>> = vec![None; grouping.num_groups()];

    for (source, &group) in grouping.assignment().iter().enumerate() {
        representative[group].get_or_insert(source);
    }

    group_mapping
        .groups()
        .iter()
        .enumerate()
        .filter_map(|(group, id)| {
            representative[group].map(|source| (id.clone(), weights[source]))
        })
        .collect()
}
