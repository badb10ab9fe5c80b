//! Pruning-threshold tuning over the group-weight distribution.
//!
//! The tuner sweeps percentile cut points of the learned group weights in
//! ascending order and keeps the best achieved utility under a non-strict
//! comparison: among tied percentiles the highest one wins, biasing the
//! result toward more aggressive pruning when the effect is equal.

pub mod error;
pub mod types;


pub use error::TuningError;
pub use types::TuningResult;

use std::cmp::Ordering;

use tracing::{debug, info};

use crate::corpus::{ValidationSample, majority_vote};
use crate::weights::GroupWeights;

/// Grid-searches a pruning threshold that maximizes aggregate utility.
///
/// For each percentile in `percentile_range` (ascending, each in `[0, 100)`),
/// the threshold is the linearly interpolated percentile of the group-weight
/// values; every sample is evaluated under the pruning rule (answers from
/// unseen groups always pass, otherwise the group weight must reach the
/// threshold), truncated to the first `k` survivors in retrieval order and
/// majority-voted. With `normalize`, aggregate utility is averaged over the
/// sample count.
pub fn tune_pruning_threshold<U, G>(
    samples: &[ValidationSample],
    group_weights: &GroupWeights,
    percentile_range: &[usize],
    utility: U,
    group: G,
    k: usize,
    normalize: bool,
) -> Result<TuningResult, TuningError>
where
    U: Fn(&ValidationSample, &str) -> f64,
    G: Fn(&str) -> String,
{
    if samples.is_empty() {
        return Err(TuningError::NoSamples);
    }
    if group_weights.is_empty() {
        return Err(TuningError::NoWeights);
    }
    if percentile_range.is_empty() {
        return Err(TuningError::EmptyPercentileRange);
    }
    if let Some(&out_of_range) = percentile_range.iter().find(|&&p| p >= 100) {
        return Err(TuningError::InvalidPercentile {
            value: out_of_range,
        });
    }
    if percentile_range.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(TuningError::PercentileRangeNotAscending);
    }

    let mut sorted_weights: Vec<f64> = group_weights.values().copied().collect();
    sorted_weights.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mut best_utility = 0.0;
    let mut best_threshold = 0.0;
    let mut best_percentile = 0;

    let mut achieved_utilities = Vec::with_capacity(percentile_range.len());

    for &p in percentile_range {
        let threshold = percentile(&sorted_weights, p);

        let achieved_utility = evaluate_pruned(
            samples,
            &utility,
            &group,
            k,
            threshold,
            group_weights,
            normalize,
        );

        debug!(percentile = p, threshold, achieved_utility, "tested cut point");

        achieved_utilities.push(achieved_utility);

        // Non-strict: the highest tied percentile wins.
        if achieved_utility >= best_utility {
            best_utility = achieved_utility;
            best_threshold = threshold;
            best_percentile = p;
        }
    }

    info!(
        best_utility,
        best_threshold, best_percentile, "pruning threshold tuned"
    );

    Ok(TuningResult {
        achieved_utilities,
        best_utility,
        best_threshold,
        best_percentile,
    })
}

/// Aggregate utility over all samples under one threshold.
pub(crate) fn evaluate_pruned<U, G>(
    samples: &[ValidationSample],
    utility: &U,
    group: &G,
    k: usize,
    threshold: f64,
    group_weights: &GroupWeights,
    normalize: bool,
) -> f64
where
    U: Fn(&ValidationSample, &str) -> f64,
    G: Fn(&str) -> String,
{
    let mut aggregate_utility = 0.0;

    for sample in samples {
        aggregate_utility +=
            evaluate_sample_pruned(sample, utility, group, k, threshold, group_weights);
    }

    if normalize {
        aggregate_utility /= samples.len() as f64;
    }

    aggregate_utility
}

/// Utility of one sample's pruned top-k vote; `0.0` when nothing survives.
fn evaluate_sample_pruned<U, G>(
    sample: &ValidationSample,
    utility: &U,
    group: &G,
    k: usize,
    threshold: f64,
    group_weights: &GroupWeights,
) -> f64
where
    U: Fn(&ValidationSample, &str) -> f64,
    G: Fn(&str) -> String,
{
    let survivors: Vec<&String> = sample
        .generated_answers()
        .iter()
        .zip(sample.retrieved_sources())
        .filter(|(_, source)| match group_weights.get(&group(source)) {
            // Unseen groups always pass.
            None => true,
            Some(&weight) => weight >= threshold,
        })
        .map(|(answer, _)| answer)
        .take(k)
        .collect();

    match majority_vote(&survivors) {
        Some(prediction) => utility(sample, prediction),
        None => 0.0,
    }
}

/// Linearly interpolated percentile of pre-sorted values.
fn percentile(sorted: &[f64], p: usize) -> f64 {
    debug_assert!(!sorted.is_empty());

    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (p as f64 / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
