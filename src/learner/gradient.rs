//! Gradient of the expected top-k vote utility.
//!
//! Each retrieved result survives pruning independently with its source's
//! keep-probability; the vote is taken over the first `k` survivors. The
//! gradient of the expected utility with respect to the keep-probabilities is
//! computed per sample by three dynamic programs:
//!
//! - `kept_before[c][j]`: probability that exactly `c` of the first `j`
//!   results survive.
//! - `kept_after[c][j]`: probability that exactly `c` of the results
//!   `j..=m` survive.
//! - `boundary[c][j][e]`: probability that at least `c` of the results
//!   `j..=m` survive and the `c`-th survivor carries the `e`-th distinct
//!   utility value. That survivor is the result a newly surviving earlier
//!   result would push out of the top-k window.
//!
//! Per-sample contributions are additive, so the corpus gradient is an
//! ordered sum over samples; the parallel sweep reduces ordered chunks to
//! keep the result reproducible for a fixed worker count.

use rayon::prelude::*;

use super::tensors::{DenseMatrix, DenseTensor};
use crate::encoding::EncodedRetrieval;

/// Reusable DP tables, sized once for the largest sample.
#[derive(Debug)]
pub struct GradientScratch {
    kept_before: DenseMatrix,
    kept_after: DenseMatrix,
    boundary: DenseTensor,
}

impl GradientScratch {
    /// Allocates scratch for samples with at most `max_results` retrieved
    /// results and at most `max_distinct_utilities` distinct utility values.
    pub fn new(k: usize, max_results: usize, max_distinct_utilities: usize) -> Self {
        Self {
            kept_before: DenseMatrix::new(k + 1, max_results + 2),
            kept_after: DenseMatrix::new(k + 1, max_results + 2),
            boundary: DenseTensor::new(k + 1, max_results + 2, max_distinct_utilities),
        }
    }
}

/// Fills the survivor-count prefix/suffix tables for one sample.
///
/// `p[i]` is the keep-probability of the i-th retrieved result. Both tables
/// are re-shaped for this sample; every cell read by the recurrences is
/// rewritten first, so reuse across samples is safe.
pub fn keep_count_probs(p: &[f64], k: usize, before: &mut DenseMatrix, after: &mut DenseMatrix) {
    let m = p.len();

    before.reuse_as(k + 1, m + 2);
    after.reuse_as(k + 1, m + 2);

    before[[0, 0]] = 1.0;
    after[[0, m + 1]] = 1.0;
    for count in 1..=k {
        before[[count, 0]] = 0.0;
        after[[count, m + 1]] = 0.0;
    }

    for j in 1..=m {
        let keep = p[j - 1];
        before[[0, j]] = before[[0, j - 1]] * (1.0 - keep);
        for count in 1..=k {
            before[[count, j]] =
                before[[count, j - 1]] * (1.0 - keep) + before[[count - 1, j - 1]] * keep;
        }
    }

    for j in (1..=m).rev() {
        let keep = p[j - 1];
        after[[0, j]] = after[[0, j + 1]] * (1.0 - keep);
        for count in 1..=k {
            after[[count, j]] =
                after[[count, j + 1]] * (1.0 - keep) + after[[count - 1, j + 1]] * keep;
        }
    }
}

/// Fills the boundary-survivor table for one sample.
///
/// `distinct` holds the sample's distinct utility values in first-seen order;
/// `utilities[i]` is the utility of the i-th retrieved result.
pub fn boundary_value_probs(
    utilities: &[f64],
    distinct: &[f64],
    p: &[f64],
    k: usize,
    boundary: &mut DenseTensor,
) {
    let m = p.len();
    let num_values = distinct.len();

    boundary.reuse_as(k + 1, m + 2, num_values);

    for j in 1..=m + 1 {
        for e in 0..num_values {
            boundary[[0, j, e]] = 0.0;
        }
    }
    for count in 1..=k {
        for e in 0..num_values {
            boundary[[count, m + 1, e]] = 0.0;
        }
    }

    for j in (1..=m).rev() {
        let keep = p[j - 1];

        for (e, &value) in distinct.iter().enumerate() {
            let starts_here = if value == utilities[j - 1] { keep } else { 0.0 };
            boundary[[1, j, e]] =
                boundary[[1, j + 1, e]] * (1.0 - keep) + boundary[[0, j + 1, e]] * keep + starts_here;
        }

        for count in 2..=k {
            for e in 0..num_values {
                boundary[[count, j, e]] = boundary[[count, j + 1, e]] * (1.0 - keep)
                    + boundary[[count - 1, j + 1, e]] * keep;
            }
        }
    }
}

/// Gradient of the expected top-k vote utility of one sample with respect to
/// the per-result keep-probabilities.
///
/// `num_samples` scales the contribution so the corpus gradient averages over
/// samples. Returns one partial derivative per retrieved result.
pub fn sample_gradient(
    utilities: &[f64],
    p: &[f64],
    k: usize,
    num_samples: usize,
    scratch: &mut GradientScratch,
) -> Vec<f64> {
    let m = p.len();
    assert_eq!(
        m,
        utilities.len(),
        "keep-probabilities and utilities must be aligned"
    );

    if m == 0 {
        return Vec::new();
    }

    keep_count_probs(p, k, &mut scratch.kept_before, &mut scratch.kept_after);

    let mut distinct: Vec<f64> = Vec::new();
    for utility in utilities {
        if !distinct.contains(utility) {
            distinct.push(*utility);
        }
    }

    boundary_value_probs(utilities, &distinct, p, k, &mut scratch.boundary);

    let mut gradient = vec![0.0; m];

    for j in 1..=m {
        let contribution = utilities[j - 1];

        // Direct term: result j enters the vote while the window is not full.
        if contribution != 0.0 {
            let gain = (contribution / k as f64) / num_samples as f64;
            for survivors in 0..k {
                for before_count in 0..=survivors {
                    gradient[j - 1] += gain
                        * scratch.kept_before[[before_count, j - 1]]
                        * scratch.kept_after[[survivors - before_count, j + 1]];
                }
            }
        }

        // Displacement term: result j enters a full window and pushes the
        // boundary survivor (with the e-th distinct utility) out of it.
        for (e, &value) in distinct.iter().enumerate() {
            let difference = contribution - value;
            if difference != 0.0 {
                let gain = (difference / k as f64) / num_samples as f64;
                for before_count in 0..k {
                    gradient[j - 1] += gain
                        * scratch.kept_before[[before_count, j - 1]]
                        * scratch.boundary[[k - before_count, j + 1, e]];
                }
            }
        }
    }

    gradient
}

/// Sequential corpus gradient: ordered sum of per-sample gradients.
///
/// `v` holds the per-source keep-probabilities; per-sample probabilities are
/// projected from it through each sample's retrieved indices.
pub(crate) fn corpus_gradient(
    retrievals: &[EncodedRetrieval],
    v: &[f64],
    k: usize,
    num_samples: usize,
    scratch: &mut GradientScratch,
) -> Vec<f64> {
    let mut gradient = vec![0.0; v.len()];
    let mut p: Vec<f64> = Vec::new();

    for retrieval in retrievals {
        p.clear();
        p.extend(retrieval.retrieved().iter().map(|&source| v[source]));

        let contributions =
            sample_gradient(retrieval.utility_contributions(), &p, k, num_samples, scratch);

        for (&source, contribution) in retrieval.retrieved().iter().zip(&contributions) {
            gradient[source] += contribution;
        }
    }

    gradient
}

/// Parallel corpus gradient over ordered chunks.
///
/// Chunk results are collected in order and reduced by a sequential sum, so
/// the result is bitwise reproducible for a fixed `num_workers` and matches
/// the sequential sweep up to floating-point summation order.
pub(crate) fn corpus_gradient_parallel(
    retrievals: &[EncodedRetrieval],
    v: &[f64],
    k: usize,
    max_results: usize,
    max_distinct_utilities: usize,
    num_samples: usize,
    num_workers: usize,
) -> Vec<f64> {
    let chunk_size = retrievals.len() / num_workers.max(1) + 1;

    let chunk_gradients: Vec<Vec<f64>> = retrievals
        .par_chunks(chunk_size)
        .map(|chunk| {
            let mut scratch = GradientScratch::new(k, max_results, max_distinct_utilities);
            corpus_gradient(chunk, v, k, num_samples, &mut scratch)
        })
        .collect();

    let mut gradient = vec![0.0; v.len()];
    for chunk_gradient in chunk_gradients {
        for (sum, value) in gradient.iter_mut().zip(chunk_gradient) {
            *sum += value;
        }
    }

    gradient
}
