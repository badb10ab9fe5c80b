//! Importance learning over encoded retrievals.
//!
//! Every source carries a keep-probability, initialized uniformly and pushed
//! by gradient ascent toward values that maximize the expected top-k
//! majority-vote utility over the validation corpus. When a [`Grouping`] is
//! supplied the parameters are owned per group and projected to member
//! sources at read time, so the tied-weight invariant holds exactly in the
//! returned vector.

pub mod gradient;
pub mod tensors;

#[cfg(test)]
mod tests;

pub use gradient::GradientScratch;

use tracing::{debug, trace};

use crate::config::TrainingConfig;
use crate::constants::INITIAL_KEEP_PROBABILITY;
use crate::encoding::{EncodedRetrieval, Grouping};

/// Hyperparameters consumed by [`learn_importance`].
#[derive(Debug, Clone)]
pub struct LearnerOptions {
    /// Vote cutoff of the downstream top-k majority vote.
    pub k: usize,
    /// Gradient-ascent step size.
    pub learning_rate: f64,
    /// Sequential passes over the corpus.
    pub num_epochs: usize,
    /// Gradient worker threads; `<= 0` means all available cores, `1` runs
    /// the sequential path.
    pub n_jobs: isize,
}

impl From<&TrainingConfig> for LearnerOptions {
    fn from(config: &TrainingConfig) -> Self {
        Self {
            k: config.k,
            learning_rate: config.learning_rate,
            num_epochs: config.num_epochs,
            n_jobs: config.n_jobs,
        }
    }
}

/// Learns one importance weight per source index.
///
/// Returns a vector of length `corpus_size` with every weight in `[0, 1]`.
/// With a grouping, all members of a group receive the identical weight.
/// Deterministic for fixed inputs and `n_jobs`; an empty corpus yields the
/// uniform initial vector.
///
/// # Panics
///
/// Panics if `opts.k` is zero, if a retrieved index is out of
/// `0..corpus_size`, or if the grouping does not cover exactly `corpus_size`
/// sources.
pub fn learn_importance(
    retrievals: &[EncodedRetrieval],
    corpus_size: usize,
    grouping: Option<&Grouping>,
    opts: &LearnerOptions,
) -> Vec<f64> {
    assert!(opts.k >= 1, "vote cutoff k must be positive");
    if let Some(grouping) = grouping {
        assert_eq!(
            grouping.len(),
            corpus_size,
            "grouping must assign every indexed source"
        );
    }

    if retrievals.is_empty() || corpus_size == 0 {
        return vec![INITIAL_KEEP_PROBABILITY; corpus_size];
    }

    let max_results = retrievals
        .iter()
        .map(EncodedRetrieval::len)
        .max()
        .unwrap_or(0);
    let max_distinct_utilities = retrievals
        .iter()
        .map(|retrieval| {
            let mut distinct: Vec<f64> = Vec::new();
            for utility in retrieval.utility_contributions() {
                if !distinct.contains(utility) {
                    distinct.push(*utility);
                }
            }
            distinct.len()
        })
        .max()
        .unwrap_or(0);

    let num_samples = retrievals.len();

    // One parameter per group under tying, else one per source.
    let num_params = grouping.map_or(corpus_size, Grouping::num_groups);
    let mut params = vec![INITIAL_KEEP_PROBABILITY; num_params];
    let mut projected = vec![0.0; corpus_size];

    let dedicated_pool = (opts.n_jobs > 1).then(|| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(opts.n_jobs as usize)
            .build()
            .expect("failed to build gradient worker pool")
    });
    let sequential = opts.n_jobs == 1;

    let mut scratch = GradientScratch::new(opts.k, max_results, max_distinct_utilities);

    debug!(
        num_samples,
        corpus_size,
        num_params,
        k = opts.k,
        num_epochs = opts.num_epochs,
        "learning importance weights"
    );

    for epoch in 0..opts.num_epochs {
        project(&params, grouping, &mut projected);

        let corpus_gradient = if sequential {
            gradient::corpus_gradient(retrievals, &projected, opts.k, num_samples, &mut scratch)
        } else if let Some(pool) = &dedicated_pool {
            let workers = pool.current_num_threads();
            pool.install(|| {
                gradient::corpus_gradient_parallel(
                    retrievals,
                    &projected,
                    opts.k,
                    max_results,
                    max_distinct_utilities,
                    num_samples,
                    workers,
                )
            })
        } else {
            gradient::corpus_gradient_parallel(
                retrievals,
                &projected,
                opts.k,
                max_results,
                max_distinct_utilities,
                num_samples,
                rayon::current_num_threads(),
            )
        };

        match grouping {
            None => {
                for (param, partial) in params.iter_mut().zip(&corpus_gradient) {
                    *param = (*param + opts.learning_rate * partial).clamp(0.0, 1.0);
                }
            }
            Some(grouping) => {
                // Tied update: the group gradient is the mean over members.
                let mut sums = vec![0.0; grouping.num_groups()];
                let mut counts = vec![0usize; grouping.num_groups()];

                for (source, &group) in grouping.assignment().iter().enumerate() {
                    sums[group] += corpus_gradient[source];
                    counts[group] += 1;
                }

                for (group, param) in params.iter_mut().enumerate() {
                    if counts[group] > 0 {
                        let step = opts.learning_rate * sums[group] / counts[group] as f64;
                        *param = (*param + step).clamp(0.0, 1.0);
                    }
                }
            }
        }

        trace!(epoch, "epoch complete");
    }

    project(&params, grouping, &mut projected);
    projected
}

/// Read-time projection of parameters onto source indices.
fn project(params: &[f64], grouping: Option<&Grouping>, projected: &mut [f64]) {
    match grouping {
        None => projected.copy_from_slice(params),
        Some(grouping) => {
            for (slot, &group) in projected.iter_mut().zip(grouping.assignment()) {
                *slot = params[group];
            }
        }
    }
}
