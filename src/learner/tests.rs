use super::gradient::{boundary_value_probs, keep_count_probs, sample_gradient};
use super::tensors::{DenseMatrix, DenseTensor};
use super::*;
use crate::encoding::{EncodedRetrieval, Grouping};

const EPSILON: f64 = 1e-12;

fn options(k: usize, learning_rate: f64, num_epochs: usize, n_jobs: isize) -> LearnerOptions {
    LearnerOptions {
        k,
        learning_rate,
        num_epochs,
        n_jobs,
    }
}

#[test]
fn keep_count_probs_match_hand_computation() {
    // Two results, both kept with probability 0.5; all values are binary
    // fractions, so the assertions are exact.
    let p = vec![0.5, 0.5];
    let k = 1;

    let mut before = DenseMatrix::new(k + 1, p.len() + 2);
    let mut after = DenseMatrix::new(k + 1, p.len() + 2);

    keep_count_probs(&p, k, &mut before, &mut after);

    assert_eq!(before[[0, 0]], 1.0);
    assert_eq!(before[[0, 1]], 0.5);
    assert_eq!(before[[1, 1]], 0.5);
    assert_eq!(before[[0, 2]], 0.25);
    assert_eq!(before[[1, 2]], 0.5);

    assert_eq!(after[[0, 3]], 1.0);
    assert_eq!(after[[0, 2]], 0.5);
    assert_eq!(after[[1, 2]], 0.5);
    assert_eq!(after[[0, 1]], 0.25);
    assert_eq!(after[[1, 1]], 0.5);
}

#[test]
fn boundary_value_probs_match_hand_computation() {
    // First survivor distribution: P(first survivor has utility 1.0) = p[0],
    // P(first survivor has utility 0.0) = (1 - p[0]) * p[1].
    let p = vec![0.5, 0.5];
    let utilities = vec![1.0, 0.0];
    let distinct = vec![1.0, 0.0];
    let k = 1;

    let mut boundary = DenseTensor::new(k + 1, p.len() + 2, distinct.len());
    boundary_value_probs(&utilities, &distinct, &p, k, &mut boundary);

    assert_eq!(boundary[[1, 2, 0]], 0.0);
    assert_eq!(boundary[[1, 2, 1]], 0.5);
    assert_eq!(boundary[[1, 1, 0]], 0.5);
    assert_eq!(boundary[[1, 1, 1]], 0.25);
}

#[test]
fn sample_gradient_matches_analytic_derivative() {
    // k = 1, one sample: expected utility is
    //   E = p1 * u1 + (1 - p1) * p2 * u2
    // so dE/dp1 = u1 - p2 * u2 and dE/dp2 = (1 - p1) * u2.
    let p = vec![0.5, 0.5];
    let k = 1;
    let mut scratch = GradientScratch::new(k, p.len(), 2);

    let gradient = sample_gradient(&[1.0, 0.0], &p, k, 1, &mut scratch);
    assert!((gradient[0] - 1.0).abs() < EPSILON);
    assert!(gradient[1].abs() < EPSILON);

    let gradient = sample_gradient(&[0.0, 1.0], &p, k, 1, &mut scratch);
    assert!((gradient[0] - (-0.5)).abs() < EPSILON);
    assert!((gradient[1] - 0.5).abs() < EPSILON);
}

#[test]
fn scratch_reuse_does_not_change_results() {
    let p = vec![0.3, 0.8, 0.5, 0.9];
    let utilities = vec![1.0, 0.0, 1.0, 0.0];
    let k = 2;

    let mut fresh = GradientScratch::new(k, 16, 8);
    let mut reused = GradientScratch::new(k, 16, 8);

    // Pollute the reused scratch with a larger, different sample first.
    let _ = sample_gradient(
        &[0.5, 0.25, 0.75, 0.0, 1.0, 0.5],
        &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
        k,
        3,
        &mut reused,
    );

    let expected = sample_gradient(&utilities, &p, k, 1, &mut fresh);
    let actual = sample_gradient(&utilities, &p, k, 1, &mut reused);

    assert_eq!(expected, actual);
}

#[test]
fn empty_corpus_yields_uniform_weights() {
    let weights = learn_importance(&[], 5, None, &options(3, 10.0, 100, 1));
    assert_eq!(weights, vec![INITIAL_KEEP_PROBABILITY; 5]);
}

#[test]
fn empty_samples_are_tolerated() {
    let retrievals = vec![
        EncodedRetrieval::new(vec![], vec![]),
        EncodedRetrieval::new(vec![0, 1], vec![1.0, 0.0]),
    ];

    let weights = learn_importance(&retrievals, 2, None, &options(1, 0.1, 3, 1));

    assert_eq!(weights.len(), 2);
    assert!(weights.iter().all(|w| (0.0..=1.0).contains(w)));
}

#[test]
fn grouped_sources_receive_identical_weights() {
    // Sources 0/2 share group 0, sources 1/3 share group 1; the group
    // members see different utilities, so only true parameter tying makes
    // their weights agree exactly.
    let retrievals = vec![
        EncodedRetrieval::new(vec![0, 1, 2], vec![1.0, 0.0, 0.0]),
        EncodedRetrieval::new(vec![2, 3, 0], vec![1.0, 0.0, 1.0]),
        EncodedRetrieval::new(vec![1, 3], vec![0.0, 1.0]),
    ];
    let grouping = Grouping::new(2, vec![0, 1, 0, 1]);

    let weights = learn_importance(&retrievals, 4, Some(&grouping), &options(2, 0.5, 10, 1));

    assert_eq!(weights[0], weights[2]);
    assert_eq!(weights[1], weights[3]);
}

#[test]
fn helpful_sources_outrank_harmful_sources() {
    // Source 0 always produces the correct answer, sources 1 and 2 never do.
    // The harmful sources are ranked ahead of the helpful one in two samples,
    // so keeping them displaces a correct answer out of the vote window.
    let retrievals = vec![
        EncodedRetrieval::new(vec![0, 1, 2], vec![1.0, 0.0, 0.0]),
        EncodedRetrieval::new(vec![1, 0, 2], vec![0.0, 1.0, 0.0]),
        EncodedRetrieval::new(vec![2, 0], vec![0.0, 1.0]),
    ];

    let weights = learn_importance(&retrievals, 3, None, &options(1, 10.0, 100, 1));

    assert!(
        weights[0] > INITIAL_KEEP_PROBABILITY,
        "helpful source should gain weight, got {}",
        weights[0]
    );
    assert!(
        weights[1] < INITIAL_KEEP_PROBABILITY,
        "harmful source should lose weight, got {}",
        weights[1]
    );
    assert!(weights[0] > weights[1]);
    assert!(weights[0] > weights[2]);
}

#[test]
fn parallel_and_sequential_sweeps_agree() {
    let retrievals: Vec<EncodedRetrieval> = (0..17)
        .map(|i| {
            let sources = vec![i % 5, (i + 1) % 5, (i + 2) % 5];
            let utilities = vec![
                if i % 2 == 0 { 1.0 } else { 0.0 },
                if i % 3 == 0 { 1.0 } else { 0.0 },
                0.0,
            ];
            EncodedRetrieval::new(sources, utilities)
        })
        .collect();

    let sequential = learn_importance(&retrievals, 5, None, &options(2, 1.0, 5, 1));
    let parallel = learn_importance(&retrievals, 5, None, &options(2, 1.0, 5, 4));

    assert_eq!(sequential.len(), parallel.len());
    for (s, p) in sequential.iter().zip(&parallel) {
        assert!(
            (s - p).abs() < 1e-9,
            "sequential {s} and parallel {p} diverged"
        );
    }
}

#[test]
fn learning_is_deterministic_for_fixed_inputs() {
    let retrievals = vec![
        EncodedRetrieval::new(vec![0, 1, 2], vec![1.0, 0.0, 1.0]),
        EncodedRetrieval::new(vec![2, 0], vec![0.0, 1.0]),
    ];
    let grouping = Grouping::new(2, vec![0, 1, 0]);

    let first = learn_importance(&retrievals, 3, Some(&grouping), &options(2, 1.0, 20, 2));
    let second = learn_importance(&retrievals, 3, Some(&grouping), &options(2, 1.0, 20, 2));

    assert_eq!(first, second);
}

#[test]
fn weights_stay_clipped_to_unit_interval() {
    // A harmful source ranked ahead of a helpful one: its weight is pushed
    // down while the helpful source is pushed up. An oversized learning rate
    // saturates both immediately instead of escaping [0, 1].
    let retrievals = vec![EncodedRetrieval::new(vec![0, 1], vec![0.0, 1.0])];

    let weights = learn_importance(&retrievals, 2, None, &options(1, 1000.0, 10, 1));

    assert_eq!(weights[0], 0.0);
    assert_eq!(weights[1], 1.0);
}
