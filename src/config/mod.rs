//! Training configuration.
//!
//! All knobs are explicit values passed at construction; the core never reads
//! ambient environment state. Backend credentials live in the per-backend
//! configs ([`crate::generator::LlmGeneratorConfig`],
//! [`crate::retriever::WebSearchConfig`]).

pub mod error;


pub use error::ConfigError;

use crate::constants::{
    DEFAULT_K, DEFAULT_LEARNING_RATE, DEFAULT_NUM_EPOCHS, DEFAULT_PERCENTILE_STEP,
};

/// Hyperparameters for importance learning and threshold tuning.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Vote cutoff: at most `k` predictions are kept per question.
    pub k: usize,

    /// Gradient-ascent step size. Default: `10.0`.
    pub learning_rate: f64,

    /// Sequential training passes over the corpus. Default: `100`.
    pub num_epochs: usize,

    /// Gradient worker threads; `<= 0` means all available cores. Default: `-1`.
    pub n_jobs: isize,

    /// Distance between tested percentiles in `[0, 100)`. Default: `5`.
    pub percentile_step: usize,

    /// Average aggregate utility by sample count during tuning. Default: `true`.
    pub normalize: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            learning_rate: DEFAULT_LEARNING_RATE,
            num_epochs: DEFAULT_NUM_EPOCHS,
            n_jobs: -1,
            percentile_step: DEFAULT_PERCENTILE_STEP,
            normalize: true,
        }
    }
}

impl TrainingConfig {
    /// Creates a configuration with the given vote cutoff and default
    /// hyperparameters.
    pub fn with_k(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.k == 0 {
            return Err(ConfigError::InvalidK);
        }

        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::InvalidLearningRate {
                value: self.learning_rate,
            });
        }

        if self.num_epochs == 0 {
            return Err(ConfigError::InvalidNumEpochs);
        }

        if self.percentile_step == 0 || self.percentile_step > 99 {
            return Err(ConfigError::InvalidPercentileStep {
                value: self.percentile_step,
            });
        }

        Ok(())
    }

    /// Ascending percentiles tested by the threshold tuner: `0, step, 2*step, ... < 100`.
    pub fn percentile_range(&self) -> Vec<usize> {
        (0..100).step_by(self.percentile_step).collect()
    }
}
