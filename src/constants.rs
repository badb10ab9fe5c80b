//! Cross-cutting, shared constants.

/// Uniform initial keep-probability of every source before learning.
pub const INITIAL_KEEP_PROBABILITY: f64 = 0.5;

/// Default vote cutoff.
pub const DEFAULT_K: usize = 10;

/// Default gradient-ascent step size.
pub const DEFAULT_LEARNING_RATE: f64 = 10.0;

/// Default number of training epochs.
pub const DEFAULT_NUM_EPOCHS: usize = 100;

/// Default distance between tested percentiles.
pub const DEFAULT_PERCENTILE_STEP: usize = 5;

/// Default completion budget for the chat-completion generator.
pub const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 10;

/// Default result cap per web-search query.
pub const DEFAULT_MAX_SEARCH_RESULTS: usize = 50;
