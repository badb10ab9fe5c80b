use thiserror::Error;

/// Errors raised by the pruning-threshold tuner.
#[derive(Debug, Error)]
pub enum TuningError {
    /// No validation samples to score.
    #[error("no validation samples to score")]
    NoSamples,

    /// No group weights to derive percentiles from.
    #[error("no group weights to derive percentiles from")]
    NoWeights,

    /// The percentile range is empty.
    #[error("percentile range is empty")]
    EmptyPercentileRange,

    /// A percentile lies outside `[0, 100)`.
    #[error("percentile {value} is outside [0, 100)")]
    InvalidPercentile { value: usize },

    /// The percentile range is not strictly ascending.
    #[error("percentile range must be strictly ascending")]
    PercentileRangeNotAscending,
}
