/// Outcome of the pruning-threshold grid search.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningResult {
    /// Achieved utility per tested percentile, in ascending percentile order.
    pub achieved_utilities: Vec<f64>,
    /// Best aggregate utility observed.
    pub best_utility: f64,
    /// Weight cutoff achieving the best utility.
    pub best_threshold: f64,
    /// Percentile achieving the best utility (highest among ties).
    pub best_percentile: usize,
}
