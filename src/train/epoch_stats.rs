/// Per-epoch training statistics logged by `train_loop`.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Batches completed in this epoch.
    pub batches: usize,
    /// Mean of the per-batch mean squared errors.
    pub mean_cost: f64,
    /// Wall-clock duration of this epoch in milliseconds.
    pub elapsed_ms: u64,
}
