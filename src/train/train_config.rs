use std::sync::{Arc, atomic::AtomicBool};

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `batch_size`: samples per mini-batch; leftover samples of an epoch are dropped
/// - `eta`: learning rate
/// - `break_threshold`: stop once a batch reports a mean squared error below this
/// - `max_epochs`: optional cap; `None` trains until stopped
/// - `stop_flag`: optional atomic flag polled before every batch; when
///   set, the loop returns `StopReason::Interrupted`
/// - `log_every`: emit an info-level progress line every this many batches
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub batch_size: usize,
    pub eta: f64,
    pub break_threshold: Option<f64>,
    pub max_epochs: Option<usize>,
    pub stop_flag: Option<Arc<AtomicBool>>,
    pub log_every: usize,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no threshold, no epoch cap and no stop flag.
    pub fn new(batch_size: usize, eta: f64) -> Self {
        TrainConfig {
            batch_size,
            eta,
            break_threshold: None,
            max_epochs: None,
            stop_flag: None,
            log_every: 1000,
        }
    }

    pub fn with_break_threshold(mut self, threshold: Option<f64>) -> Self {
        self.break_threshold = threshold;
        self
    }

    pub fn with_max_epochs(mut self, epochs: usize) -> Self {
        self.max_epochs = Some(epochs);
        self
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    pub fn with_log_every(mut self, batches: usize) -> Self {
        self.log_every = batches;
        self
    }
}
