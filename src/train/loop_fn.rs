use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info};
use rand::Rng;

use crate::dataset::sample::Sample;
use crate::error::{NetError, Result};
use crate::network::network::Network;
use crate::train::batches::shuffled_batches;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Why `train_loop` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A batch reported a cost below the break threshold.
    Converged,
    /// The stop flag was raised; the last batch ran to completion first.
    Interrupted,
    /// `max_epochs` epochs completed.
    EpochLimit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainOutcome {
    pub reason: StopReason,
    /// Epochs started, including a partially completed final one.
    pub epochs: usize,
    pub batches: usize,
    /// Cost reported by the last completed batch.
    pub last_cost: Option<f64>,
    pub last_epoch: Option<EpochStats>,
}

fn stop_requested(flag: &Option<std::sync::Arc<AtomicBool>>) -> bool {
    flag.as_ref().is_some_and(|f| f.load(Ordering::Relaxed))
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` on `samples` with mini-batch SGD.
///
/// Each epoch shuffles the indices of as many samples as fit into whole
/// batches and feeds the batches to [`Network::train_on_batch`] in order.
/// Without a break threshold or epoch cap this runs until the stop flag is
/// raised. The flag is only polled between batches, so the network is never
/// left half-updated; writing a checkpoint is left to the caller.
///
/// # Errors
/// `InvalidBatchSize` if the batch size is zero or exceeds the sample count,
/// `ShapeMismatch` if any sample does not fit the network.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    samples: &[Sample],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainOutcome> {
    if config.batch_size == 0 || config.batch_size > samples.len() {
        return Err(NetError::InvalidBatchSize);
    }
    for sample in samples {
        network.check_sample(sample)?;
    }

    let mut outcome = TrainOutcome {
        reason: StopReason::EpochLimit,
        epochs: 0,
        batches: 0,
        last_cost: None,
        last_epoch: None,
    };

    loop {
        if config.max_epochs.is_some_and(|max| outcome.epochs >= max) {
            outcome.reason = StopReason::EpochLimit;
            return Ok(outcome);
        }
        outcome.epochs += 1;
        let t_start = Instant::now();
        let mut epoch_cost = 0.0;
        let mut epoch_batches = 0usize;

        for indices in shuffled_batches(samples.len(), config.batch_size, rng) {
            if stop_requested(&config.stop_flag) {
                info!("stop requested after {} batches", outcome.batches);
                outcome.reason = StopReason::Interrupted;
                return Ok(outcome);
            }

            let batch: Vec<&Sample> = indices.iter().map(|&i| &samples[i]).collect();
            let cost = network.train_on_batch(&batch, config.eta)?;
            outcome.batches += 1;
            outcome.last_cost = Some(cost);
            epoch_cost += cost;
            epoch_batches += 1;

            debug!("epoch {} batch {}: mse {:.6}", outcome.epochs, epoch_batches, cost);
            if config.log_every > 0 && outcome.batches % config.log_every == 0 {
                info!(
                    "epoch {} batch {} ({} total): mse {:.6}",
                    outcome.epochs, epoch_batches, outcome.batches, cost
                );
            }

            if config.break_threshold.is_some_and(|threshold| cost < threshold) {
                info!("mse {:.6} fell below break threshold after {} batches", cost, outcome.batches);
                outcome.reason = StopReason::Converged;
                return Ok(outcome);
            }
        }

        let stats = EpochStats {
            epoch: outcome.epochs,
            batches: epoch_batches,
            mean_cost: epoch_cost / epoch_batches.max(1) as f64,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            "epoch {} done: {} batches, mean mse {:.6}, {} ms",
            stats.epoch, stats.batches, stats.mean_cost, stats.elapsed_ms
        );
        outcome.last_epoch = Some(stats);
    }
}
