use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use signal_hook::consts::{SIGINT, SIGTERM};

use digit_net::{
    config, evaluate_samples, load_dataset, train_loop, Network, ResultsReport, StopReason,
    TrainConfig,
};

/// Train or evaluate a sigmoid feed-forward network on IDX digit data.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Train the network instead of evaluating it
    #[arg(short, long)]
    train: bool,
    /// Stop training once a batch's mean squared error drops below COST
    #[arg(short, long, value_name = "COST")]
    break_threshold: Option<f64>,
    /// Model snapshot to load from and save to
    #[arg(value_name = "MODEL", default_value = config::DEFAULT_MODEL_PATH)]
    model: PathBuf,
}

/// Where the network in memory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Loaded,
    Random,
}

fn load_or_create<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> anyhow::Result<(Network, Origin)> {
    if path.exists() {
        let network = Network::load_json(path)
            .with_context(|| format!("loading model from {}", path.display()))?;
        info!("loaded network {:?} from {}", network.layer_sizes(), path.display());
        Ok((network, Origin::Loaded))
    } else {
        warn!("{} not found, starting from random weights", path.display());
        Ok((Network::new(&config::DEFAULT_LAYER_SIZES, rng)?, Origin::Random))
    }
}

/// Training always persists its result. An evaluation run only rewrites a
/// model it read from disk, so untrained weights never become a model file.
fn should_checkpoint(training: bool, origin: Origin) -> bool {
    training || origin == Origin::Loaded
}

fn checkpoint(network: &Network, path: &Path) -> anyhow::Result<()> {
    network
        .save_json(path)
        .with_context(|| format!("writing checkpoint to {}", path.display()))?;
    info!("checkpoint written to {}", path.display());
    Ok(())
}

fn train(network: &mut Network, args: &Args, stop: &Arc<AtomicBool>, rng: &mut StdRng) -> anyhow::Result<()> {
    let samples = load_dataset(config::TRAIN_IMAGES_PATH, config::TRAIN_LABELS_PATH)
        .context("loading training data")?
        .into_samples(network.output_width())?;

    let train_config = TrainConfig::new(config::BATCH_SIZE, config::ETA)
        .with_break_threshold(args.break_threshold)
        .with_stop_flag(Arc::clone(stop))
        .with_log_every(config::LOG_EVERY);
    info!(
        "training {:?} on {} samples, batch size {}, eta {}",
        network.layer_sizes(),
        samples.len(),
        train_config.batch_size,
        train_config.eta
    );

    let outcome = train_loop(network, &samples, &train_config, rng)?;
    match outcome.reason {
        StopReason::Converged => info!("converged after {} batches", outcome.batches),
        StopReason::Interrupted => info!("interrupted after {} batches", outcome.batches),
        StopReason::EpochLimit => info!("finished {} epochs", outcome.epochs),
    }

    ResultsReport::new(network)
        .save_json(config::RESULTS_PATH)
        .context("writing results")?;
    Ok(())
}

fn evaluate(network: &Network, stop: &Arc<AtomicBool>) -> anyhow::Result<()> {
    let samples = load_dataset(config::TEST_IMAGES_PATH, config::TEST_LABELS_PATH)
        .context("loading test data")?
        .into_samples(network.output_width())?;

    let report = evaluate_samples(network, &samples, Some(stop.as_ref()))?;
    report.save_json(config::RESULTS_PATH).context("writing results")?;
    info!("{} results written to {}", report.samples.len(), config::RESULTS_PATH);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // First signal raises the flag; a second one while it is set exits at once.
    let stop = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register_conditional_shutdown(signal, 1, Arc::clone(&stop))
            .context("registering signal handler")?;
        signal_hook::flag::register(signal, Arc::clone(&stop))
            .context("registering signal handler")?;
    }

    let mut rng = StdRng::from_entropy();
    let (mut network, origin) = load_or_create(&args.model, &mut rng)?;

    if args.train {
        train(&mut network, &args, &stop, &mut rng)?;
    } else {
        evaluate(&network, &stop)?;
    }

    if should_checkpoint(args.train, origin) {
        checkpoint(&network, &args.model)
    } else {
        warn!("not writing {}: the evaluated network was never trained", args.model.display());
        Ok(())
    }
}
