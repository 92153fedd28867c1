use digit_net::{train_loop, Network, Sample, TrainConfig};
use rand::{rngs::StdRng, SeedableRng};

fn main() -> digit_net::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = StdRng::seed_from_u64(2024);
    let mut network = Network::new(&[2, 4, 1], &mut rng)?;

    let samples = vec![
        Sample::new(vec![1.0, 0.0], vec![1.0]),
        Sample::new(vec![1.0, 1.0], vec![0.0]),
        Sample::new(vec![0.0, 1.0], vec![1.0]),
        Sample::new(vec![0.0, 0.0], vec![0.0]),
    ];

    let config = TrainConfig::new(4, 3.0)
        .with_break_threshold(Some(0.01))
        .with_max_epochs(50_000)
        .with_log_every(1000);
    let outcome = train_loop(&mut network, &samples, &config, &mut rng)?;
    println!("{:?} after {} batches", outcome.reason, outcome.batches);

    for sample in &samples {
        println!("Input: {:?} -> Output: {:.4}", sample.input, network.feed_forward(&sample.input)[0]);
    }
    Ok(())
}
