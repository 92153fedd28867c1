use digit_net::network::LayerSnapshot;
use digit_net::{train_loop, Network, NetworkSnapshot, Sample, StopReason, TrainConfig};
use rand::{rngs::StdRng, SeedableRng};

fn xor_samples() -> Vec<Sample> {
    [([0.0, 0.0], 0.0), ([1.0, 1.0], 0.0), ([1.0, 0.0], 1.0), ([0.0, 1.0], 1.0)]
        .iter()
        .map(|(input, target)| Sample::new(input.to_vec(), vec![*target]))
        .collect()
}

/// A [2, 2, 1] network whose hidden units start as weak OR and AND detectors.
/// Its outputs are still wrong on the positive patterns, but it sits in the
/// basin of the OR-minus-AND solution.
fn weak_xor_network() -> Network {
    Network::from_snapshot(NetworkSnapshot {
        layer_sizes: vec![2, 2, 1],
        layers: vec![
            LayerSnapshot {
                weights: vec![vec![2.0, 2.0], vec![2.0, 2.0]],
                biases: vec![-1.0, -3.0],
            },
            LayerSnapshot {
                weights: vec![vec![2.0, -2.0]],
                biases: vec![-1.0],
            },
        ],
    })
    .unwrap()
}

#[test]
fn xor_drives_cost_below_threshold() {
    let samples = xor_samples();
    let mut network = weak_xor_network();
    assert!(samples
        .iter()
        .any(|s| network.feed_forward(&s.input)[0].round() != s.expected[0]));

    // One batch per epoch covering all four patterns, so the reported cost
    // is the full-dataset mean squared error and the shuffle has no effect.
    let config = TrainConfig::new(4, 3.0)
        .with_break_threshold(Some(0.05))
        .with_max_epochs(20_000);
    let outcome = train_loop(&mut network, &samples, &config, &mut StdRng::seed_from_u64(7)).unwrap();

    assert_eq!(outcome.reason, StopReason::Converged);
    assert!(outcome.last_cost.unwrap() < 0.05);
    assert!(outcome.batches > 1);
    for sample in &samples {
        let output = network.feed_forward(&sample.input)[0];
        assert_eq!(output.round(), sample.expected[0]);
    }
}

#[test]
fn training_lowers_cost() {
    let samples = xor_samples();
    let mut rng = StdRng::seed_from_u64(21);
    let mut network = Network::new(&[2, 4, 1], &mut rng).unwrap();
    let batch: Vec<&Sample> = samples.iter().collect();

    let first = network.clone().train_on_batch(&batch, 0.0).unwrap();
    let config = TrainConfig::new(4, 3.0).with_max_epochs(500);
    train_loop(&mut network, &samples, &config, &mut rng).unwrap();
    let after = network.clone().train_on_batch(&batch, 0.0).unwrap();
    assert!(after < first, "cost went from {first} to {after}");
}

#[test]
fn zero_learning_rate_leaves_weights_alone() {
    let samples = xor_samples();
    let mut rng = StdRng::seed_from_u64(5);
    let mut network = Network::new(&[2, 3, 1], &mut rng).unwrap();
    let before = network.clone();
    let config = TrainConfig::new(2, 0.0).with_max_epochs(3);
    let outcome = train_loop(&mut network, &samples, &config, &mut rng).unwrap();
    assert_eq!(outcome.batches, 6);
    assert_eq!(network, before);
}
