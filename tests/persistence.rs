use approx::assert_relative_eq;
use digit_net::{
    dataset::idx::{IMAGE_MAGIC, LABEL_MAGIC},
    evaluate_samples, load_dataset, train_loop, NetError, Network, NetworkSnapshot, ResultsReport,
    Sample, TrainConfig,
};
use rand::{rngs::StdRng, SeedableRng};

fn idx_file(magic: u32, counts: &[u32], payload: &[u8]) -> Vec<u8> {
    let mut bytes = magic.to_be_bytes().to_vec();
    for c in counts {
        bytes.extend_from_slice(&c.to_be_bytes());
    }
    bytes.extend_from_slice(payload);
    bytes
}

#[test]
fn trained_network_survives_a_checkpoint() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("network.json");

    let mut rng = StdRng::seed_from_u64(77);
    let mut network = Network::new(&[3, 5, 2], &mut rng).unwrap();
    let samples: Vec<Sample> = (0..6)
        .map(|i| Sample::one_hot(vec![i as f64 / 6.0, 0.5, 1.0 - i as f64 / 6.0], (i % 2) as u8, 2))
        .collect();
    train_loop(&mut network, &samples, &TrainConfig::new(3, 1.0).with_max_epochs(4), &mut rng).unwrap();

    network.save_json(&path).unwrap();
    let restored = Network::load_json(&path).unwrap();
    assert_eq!(restored.layer_sizes(), network.layer_sizes());
    for (a, b) in restored.layers().iter().zip(network.layers()) {
        let bits = |l: &digit_net::Layer| {
            l.weights().data.iter().flatten().chain(l.biases()).map(|x| x.to_bits()).collect::<Vec<_>>()
        };
        assert_eq!(bits(a), bits(b));
    }

    let input = [0.2, 0.4, 0.6];
    assert_eq!(restored.feed_forward(&input), network.feed_forward(&input));
}

#[test]
fn snapshot_with_missing_layer_record_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    let snapshot = NetworkSnapshot { layer_sizes: vec![2, 2, 1], layers: vec![] };
    snapshot.save_json(&path).unwrap();
    assert!(matches!(Network::load_json(&path), Err(NetError::ShapeMismatch(_))));
}

#[test]
fn loads_dataset_files_and_evaluates() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    let labels = dir.path().join("labels");
    std::fs::write(&images, idx_file(IMAGE_MAGIC, &[2, 2, 2], &[0, 128, 255, 64, 10, 20, 30, 40])).unwrap();
    std::fs::write(&labels, idx_file(LABEL_MAGIC, &[2], &[7, 3])).unwrap();

    let dataset = load_dataset(&images, &labels).unwrap();
    assert_eq!(dataset.labels, vec![7, 3]);
    assert_eq!(dataset.images.pixels[0][1][0], 1.0);
    assert_relative_eq!(dataset.images.pixels[0][1][1], 64.0 / 255.0);

    let samples = dataset.into_samples(10).unwrap();
    let network = Network::new(&[4, 6, 10], &mut StdRng::seed_from_u64(3)).unwrap();
    let report = evaluate_samples(&network, &samples, None).unwrap();
    assert_eq!(report.samples.len(), 2);
    assert_eq!(report.samples[1].index, 2);
    assert_eq!(report.samples[1].label, Some(3));

    let results = dir.path().join("results.json");
    report.save_json(&results).unwrap();
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&results).unwrap()).unwrap();
    assert_eq!(json["layer_sizes"], serde_json::json!([4, 6, 10]));
    assert_eq!(json["samples"][0]["confidences"].as_array().unwrap().len(), 10);
    assert_eq!(ResultsReport::load_json(&results).unwrap(), report);
}

#[test]
fn mismatched_dataset_counts_fail_before_training() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    let labels = dir.path().join("labels");
    std::fs::write(&images, idx_file(IMAGE_MAGIC, &[1, 1, 1], &[5])).unwrap();
    std::fs::write(&labels, idx_file(LABEL_MAGIC, &[2], &[0, 1])).unwrap();
    assert!(matches!(
        load_dataset(&images, &labels),
        Err(NetError::CountMismatch { images: 1, labels: 2 })
    ));
}

#[test]
fn wrong_magic_in_label_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    let labels = dir.path().join("labels");
    std::fs::write(&images, idx_file(IMAGE_MAGIC, &[1, 1, 1], &[5])).unwrap();
    std::fs::write(&labels, idx_file(IMAGE_MAGIC, &[1], &[0])).unwrap();
    assert!(matches!(load_dataset(&images, &labels), Err(NetError::BadMagic { .. })));
}
