//! Fixed run settings. Dataset and results locations are not exposed on the
//! command line.

pub const TRAIN_IMAGES_PATH: &str = "data/train-images-idx3-ubyte";
pub const TRAIN_LABELS_PATH: &str = "data/train-labels-idx1-ubyte";
pub const TEST_IMAGES_PATH: &str = "data/t10k-images-idx3-ubyte";
pub const TEST_LABELS_PATH: &str = "data/t10k-labels-idx1-ubyte";

pub const RESULTS_PATH: &str = "results.json";
pub const DEFAULT_MODEL_PATH: &str = "network.json";

/// Topology used when no model file exists yet: 28x28 pixels, one hidden
/// layer, ten digit classes.
pub const DEFAULT_LAYER_SIZES: [usize; 3] = [784, 30, 10];
pub const CLASSES: usize = 10;

pub const BATCH_SIZE: usize = 10;
pub const ETA: f64 = 3.0;
pub const LOG_EVERY: usize = 1000;
