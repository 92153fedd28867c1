pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod dataset;
pub mod train;
pub mod report;
pub mod config;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use layers::dense::Layer;
pub use network::network::{ForwardPass, Network};
pub use network::snapshot::NetworkSnapshot;
pub use loss::mse::MseLoss;
pub use dataset::{load_dataset, Dataset, Sample};
pub use train::{train_loop, StopReason, TrainConfig, TrainOutcome};
pub use report::{evaluate_samples, ResultsReport};
pub use error::{NetError, Result};
