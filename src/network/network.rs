use rand::Rng;

use crate::activation::sigmoid::{sigmoid, sigmoid_prime};
use crate::dataset::sample::Sample;
use crate::error::{NetError, Result};
use crate::layers::dense::Layer;
use crate::loss::mse::MseLoss;
use crate::math::linalg::{mat_mat, mat_vec, transpose};
use crate::math::matrix::Matrix;
use crate::network::snapshot::{LayerSnapshot, NetworkSnapshot};

/// Activations and pre-activations recorded by one forward pass.
///
/// `activations[0]` is the input; `activations[j + 1]` is the output of
/// layer `j`, computed from `pre_activations[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPass {
    pub activations: Vec<Vec<f64>>,
    pub pre_activations: Vec<Vec<f64>>,
}

impl ForwardPass {
    pub fn output(&self) -> &[f64] {
        self.activations.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Fully-connected sigmoid network.
///
/// Invariant: `layers.len() == layer_sizes.len() - 1` and layer `i` maps
/// `layer_sizes[i]` inputs to `layer_sizes[i + 1]` outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layer_sizes: Vec<usize>,
    layers: Vec<Layer>,
}

fn check_topology(layer_sizes: &[usize]) -> Result<()> {
    if layer_sizes.len() < 2 {
        return Err(NetError::InvalidTopology(format!(
            "need at least an input and an output width, got {:?}",
            layer_sizes
        )));
    }
    if layer_sizes.contains(&0) {
        return Err(NetError::InvalidTopology(format!(
            "layer widths must be positive, got {:?}",
            layer_sizes
        )));
    }
    Ok(())
}

impl Network {
    /// Builds a network with randomly initialized layers, one per adjacent
    /// pair in `layer_sizes`.
    pub fn new<R: Rng + ?Sized>(layer_sizes: &[usize], rng: &mut R) -> Result<Network> {
        check_topology(layer_sizes)?;
        let layers = layer_sizes
            .windows(2)
            .map(|pair| Layer::new(pair[0], pair[1], rng))
            .collect();
        Ok(Network { layer_sizes: layer_sizes.to_vec(), layers })
    }

    /// Rebuilds a network from a snapshot. No partial network is produced if
    /// the layer count or any weight/bias shape disagrees with `layer_sizes`.
    pub fn from_snapshot(snapshot: NetworkSnapshot) -> Result<Network> {
        let NetworkSnapshot { layer_sizes, layers } = snapshot;
        if layer_sizes.len() != layers.len() + 1 {
            return Err(NetError::ShapeMismatch(format!(
                "{} layer sizes need {} layer records, found {}",
                layer_sizes.len(),
                layer_sizes.len().saturating_sub(1),
                layers.len()
            )));
        }
        check_topology(&layer_sizes)?;

        let layers = layers
            .into_iter()
            .zip(layer_sizes.windows(2))
            .enumerate()
            .map(|(i, (record, pair))| {
                let weights = Matrix::from_data(record.weights);
                if !weights.has_shape(pair[1], pair[0]) || record.biases.len() != pair[1] {
                    return Err(NetError::ShapeMismatch(format!(
                        "layer {} should be {}×{} with {} biases",
                        i, pair[1], pair[0], pair[1]
                    )));
                }
                Layer::from_parts(weights, record.biases)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Network { layer_sizes, layers })
    }

    pub fn to_snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            layer_sizes: self.layer_sizes.clone(),
            layers: self
                .layers
                .iter()
                .map(|layer| LayerSnapshot {
                    weights: layer.weights().data.clone(),
                    biases: layer.biases().to_vec(),
                })
                .collect(),
        }
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn input_width(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn output_width(&self) -> usize {
        self.layer_sizes[self.layer_sizes.len() - 1]
    }

    /// Fails if the sample's input or expected vector does not fit the
    /// network's input and output widths.
    pub fn check_sample(&self, sample: &Sample) -> Result<()> {
        if sample.input.len() != self.input_width() || sample.expected.len() != self.output_width() {
            return Err(NetError::ShapeMismatch(format!(
                "sample is {}→{} but network is {}→{}",
                sample.input.len(),
                sample.expected.len(),
                self.input_width(),
                self.output_width()
            )));
        }
        Ok(())
    }

    /// Forward pass. Reads the weights only; identical inputs give identical
    /// results.
    pub fn evaluate(&self, input: &[f64]) -> ForwardPass {
        let mut activations = Vec::with_capacity(self.layer_sizes.len());
        let mut pre_activations = Vec::with_capacity(self.layers.len());
        activations.push(input.to_vec());

        for (j, layer) in self.layers.iter().enumerate() {
            let z: Vec<f64> = mat_vec(layer.weights(), &activations[j])
                .into_iter()
                .zip(layer.biases())
                .map(|(wx, b)| wx + b)
                .collect();
            activations.push(z.iter().map(|&x| sigmoid(x)).collect());
            pre_activations.push(z);
        }

        ForwardPass { activations, pre_activations }
    }

    /// Final activation vector only.
    pub fn feed_forward(&self, input: &[f64]) -> Vec<f64> {
        self.evaluate(input).activations.pop().unwrap_or_default()
    }

    /// Per-layer gradients of `0.5 * |a - expected|²` for one sample, in
    /// layer order.
    pub fn backpropagate(&self, pass: &ForwardPass, expected: &[f64]) -> Vec<Layer> {
        let n = self.layers.len();
        let activations = &pass.activations;
        let zs = &pass.pre_activations;
        let mut grads = Vec::with_capacity(n);

        let mut delta: Vec<f64> = MseLoss::derivative(&activations[n], expected)
            .into_iter()
            .zip(&zs[n - 1])
            .map(|(err, &z)| err * sigmoid_prime(z))
            .collect();
        grads.push(Layer::gradient(&delta, &activations[n - 1]));

        for j in (0..n - 1).rev() {
            let back = mat_mat(&transpose(self.layers[j + 1].weights()), &Matrix::column(&delta))
                .into_column_vec();
            delta = back
                .into_iter()
                .zip(&zs[j])
                .map(|(err, &z)| err * sigmoid_prime(z))
                .collect();
            grads.push(Layer::gradient(&delta, &activations[j]));
        }

        grads.reverse();
        grads
    }

    /// Runs forward and backward passes over `batch`, then applies one
    /// averaged SGD step per layer.
    ///
    /// Returns the mean squared error `(a - y)²` over every sample and output
    /// unit, measured before the update. This is the value the break
    /// threshold is compared against.
    pub fn train_on_batch(&mut self, batch: &[&Sample], eta: f64) -> Result<f64> {
        if batch.is_empty() {
            return Err(NetError::InvalidBatchSize);
        }
        for sample in batch {
            self.check_sample(sample)?;
        }

        let mut total_cost = 0.0;
        let mut per_layer: Vec<Vec<Layer>> = vec![Vec::with_capacity(batch.len()); self.layers.len()];
        for sample in batch {
            let pass = self.evaluate(&sample.input);
            total_cost += MseLoss::sum_squared(pass.output(), &sample.expected);
            for (slot, grad) in per_layer.iter_mut().zip(self.backpropagate(&pass, &sample.expected)) {
                slot.push(grad);
            }
        }

        for (layer, deltas) in self.layers.iter_mut().zip(&per_layer) {
            layer.step(deltas, eta)?;
        }

        Ok(total_cost / (batch.len() * self.output_width()) as f64)
    }

    pub fn save_json(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.to_snapshot().save_json(path)
    }

    pub fn load_json(path: impl AsRef<std::path::Path>) -> Result<Network> {
        Network::from_snapshot(NetworkSnapshot::load_json(path)?)
    }
}
