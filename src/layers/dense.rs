use rand::Rng;

use crate::error::{NetError, Result};
use crate::math::linalg::{outer, transpose};
use crate::math::matrix::Matrix;

/// One fully-connected sigmoid layer.
///
/// `weights` is `outputs × inputs` and `biases` has `outputs` entries. The
/// same type doubles as a per-sample gradient holder during backpropagation.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    weights: Matrix,
    biases: Vec<f64>,
}

impl Layer {
    /// Weights uniform in [-1, 1], biases uniform in [0, 1].
    pub fn new<R: Rng + ?Sized>(inputs: usize, outputs: usize, rng: &mut R) -> Layer {
        let weights = Matrix::random_uniform(outputs, inputs, -1.0..=1.0, rng);
        let biases = (0..outputs).map(|_| rng.gen_range(0.0..=1.0)).collect();
        Layer { weights, biases }
    }

    pub fn zeros(inputs: usize, outputs: usize) -> Layer {
        Layer {
            weights: Matrix::zeros(outputs, inputs),
            biases: vec![0.0; outputs],
        }
    }

    /// Gradient of one sample: weights `outer(delta, transpose(prev))`, biases
    /// `delta`.
    pub fn gradient(delta: &[f64], prev_activation: &[f64]) -> Layer {
        Layer {
            weights: outer(delta, &transpose(&Matrix::column(prev_activation))),
            biases: delta.to_vec(),
        }
    }

    /// Builds a layer from raw parts, rejecting ragged weights or a bias
    /// vector whose length differs from the weight row count.
    pub fn from_parts(weights: Matrix, biases: Vec<f64>) -> Result<Layer> {
        let layer = Layer { weights, biases };
        layer.check_shape()?;
        Ok(layer)
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    pub fn inputs(&self) -> usize {
        self.weights.cols
    }

    pub fn outputs(&self) -> usize {
        self.weights.rows
    }

    #[cfg(test)]
    pub(crate) fn weights_mut(&mut self) -> &mut Matrix {
        &mut self.weights
    }

    #[cfg(test)]
    pub(crate) fn biases_mut(&mut self) -> &mut [f64] {
        &mut self.biases
    }

    pub fn check_shape(&self) -> Result<()> {
        if !self.weights.has_shape(self.weights.rows, self.weights.cols)
            || self.weights.rows != self.biases.len()
        {
            return Err(NetError::ShapeMismatch(format!(
                "layer has {}×{} weights but {} biases",
                self.weights.rows,
                self.weights.cols,
                self.biases.len()
            )));
        }
        Ok(())
    }

    /// Mini-batch SGD update: every entry moves by `-eta / deltas.len()` times
    /// the sum of that entry over `deltas`.
    pub fn step(&mut self, deltas: &[Layer], eta: f64) -> Result<()> {
        self.check_shape()?;
        if deltas.is_empty() {
            return Ok(());
        }

        let mut weight_sum = Matrix::zeros(self.outputs(), self.inputs());
        let mut bias_sum = vec![0.0; self.outputs()];
        for delta in deltas {
            if delta.outputs() != self.outputs() || delta.inputs() != self.inputs() {
                return Err(NetError::ShapeMismatch(format!(
                    "gradient is {}×{} but layer is {}×{}",
                    delta.outputs(),
                    delta.inputs(),
                    self.outputs(),
                    self.inputs()
                )));
            }
            delta.check_shape()?;
            weight_sum += &delta.weights;
            for (sum, b) in bias_sum.iter_mut().zip(&delta.biases) {
                *sum += b;
            }
        }

        let rate = eta / deltas.len() as f64;
        for (row, sum_row) in self.weights.data.iter_mut().zip(&weight_sum.data) {
            for (w, s) in row.iter_mut().zip(sum_row) {
                *w -= rate * s;
            }
        }
        for (b, s) in self.biases.iter_mut().zip(&bias_sum) {
            *b -= rate * s;
        }
        Ok(())
    }
}
