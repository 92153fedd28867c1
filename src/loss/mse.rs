/// Squared-error cost.
///
/// The derivative is taken as `predicted - expected`, without the factor 2,
/// which makes it the gradient of `0.5 * (predicted - expected)²`.
pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        Self::sum_squared(predicted, expected) / n
    }

    /// Sum of (predicted - expected)² over all output units.
    pub fn sum_squared(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
    }

    /// Per-output gradient: predicted - expected
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| a - b)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn loss_is_mean_of_squares() {
        assert_relative_eq!(MseLoss::loss(&[1.0, 0.0], &[0.0, 0.5]), 0.625, epsilon = 1e-15);
        assert_relative_eq!(MseLoss::sum_squared(&[1.0, 0.0], &[0.0, 0.5]), 1.25, epsilon = 1e-15);
    }

    #[test]
    fn derivative_has_no_factor_two() {
        assert_eq!(MseLoss::derivative(&[0.75, 0.25], &[1.0, 0.0]), vec![-0.25, 0.25]);
    }
}
