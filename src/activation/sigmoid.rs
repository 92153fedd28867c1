use std::f64::consts::E;

/// Logistic sigmoid `1 / (1 + e^-x)`. Large negative inputs overflow the
/// exponential and are not guarded.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Derivative of the sigmoid at the pre-activation `x`.
pub fn sigmoid_prime(x: f64) -> f64 {
    let fx = sigmoid(x);
    fx * (1.0 - fx)
}
