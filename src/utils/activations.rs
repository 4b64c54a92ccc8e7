//! Activation functions for neural networks
//!
//! The network uses the logistic sigmoid on every layer. Scalar versions are
//! exposed alongside the elementwise matrix versions used by the forward and
//! backward passes.

use crate::matrix::Matrix;

/// Sigmoid activation function.
///
/// Returns the sigmoid of the input: 1 / (1 + exp(-z))
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Sigmoid derivative evaluated at the pre-activation `z`.
///
/// Returns sigmoid(z) * (1 - sigmoid(z))
pub fn sigmoid_prime(z: f64) -> f64 {
    let s = sigmoid(z);
    s * (1.0 - s)
}

/// Sigmoid applied to every element of `z`.
pub fn sigmoid_matrix(z: &Matrix) -> Matrix {
    z.apply(sigmoid)
}

/// Sigmoid derivative applied to every element of `z`.
pub fn sigmoid_prime_matrix(z: &Matrix) -> Matrix {
    z.apply(sigmoid_prime)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_sigmoid_zero() {
        let result = sigmoid(0.0);
        assert!((result - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_sigmoid_positive() {
        let result = sigmoid(2.0);
        assert!(result > 0.5 && result < 1.0);
    }

    #[test]
    fn test_sigmoid_negative() {
        let result = sigmoid(-2.0);
        assert!(result > 0.0 && result < 0.5);
    }

    #[test]
    fn test_sigmoid_prime_at_zero() {
        let result = sigmoid_prime(0.0);
        assert!((result - 0.25).abs() < EPSILON);
    }
}
