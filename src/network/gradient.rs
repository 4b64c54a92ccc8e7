//! Per-layer gradient containers

use crate::matrix::Matrix;
use crate::network::Network;

/// Gradients of the cost with respect to every weight and bias.
///
/// Shapes mirror [`Network::weights`] and [`Network::biases`]. The same type
/// is used for one example's gradient and for the running sum over a
/// mini-batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub weights: Vec<Matrix>,
    pub biases: Vec<Matrix>,
}

impl Gradients {
    /// Zero accumulator shaped like `network`'s parameters.
    pub fn zeros_like(network: &Network) -> Self {
        Self {
            weights: network
                .weights()
                .iter()
                .map(|w| Matrix::zeros(w.rows(), w.cols()))
                .collect(),
            biases: network
                .biases()
                .iter()
                .map(|b| Matrix::zeros(b.rows(), b.cols()))
                .collect(),
        }
    }

    /// Add `other` layer by layer.
    ///
    /// # Panics
    ///
    /// Panics if the two gradients belong to differently shaped networks.
    pub fn accumulate(&mut self, other: &Gradients) {
        assert_eq!(
            self.weights.len(),
            other.weights.len(),
            "Gradients must have the same number of layers"
        );
        for (sum, grad) in self.weights.iter_mut().zip(&other.weights) {
            *sum = sum.add(grad);
        }
        for (sum, grad) in self.biases.iter_mut().zip(&other.biases) {
            *sum = sum.add(grad);
        }
    }

    pub fn num_layers(&self) -> usize {
        self.weights.len()
    }
}
