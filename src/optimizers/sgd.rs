//! Stochastic Gradient Descent (SGD) update rule with L2 weight decay
//!
//! This module provides the parameter update applied at the end of every
//! mini-batch:
//!
//! - `b = b - (eta / m) * Σ∇b`
//! - `W = (1 - eta * lambda / n) * W - (eta / m) * Σ∇W`
//!
//! where `m` is the mini-batch length and `n` the training-set size.

use crate::data::Input;
use crate::network::{Gradients, Network};

/// Mini-batch gradient descent with optional L2 regularization.
///
/// # Fields
///
/// * `learning_rate` - Step size (η)
/// * `lambda` - Regularization strength (λ); zero disables weight decay
///
/// # Example
///
/// ```
/// use feedforward_nn::optimizers::Sgd;
///
/// let sgd = Sgd::with_regularization(0.5, 5.0);
/// // 1 - 0.5 * 5.0 / 1000
/// assert!((sgd.weight_decay(1000) - 0.9975).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    learning_rate: f64,
    lambda: f64,
}

impl Sgd {
    /// Creates an unregularized SGD update with the specified learning rate.
    pub fn new(learning_rate: f64) -> Self {
        Self::with_regularization(learning_rate, 0.0)
    }

    /// Creates an SGD update with L2 regularization.
    pub fn with_regularization(learning_rate: f64, lambda: f64) -> Self {
        Self {
            learning_rate,
            lambda,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Multiplicative weight decay factor `1 - eta * lambda / n`.
    pub fn weight_decay(&self, training_size: usize) -> f64 {
        1.0 - self.learning_rate * (self.lambda / training_size as f64)
    }

    /// Sum the gradients of every example in `batch` and apply one update.
    ///
    /// An empty batch leaves the network untouched.
    pub fn update_mini_batch(&self, network: &mut Network, batch: &[Input], training_size: usize) {
        if batch.is_empty() {
            return;
        }
        let mut sum = Gradients::zeros_like(network);
        for input in batch {
            sum.accumulate(&network.backprop(input));
        }
        self.apply(network, &sum, batch.len(), training_size);
    }

    /// Apply summed gradients from a batch of `batch_len` examples.
    ///
    /// # Panics
    ///
    /// Panics if `gradients` does not match the network's layer shapes.
    pub fn apply(
        &self,
        network: &mut Network,
        gradients: &Gradients,
        batch_len: usize,
        training_size: usize,
    ) {
        let step = self.learning_rate / batch_len as f64;
        let decay = self.weight_decay(training_size);
        let (weights, biases) = network.parameters_mut();

        assert_eq!(
            weights.len(),
            gradients.weights.len(),
            "Parameters and gradients must have the same number of layers"
        );

        for (b, grad) in biases.iter_mut().zip(&gradients.biases) {
            *b = b.subtract(&grad.scale(step));
        }
        for (w, grad) in weights.iter_mut().zip(&gradients.weights) {
            *w = w.scale(decay).subtract(&grad.scale(step));
        }
    }
}
