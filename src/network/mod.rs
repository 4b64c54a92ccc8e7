//! Feedforward network: parameter store and forward pass
//!
//! A [`Network`] owns one weight matrix and one bias row per layer transition.
//! For a topology `[n0, n1, ..., nL]`, layer `l` has weights of shape
//! `(n_l, n_{l-1})` and biases of shape `(1, n_l)`. Every layer uses the
//! sigmoid activation; the output layer error is defined by the network's
//! [`Cost`].
//!
//! # Example
//!
//! ```
//! use feedforward_nn::cost::Cost;
//! use feedforward_nn::network::Network;
//! use feedforward_nn::utils::SimpleRng;
//!
//! let mut rng = SimpleRng::new(42);
//! let net = Network::new(&[2, 3, 1], Cost::CrossEntropy, &mut rng).unwrap();
//! let output = net.forward(&[1.0, 2.0]);
//! assert_eq!(output.shape(), (1, 1));
//! ```

mod backprop;
mod gradient;

pub use gradient::Gradients;

use crate::cost::Cost;
use crate::data::Dataset;
use crate::error::{NetworkError, Result};
use crate::matrix::Matrix;
use crate::utils::activations::sigmoid_matrix;
use crate::utils::rng::SimpleRng;
use std::fmt;
use std::str::FromStr;

/// Weight initialization scheme chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Initializer {
    /// Weights scaled by `1/sqrt(fan_in)` so pre-activations stay bounded as
    /// layers get wider.
    #[default]
    Default,
    /// Unscaled weights, kept for comparison with the default scheme.
    Large,
}

impl Initializer {
    pub fn name(&self) -> &'static str {
        match self {
            Initializer::Default => "default",
            Initializer::Large => "large",
        }
    }
}

impl fmt::Display for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Initializer {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Initializer::Default),
            "large" => Ok(Initializer::Large),
            _ => Err(NetworkError::InvalidInitializer(s.to_string())),
        }
    }
}

/// Sigmoid feedforward network.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    sizes: Vec<usize>,
    cost: Cost,
    weights: Vec<Matrix>,
    biases: Vec<Matrix>,
}

impl Network {
    /// Create a randomly initialized network with the default initializer.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `sizes` has fewer than two entries or
    /// contains a zero.
    pub fn new(sizes: &[usize], cost: Cost, rng: &mut SimpleRng) -> Result<Self> {
        Self::with_initializer(sizes, cost, Initializer::Default, rng)
    }

    /// Create a randomly initialized network with an explicit initializer.
    pub fn with_initializer(
        sizes: &[usize],
        cost: Cost,
        initializer: Initializer,
        rng: &mut SimpleRng,
    ) -> Result<Self> {
        validate_topology(sizes)?;

        let biases: Vec<Matrix> = sizes[1..]
            .iter()
            .map(|&size| Matrix::random(1, size, 2.0, rng))
            .collect();

        let weights: Vec<Matrix> = sizes
            .windows(2)
            .map(|pair| {
                let (fan_in, fan_out) = (pair[0], pair[1]);
                let raw = Matrix::random(fan_out, fan_in, 2.0, rng);
                match initializer {
                    Initializer::Default => raw.scale(1.0 / (fan_in as f64).sqrt()),
                    Initializer::Large => raw,
                }
            })
            .collect();

        tracing::debug!(?sizes, %cost, %initializer, "network initialized");

        Ok(Self {
            sizes: sizes.to_vec(),
            cost,
            weights,
            biases,
        })
    }

    /// Build a network from existing parameters.
    ///
    /// # Errors
    ///
    /// Fails if the topology is invalid or any matrix does not have the shape
    /// implied by `sizes`.
    pub fn from_parameters(
        sizes: &[usize],
        cost: Cost,
        weights: Vec<Matrix>,
        biases: Vec<Matrix>,
    ) -> Result<Self> {
        validate_topology(sizes)?;
        let layers = sizes.len() - 1;
        if weights.len() != layers {
            return Err(NetworkError::LayerCount {
                kind: "weight",
                expected: layers,
                found: weights.len(),
            });
        }
        if biases.len() != layers {
            return Err(NetworkError::LayerCount {
                kind: "bias",
                expected: layers,
                found: biases.len(),
            });
        }
        for (layer, pair) in sizes.windows(2).enumerate() {
            let (fan_in, fan_out) = (pair[0], pair[1]);
            check_shape(&weights[layer], (fan_out, fan_in), layer, "weights")?;
            check_shape(&biases[layer], (1, fan_out), layer, "biases")?;
        }
        Ok(Self {
            sizes: sizes.to_vec(),
            cost,
            weights,
            biases,
        })
    }

    /// Layer widths, input first.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Number of layers including the input layer.
    pub fn num_layers(&self) -> usize {
        self.sizes.len()
    }

    pub fn input_size(&self) -> usize {
        self.sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    /// Weight matrices, one per layer transition.
    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    /// Bias rows, one per layer transition.
    pub fn biases(&self) -> &[Matrix] {
        &self.biases
    }

    /// Total number of weights and biases.
    pub fn parameter_count(&self) -> usize {
        self.weights.iter().map(Matrix::len).sum::<usize>()
            + self.biases.iter().map(Matrix::len).sum::<usize>()
    }

    /// Output activations (1 × output_size) for one input vector.
    ///
    /// # Panics
    ///
    /// Panics if `input.len()` differs from the input layer width.
    pub fn forward(&self, input: &[f64]) -> Matrix {
        assert_eq!(
            input.len(),
            self.input_size(),
            "Input length must match the input layer width"
        );
        self.feed_forward(Matrix::row_vector(input))
    }

    pub(crate) fn feed_forward(&self, mut activation: Matrix) -> Matrix {
        for (w, b) in self.weights.iter().zip(&self.biases) {
            activation = sigmoid_matrix(&activation.dot_transposed(w).add(b));
        }
        activation
    }

    /// Index of the most activated output neuron.
    pub fn predict(&self, input: &[f64]) -> usize {
        self.forward(input).argmax()
    }

    /// Number of examples whose predicted class equals `round(label.value)`.
    pub fn accuracy(&self, data: &Dataset) -> usize {
        data.iter()
            .filter(|input| self.predict(input.features()) as i64 == input.label().class())
            .count()
    }

    /// Mean per-example cost over `data` plus the L2 penalty
    /// `0.5 * (lambda / n) * Σ ||W||²`, with `n = data.len()`.
    ///
    /// Returns 0 for an empty dataset.
    pub fn total_cost(&self, data: &Dataset, lambda: f64) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        let n = data.len() as f64;
        let data_cost: f64 = data
            .iter()
            .map(|input| {
                let a = self.forward(input.features());
                self.cost.function(&a, input.label().one_hot()) / n
            })
            .sum();
        let squared_norms: f64 = self
            .weights
            .iter()
            .map(|w| {
                let norm = w.norm();
                norm * norm
            })
            .sum();
        data_cost + 0.5 * (lambda / n) * squared_norms
    }

    /// Mutable access to the parameters for the optimizer.
    pub(crate) fn parameters_mut(&mut self) -> (&mut [Matrix], &mut [Matrix]) {
        (&mut self.weights, &mut self.biases)
    }
}

/// Checks layer count, widths and that every weight matrix size fits in
/// `usize`, so later `rows * cols` products cannot overflow.
pub(crate) fn validate_topology(sizes: &[usize]) -> Result<()> {
    if sizes.len() < 2 {
        return Err(NetworkError::NotEnoughLayers(sizes.len()));
    }
    if let Some(index) = sizes.iter().position(|&size| size == 0) {
        return Err(NetworkError::ZeroWidthLayer { index });
    }
    for (layer, pair) in sizes.windows(2).enumerate() {
        let (fan_in, fan_out) = (pair[0], pair[1]);
        if fan_in.checked_mul(fan_out).is_none() {
            return Err(NetworkError::LayerTooLarge {
                layer,
                fan_in,
                fan_out,
            });
        }
    }
    Ok(())
}

fn check_shape(
    matrix: &Matrix,
    expected: (usize, usize),
    layer: usize,
    kind: &'static str,
) -> Result<()> {
    if matrix.shape() != expected {
        return Err(NetworkError::ParameterShape {
            layer,
            kind,
            expected: expected.0 * expected.1,
            found: matrix.len(),
        });
    }
    Ok(())
}
