//! Cost functions for the output layer
//!
//! A [`Cost`] is a plain tag; both operations take every operand explicitly so
//! there is no state to initialize before use. The two variants can be swapped
//! without touching any other part of the network.

use crate::error::{NetworkError, Result};
use crate::matrix::Matrix;
use crate::utils::activations::sigmoid_prime_matrix;
use std::fmt;
use std::str::FromStr;

/// Cost function applied to the output activations.
///
/// # Example
///
/// ```
/// use feedforward_nn::cost::Cost;
/// use feedforward_nn::matrix::Matrix;
///
/// let a = Matrix::row_vector(&[0.1, 0.2]);
/// let y = Matrix::row_vector(&[0.3, 0.4]);
/// let c = Cost::Quadratic.function(&a, &y);
/// assert!((c - 0.04).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cost {
    /// `0.5 * ||a - y||^2`
    Quadratic,
    /// `Σ -y ln(a) - (1 - y) ln(1 - a)`
    #[default]
    CrossEntropy,
}

impl Cost {
    pub const QUADRATIC: &'static str = "Quadratic";
    pub const CROSS_ENTROPY: &'static str = "CrossEntropy";

    /// Scalar cost of prediction `a` against target `y`.
    pub fn function(&self, a: &Matrix, y: &Matrix) -> f64 {
        match self {
            Cost::Quadratic => {
                let norm = a.subtract(y).norm();
                0.5 * norm * norm
            }
            Cost::CrossEntropy => {
                let one_minus_y = y.apply(|v| 1.0 - v);
                let one_minus_a = a.apply(|v| 1.0 - v);
                y.scale(-1.0)
                    .multiply(&a.ln())
                    .subtract(&one_minus_y.multiply(&one_minus_a.ln()))
                    .sum()
            }
        }
    }

    /// Error signal at the output layer.
    ///
    /// `z` is the output pre-activation. Cross-entropy ignores it because the
    /// sigmoid derivative cancels out of its gradient.
    pub fn delta(&self, a: &Matrix, y: &Matrix, z: &Matrix) -> Matrix {
        match self {
            Cost::Quadratic => a.subtract(y).multiply(&sigmoid_prime_matrix(z)),
            Cost::CrossEntropy => a.subtract(y),
        }
    }

    /// Name used in saved networks.
    pub fn name(&self) -> &'static str {
        match self {
            Cost::Quadratic => Self::QUADRATIC,
            Cost::CrossEntropy => Self::CROSS_ENTROPY,
        }
    }

    /// Look up a cost function by name.
    ///
    /// Accepts the stored names as well as `quadratic`, `cross_entropy` and
    /// `crossEntropy` spellings.
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "quadratic" => Ok(Cost::Quadratic),
            "crossentropy" => Ok(Cost::CrossEntropy),
            _ => Err(NetworkError::InvalidCostName(name.to_string())),
        }
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cost {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self> {
        Cost::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for cost in [Cost::Quadratic, Cost::CrossEntropy] {
            assert_eq!(Cost::from_name(cost.name()).unwrap(), cost);
        }
    }

    #[test]
    fn test_alternate_spellings() {
        assert_eq!(Cost::from_name("crossEntropy").unwrap(), Cost::CrossEntropy);
        assert_eq!(Cost::from_name("cross_entropy").unwrap(), Cost::CrossEntropy);
        assert_eq!(Cost::from_name("quadratic").unwrap(), Cost::Quadratic);
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(
            Cost::from_name("hinge"),
            Err(NetworkError::InvalidCostName(name)) if name == "hinge"
        ));
    }
}
