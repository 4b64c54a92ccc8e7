//! Error types for network construction, training and persistence
//!
//! Shape mismatches inside matrix arithmetic are programmer errors and panic;
//! everything a caller can reasonably react to is reported through
//! [`NetworkError`].

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Errors raised before or outside the numeric core.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Topology has fewer than two layers.
    #[error("topology must have at least 2 layers, got {0}")]
    NotEnoughLayers(usize),

    /// A layer was declared with zero neurons.
    #[error("layer {index} has zero width")]
    ZeroWidthLayer { index: usize },

    /// Cost function name matches neither Quadratic nor CrossEntropy.
    #[error("invalid cost function '{0}'")]
    InvalidCostName(String),

    /// Weight initializer name is unknown.
    #[error("invalid weight initializer '{0}'")]
    InvalidInitializer(String),

    /// A stored or supplied parameter array does not fit the topology.
    #[error("layer {layer} {kind}: expected {expected} values, found {found}")]
    ParameterShape {
        layer: usize,
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    /// A layer transition has more weights than fit in `usize`.
    #[error("layer {layer}: {fan_out}x{fan_in} weight matrix is too large")]
    LayerTooLarge {
        layer: usize,
        fan_in: usize,
        fan_out: usize,
    },

    /// A weight or bias is NaN or infinite and cannot be stored as JSON.
    #[error("layer {layer} {kind}: value at index {index} is not finite")]
    NonFiniteParameter {
        layer: usize,
        kind: &'static str,
        index: usize,
    },

    /// Number of stored layers does not match the topology.
    #[error("expected {expected} {kind} layers, found {found}")]
    LayerCount {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    /// Hyperparameters or configuration values out of range.
    #[error("invalid training configuration: {0}")]
    InvalidConfig(String),

    /// Training was requested on an empty dataset.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NetworkError {
    /// True for errors detected before any training happens (bad topology,
    /// names or hyperparameters), false for I/O failures.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, NetworkError::Io(_) | NetworkError::Json(_))
    }
}
