//! Feedforward Neural Network Library
//!
//! A sigmoid multilayer perceptron trained with mini-batch stochastic gradient
//! descent, with optional L2 regularization and a choice of quadratic or
//! cross-entropy cost.
//!
//! # Modules
//!
//! - `matrix`: Dense row-major matrix primitive
//! - `cost`: Quadratic and cross-entropy cost functions
//! - `data`: Labels, examples and datasets
//! - `network`: Parameter store, forward pass and backpropagation
//! - `optimizers`: SGD update rule with weight decay
//! - `trainer`: Epoch loop with shuffling, mini-batching and monitoring
//! - `persistence`: JSON save/load of trained networks
//! - `config`: Training configuration structures
//! - `utils`: RNG, activation functions and logging setup
//! - `error`: Error types

pub mod config;
pub mod cost;
pub mod data;
pub mod error;
pub mod matrix;
pub mod network;
pub mod optimizers;
pub mod persistence;
pub mod trainer;
pub mod utils;

pub use cost::Cost;
pub use data::{Dataset, Input, Label};
pub use error::{NetworkError, Result};
pub use matrix::Matrix;
pub use network::{Gradients, Initializer, Network};
pub use trainer::{EpochReport, MonitorFlags, Trainer, TrainingHistory, TrainingOptions};
