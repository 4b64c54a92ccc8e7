//! Configuration structures for training
//!
//! This module provides a JSON-backed description of one training run: the
//! topology, cost function, initializer and SGD hyperparameters.

use crate::cost::Cost;
use crate::error::{NetworkError, Result};
use crate::network::{validate_topology, Initializer, Network};
use crate::trainer::{MonitorFlags, TrainingOptions};
use crate::utils::rng::SimpleRng;
use serde::Deserialize;
use std::fs;

/// Configuration for a training run.
///
/// Optional fields fall back to:
///
/// - `cost`: `"cross_entropy"`
/// - `initializer`: `"default"`
/// - `lambda`: `0.0`
/// - `seed`: clock-based
/// - `monitor`: every flag off
///
/// # Example
///
/// ```json
/// {
///   "sizes": [784, 30, 10],
///   "cost": "cross_entropy",
///   "epochs": 30,
///   "mini_batch_size": 10,
///   "eta": 0.5,
///   "lambda": 5.0,
///   "seed": 42,
///   "monitor": { "evaluation_accuracy": true }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    /// Layer widths, input first
    pub sizes: Vec<usize>,

    /// Cost function name: "quadratic" or "cross_entropy"
    pub cost: Option<String>,

    /// Weight initializer: "default" or "large"
    pub initializer: Option<String>,

    /// Number of passes over the training set
    pub epochs: usize,

    /// Examples per SGD update
    pub mini_batch_size: usize,

    /// Learning rate
    pub eta: f64,

    /// L2 regularization parameter
    pub lambda: Option<f64>,

    /// Seed for initialization and shuffling
    pub seed: Option<u64>,

    /// Metrics reported after each epoch
    #[serde(default)]
    pub monitor: MonitorFlags,
}

impl TrainingConfig {
    /// Resolved cost function.
    pub fn cost(&self) -> Result<Cost> {
        match &self.cost {
            Some(name) => Cost::from_name(name),
            None => Ok(Cost::default()),
        }
    }

    /// Resolved weight initializer.
    pub fn initializer(&self) -> Result<Initializer> {
        match &self.initializer {
            Some(name) => name.parse(),
            None => Ok(Initializer::default()),
        }
    }

    /// RNG for this run, seeded from `seed` when present.
    pub fn rng(&self) -> SimpleRng {
        match self.seed {
            Some(seed) => SimpleRng::new(seed),
            None => SimpleRng::from_time(),
        }
    }

    /// Freshly initialized network for this configuration.
    pub fn build_network(&self, rng: &mut SimpleRng) -> Result<Network> {
        Network::with_initializer(&self.sizes, self.cost()?, self.initializer()?, rng)
    }

    /// SGD options for this configuration.
    pub fn training_options(&self) -> TrainingOptions {
        let options = TrainingOptions::new(self.epochs, self.mini_batch_size, self.eta)
            .with_lambda(self.lambda.unwrap_or(0.0))
            .with_monitor(self.monitor);
        match self.seed {
            Some(seed) => options.with_seed(seed),
            None => options,
        }
    }
}

/// Loads a training configuration from a JSON file.
///
/// Reads the file at `path`, deserializes it and validates the values.
///
/// # Returns
///
/// `Ok(TrainingConfig)` on success, or an error if the file cannot be read,
/// the JSON is invalid, or a value is out of range.
///
/// # Examples
///
/// ```no_run
/// use feedforward_nn::config::load_config;
///
/// let cfg = load_config("config/xor.json").unwrap();
/// assert_eq!(cfg.sizes, vec![2, 4, 2]);
/// ```
pub fn load_config(path: &str) -> Result<TrainingConfig> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse and validate a configuration from a JSON string.
pub fn parse_config(json: &str) -> Result<TrainingConfig> {
    let config: TrainingConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &TrainingConfig) -> Result<()> {
    validate_topology(&config.sizes)?;

    config.cost()?;
    config.initializer()?;

    if config.epochs == 0 {
        return Err(NetworkError::InvalidConfig(
            "epochs must be greater than 0".to_string(),
        ));
    }

    config.training_options().validate()
}
