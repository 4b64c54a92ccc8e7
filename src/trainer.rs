//! Mini-batch SGD training loop
//!
//! Each epoch shuffles the training set, splits it into contiguous
//! mini-batches, applies one [`Sgd`] update per batch and then records the
//! metrics enabled in [`MonitorFlags`]. A final batch shorter than
//! `mini_batch_size` is still trained on, averaged over its own length.
//!
//! # Example
//!
//! ```
//! use feedforward_nn::cost::Cost;
//! use feedforward_nn::data::{Dataset, Input};
//! use feedforward_nn::network::Network;
//! use feedforward_nn::trainer::{Trainer, TrainingOptions};
//! use feedforward_nn::utils::SimpleRng;
//!
//! let mut rng = SimpleRng::new(1);
//! let mut net = Network::new(&[2, 3, 2], Cost::CrossEntropy, &mut rng).unwrap();
//! let mut data: Dataset = vec![
//!     Input::new(vec![0.0, 1.0], 1.0, 2),
//!     Input::new(vec![1.0, 0.0], 0.0, 2),
//! ]
//! .into();
//!
//! let options = TrainingOptions::new(3, 1, 0.5).with_seed(7);
//! let history = Trainer::new(options).train(&mut net, &mut data, None).unwrap();
//! assert_eq!(history.epochs_completed, 3);
//! ```

use crate::data::Dataset;
use crate::error::{NetworkError, Result};
use crate::network::Network;
use crate::optimizers::Sgd;
use crate::utils::rng::SimpleRng;
use serde::Deserialize;
use std::ops::ControlFlow;
use tracing::info;

/// Which metrics to compute after every epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MonitorFlags {
    pub evaluation_cost: bool,
    pub evaluation_accuracy: bool,
    pub training_cost: bool,
    pub training_accuracy: bool,
}

impl MonitorFlags {
    /// Every metric enabled.
    pub fn all() -> Self {
        Self {
            evaluation_cost: true,
            evaluation_accuracy: true,
            training_cost: true,
            training_accuracy: true,
        }
    }

    /// No metric enabled.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Hyperparameters for one training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOptions {
    pub epochs: usize,
    pub mini_batch_size: usize,
    /// Learning rate η.
    pub eta: f64,
    /// L2 regularization strength λ; 0 disables weight decay.
    pub lambda: f64,
    pub monitor: MonitorFlags,
    /// Seed for the shuffle RNG; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl TrainingOptions {
    /// Unregularized, unmonitored, time-seeded options.
    pub fn new(epochs: usize, mini_batch_size: usize, eta: f64) -> Self {
        Self {
            epochs,
            mini_batch_size,
            eta,
            lambda: 0.0,
            monitor: MonitorFlags::none(),
            seed: None,
        }
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_monitor(mut self, monitor: MonitorFlags) -> Self {
        self.monitor = monitor;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check hyperparameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.mini_batch_size == 0 {
            return Err(NetworkError::InvalidConfig(
                "mini_batch_size must be greater than 0".to_string(),
            ));
        }
        if !self.eta.is_finite() || self.eta <= 0.0 {
            return Err(NetworkError::InvalidConfig(format!(
                "eta must be positive, got {}",
                self.eta
            )));
        }
        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(NetworkError::InvalidConfig(format!(
                "lambda must be non-negative, got {}",
                self.lambda
            )));
        }
        Ok(())
    }
}

/// Metrics gathered at the end of one epoch. Disabled metrics are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpochReport {
    /// 1-based epoch number.
    pub epoch: usize,
    pub training_cost: Option<f64>,
    pub training_accuracy: Option<usize>,
    pub evaluation_cost: Option<f64>,
    pub evaluation_accuracy: Option<usize>,
}

/// Per-epoch metric series; each vector stays empty when its flag is off.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingHistory {
    pub evaluation_cost: Vec<f64>,
    pub evaluation_accuracy: Vec<usize>,
    pub training_cost: Vec<f64>,
    pub training_accuracy: Vec<usize>,
    pub epochs_completed: usize,
}

impl TrainingHistory {
    fn record(&mut self, report: &EpochReport) {
        self.epochs_completed = report.epoch;
        self.training_cost.extend(report.training_cost);
        self.training_accuracy.extend(report.training_accuracy);
        self.evaluation_cost.extend(report.evaluation_cost);
        self.evaluation_accuracy.extend(report.evaluation_accuracy);
    }
}

/// Runs mini-batch SGD over a dataset for a fixed number of epochs.
///
/// The trainer owns the RNG used for shuffling, so a seeded trainer replays
/// the same batch order on every run.
#[derive(Debug, Clone)]
pub struct Trainer {
    options: TrainingOptions,
    rng: SimpleRng,
}

impl Trainer {
    pub fn new(options: TrainingOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => SimpleRng::new(seed),
            None => SimpleRng::from_time(),
        };
        Self { options, rng }
    }

    /// Use an explicit RNG instead of the one derived from the options.
    pub fn with_rng(options: TrainingOptions, rng: SimpleRng) -> Self {
        Self { options, rng }
    }

    pub fn options(&self) -> &TrainingOptions {
        &self.options
    }

    /// Train for exactly `options.epochs` epochs.
    ///
    /// `training` is shuffled in place every epoch. Evaluation metrics are
    /// only computed when `evaluation` is provided.
    ///
    /// # Errors
    ///
    /// Fails before touching the network if the options are out of range or
    /// the training set is empty.
    pub fn train(
        &mut self,
        network: &mut Network,
        training: &mut Dataset,
        evaluation: Option<&Dataset>,
    ) -> Result<TrainingHistory> {
        self.train_with(network, training, evaluation, |_| ControlFlow::Continue(()))
    }

    /// Like [`Trainer::train`], calling `on_epoch` after every epoch.
    ///
    /// Returning `ControlFlow::Break(())` stops training after the current
    /// epoch; the history then covers the completed epochs only.
    #[tracing::instrument(skip_all, fields(epochs = self.options.epochs, n = training.len()))]
    pub fn train_with<F>(
        &mut self,
        network: &mut Network,
        training: &mut Dataset,
        evaluation: Option<&Dataset>,
        mut on_epoch: F,
    ) -> Result<TrainingHistory>
    where
        F: FnMut(&EpochReport) -> ControlFlow<()>,
    {
        self.options.validate()?;
        if training.is_empty() {
            return Err(NetworkError::EmptyTrainingSet);
        }

        let n = training.len();
        let sgd = Sgd::with_regularization(self.options.eta, self.options.lambda);
        let monitor = self.options.monitor;
        let mut history = TrainingHistory::default();

        for epoch in 1..=self.options.epochs {
            training.shuffle(&mut self.rng);
            for batch in training.batches(self.options.mini_batch_size) {
                sgd.update_mini_batch(network, batch, n);
            }

            let report = self.report(network, training, evaluation, epoch, monitor);
            info!(
                epoch,
                training_cost = ?report.training_cost,
                training_accuracy = ?report.training_accuracy,
                evaluation_cost = ?report.evaluation_cost,
                evaluation_accuracy = ?report.evaluation_accuracy,
                "epoch complete"
            );
            history.record(&report);

            if on_epoch(&report).is_break() {
                info!(epoch, "training stopped by caller");
                break;
            }
        }

        Ok(history)
    }

    fn report(
        &self,
        network: &Network,
        training: &Dataset,
        evaluation: Option<&Dataset>,
        epoch: usize,
        monitor: MonitorFlags,
    ) -> EpochReport {
        let lambda = self.options.lambda;
        EpochReport {
            epoch,
            training_cost: monitor
                .training_cost
                .then(|| network.total_cost(training, lambda)),
            training_accuracy: monitor
                .training_accuracy
                .then(|| network.accuracy(training)),
            evaluation_cost: evaluation
                .filter(|_| monitor.evaluation_cost)
                .map(|data| network.total_cost(data, lambda)),
            evaluation_accuracy: evaluation
                .filter(|_| monitor.evaluation_accuracy)
                .map(|data| network.accuracy(data)),
        }
    }
}
