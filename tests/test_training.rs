// Tests for the SGD update rule and the epoch loop: exact single-example
// steps, weight decay, short final batches, monitoring and early stopping.

use approx::assert_relative_eq;
use feedforward_nn::optimizers::Sgd;
use feedforward_nn::utils::SimpleRng;
use feedforward_nn::{
    Cost, Dataset, Input, MonitorFlags, Network, NetworkError, Trainer, TrainingOptions,
};
use std::ops::ControlFlow;

fn and_dataset() -> Dataset {
    [
        ([0.0, 0.0], 0.0),
        ([0.0, 1.0], 0.0),
        ([1.0, 0.0], 0.0),
        ([1.0, 1.0], 1.0),
    ]
    .iter()
    .map(|(x, y)| Input::new(x.to_vec(), *y, 2))
    .collect()
}

fn small_network(seed: u64) -> Network {
    Network::new(&[2, 3, 2], Cost::CrossEntropy, &mut SimpleRng::new(seed)).unwrap()
}

// ============================================================================
// Single Update
// ============================================================================

mod single_update_tests {
    use super::*;

    #[test]
    fn test_single_example_step_is_exact() {
        let mut net = Network::new(&[2, 3, 1], Cost::CrossEntropy, &mut SimpleRng::new(42)).unwrap();
        let before = net.clone();
        let mut data = Dataset::new(vec![Input::new(vec![1.0, 2.0], 0.0, 1)]);
        let grads = before.backprop(&data[0]);

        let options = TrainingOptions::new(1, 1, 0.5).with_seed(1);
        Trainer::new(options).train(&mut net, &mut data, None).unwrap();

        for layer in 0..2 {
            assert_eq!(
                net.weights()[layer],
                before.weights()[layer].subtract(&grads.weights[layer].scale(0.5))
            );
            assert_eq!(
                net.biases()[layer],
                before.biases()[layer].subtract(&grads.biases[layer].scale(0.5))
            );
        }
    }

    #[test]
    fn test_single_step_reduces_cost() {
        let mut net = Network::new(&[2, 3, 1], Cost::CrossEntropy, &mut SimpleRng::new(42)).unwrap();
        let mut data = Dataset::new(vec![Input::new(vec![1.0, 2.0], 0.0, 1)]);
        let cost_before = net.total_cost(&data, 0.0);
        let output_before = net.forward(&[1.0, 2.0]).as_slice()[0];

        let options = TrainingOptions::new(1, 1, 0.5).with_seed(1);
        Trainer::new(options).train(&mut net, &mut data, None).unwrap();

        // Target is [1.0], so the output moves up and the cost drops.
        assert!(net.forward(&[1.0, 2.0]).as_slice()[0] > output_before);
        assert!(net.total_cost(&data, 0.0) < cost_before);
    }

    #[test]
    fn test_weight_decay_factor() {
        let sgd = Sgd::with_regularization(0.5, 2.0);
        assert_relative_eq!(sgd.weight_decay(10), 1.0 - 0.5 * 2.0 / 10.0, epsilon = 1e-15);
        assert_eq!(Sgd::new(0.5).weight_decay(10), 1.0);
    }

    #[test]
    fn test_decay_shrinks_weights_without_gradient_signal() {
        let mut net = small_network(3);
        let before = net.clone();
        let zero = feedforward_nn::Gradients::zeros_like(&net);

        let sgd = Sgd::with_regularization(0.1, 5.0);
        sgd.apply(&mut net, &zero, 1, 10);

        let decay = 1.0 - 0.1 * (5.0 / 10.0);
        for (after, orig) in net.weights().iter().zip(before.weights()) {
            assert_eq!(*after, orig.scale(decay));
        }
        // Biases are never decayed.
        assert_eq!(net.biases(), before.biases());
    }
}

// ============================================================================
// Epoch Loop
// ============================================================================

mod epoch_tests {
    use super::*;

    #[test]
    fn test_short_final_batch_is_applied() {
        let data: Dataset = (0..5)
            .map(|i| Input::new(vec![i as f64 / 5.0, 1.0 - i as f64 / 5.0], (i % 2) as f64, 2))
            .collect();
        let eta = 0.7;
        let lambda = 1.0;

        // Trainer: one epoch, batches of 2 -> sizes 2, 2, 1.
        let mut trained = small_network(17);
        let mut training = data.clone();
        let options = TrainingOptions::new(1, 2, eta).with_lambda(lambda).with_seed(11);
        Trainer::new(options).train(&mut trained, &mut training, None).unwrap();

        // Same shuffle and updates done by hand.
        let sgd = Sgd::with_regularization(eta, lambda);
        let mut rng = SimpleRng::new(11);
        let mut shuffled = data.clone();
        shuffled.shuffle(&mut rng);
        assert_eq!(shuffled, training);

        let batches: Vec<&[Input]> = shuffled.batches(2).collect();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[2].len(), 1);

        let mut manual = small_network(17);
        for batch in &batches[..2] {
            sgd.update_mini_batch(&mut manual, batch, 5);
        }
        let without_tail = manual.clone();
        sgd.update_mini_batch(&mut manual, batches[2], 5);

        assert_eq!(trained, manual);
        assert_ne!(trained, without_tail);
    }

    #[test]
    fn test_same_seed_reproduces_training() {
        let options = TrainingOptions::new(5, 2, 1.0).with_seed(99);

        let mut a = small_network(1);
        let mut b = small_network(1);
        Trainer::new(options.clone())
            .train(&mut a, &mut and_dataset(), None)
            .unwrap();
        Trainer::new(options)
            .train(&mut b, &mut and_dataset(), None)
            .unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_training_cost_decreases() {
        let mut net = small_network(5);
        let mut data = and_dataset();
        let options = TrainingOptions::new(300, 2, 1.0)
            .with_monitor(MonitorFlags {
                training_cost: true,
                ..MonitorFlags::none()
            })
            .with_seed(5);

        let history = Trainer::new(options).train(&mut net, &mut data, None).unwrap();

        assert_eq!(history.training_cost.len(), 300);
        let first = history.training_cost[0];
        let last = history.training_cost[299];
        assert!(last < first, "cost did not decrease: {} -> {}", first, last);
    }

    #[test]
    fn test_total_cost_includes_l2_penalty() {
        let net = small_network(2);
        let data = and_dataset();
        let lambda = 3.0;

        let squared: f64 = net.weights().iter().map(|w| w.norm().powi(2)).sum();
        let expected = 0.5 * (lambda / data.len() as f64) * squared;

        assert_relative_eq!(
            net.total_cost(&data, lambda) - net.total_cost(&data, 0.0),
            expected,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_total_cost_empty_dataset() {
        let net = small_network(2);
        assert_eq!(net.total_cost(&Dataset::default(), 1.0), 0.0);
    }
}

// ============================================================================
// Monitoring
// ============================================================================

mod monitoring_tests {
    use super::*;

    #[test]
    fn test_all_flags_record_every_epoch() {
        let mut net = small_network(4);
        let mut training = and_dataset();
        let evaluation = and_dataset();
        let options = TrainingOptions::new(4, 2, 0.5)
            .with_monitor(MonitorFlags::all())
            .with_seed(4);

        let history = Trainer::new(options)
            .train(&mut net, &mut training, Some(&evaluation))
            .unwrap();

        assert_eq!(history.epochs_completed, 4);
        assert_eq!(history.training_cost.len(), 4);
        assert_eq!(history.training_accuracy.len(), 4);
        assert_eq!(history.evaluation_cost.len(), 4);
        assert_eq!(history.evaluation_accuracy.len(), 4);
        assert!(history.evaluation_accuracy.iter().all(|&c| c <= evaluation.len()));
    }

    #[test]
    fn test_disabled_flags_stay_empty() {
        let mut net = small_network(4);
        let mut training = and_dataset();
        let evaluation = and_dataset();
        let options = TrainingOptions::new(3, 2, 0.5)
            .with_monitor(MonitorFlags {
                training_accuracy: true,
                ..MonitorFlags::none()
            })
            .with_seed(4);

        let history = Trainer::new(options)
            .train(&mut net, &mut training, Some(&evaluation))
            .unwrap();

        assert_eq!(history.training_accuracy.len(), 3);
        assert!(history.training_cost.is_empty());
        assert!(history.evaluation_cost.is_empty());
        assert!(history.evaluation_accuracy.is_empty());
    }

    #[test]
    fn test_evaluation_flags_without_evaluation_set() {
        let mut net = small_network(4);
        let mut training = and_dataset();
        let options = TrainingOptions::new(2, 2, 0.5)
            .with_monitor(MonitorFlags::all())
            .with_seed(4);

        let history = Trainer::new(options).train(&mut net, &mut training, None).unwrap();

        assert_eq!(history.training_cost.len(), 2);
        assert!(history.evaluation_cost.is_empty());
        assert!(history.evaluation_accuracy.is_empty());
    }

    #[test]
    fn test_epoch_hook_can_stop_training() {
        let mut net = small_network(4);
        let mut training = and_dataset();
        let options = TrainingOptions::new(10, 2, 0.5)
            .with_monitor(MonitorFlags {
                training_cost: true,
                ..MonitorFlags::none()
            })
            .with_seed(4);

        let mut seen = Vec::new();
        let history = Trainer::new(options)
            .train_with(&mut net, &mut training, None, |report| {
                seen.push(report.epoch);
                if report.epoch == 2 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();

        assert_eq!(seen, vec![1, 2]);
        assert_eq!(history.epochs_completed, 2);
        assert_eq!(history.training_cost.len(), 2);
    }
}

// ============================================================================
// Errors
// ============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_empty_training_set() {
        let mut net = small_network(1);
        let before = net.clone();
        let mut empty = Dataset::default();

        let err = Trainer::new(TrainingOptions::new(1, 1, 0.5).with_seed(1))
            .train(&mut net, &mut empty, None)
            .unwrap_err();

        assert!(matches!(err, NetworkError::EmptyTrainingSet));
        assert_eq!(net, before);
    }

    #[test]
    fn test_zero_batch_size() {
        let mut net = small_network(1);
        let before = net.clone();

        let err = Trainer::new(TrainingOptions::new(1, 0, 0.5).with_seed(1))
            .train(&mut net, &mut and_dataset(), None)
            .unwrap_err();

        assert!(matches!(err, NetworkError::InvalidConfig(_)));
        assert_eq!(net, before);
    }

    #[test]
    fn test_negative_lambda() {
        let options = TrainingOptions::new(1, 1, 0.5).with_lambda(-1.0);
        assert!(matches!(options.validate(), Err(NetworkError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_epochs_is_a_no_op() {
        let mut net = small_network(1);
        let before = net.clone();
        let history = Trainer::new(TrainingOptions::new(0, 2, 0.5).with_seed(1))
            .train(&mut net, &mut and_dataset(), None)
            .unwrap();
        assert_eq!(history.epochs_completed, 0);
        assert_eq!(net, before);
    }
}
