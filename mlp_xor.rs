use feedforward_nn::config::load_config;
use feedforward_nn::utils::logging::install_logger;
use feedforward_nn::{
    Cost, Dataset, Input, MonitorFlags, Network, NetworkError, Trainer, TrainingOptions,
};
use std::env;
use std::process;
use tracing::{error, info};

// Small MLP to learn XOR with two output classes (educational example).
const SIZES: [usize; 3] = [2, 4, 2];
// Training hyperparameters.
const LEARNING_RATE: f64 = 2.0;
const EPOCHS: usize = 2_000;
const BATCH_SIZE: usize = 4;
const SEED: u64 = 42;

// XOR truth table; the label is the class index.
fn xor_dataset() -> Dataset {
    let samples = [
        ([0.0, 0.0], 0.0),
        ([0.0, 1.0], 1.0),
        ([1.0, 0.0], 1.0),
        ([1.0, 1.0], 0.0),
    ];
    samples
        .iter()
        .map(|(x, y)| Input::new(x.to_vec(), *y, SIZES[SIZES.len() - 1]))
        .collect()
}

// The XOR samples have 2 features and SIZES[2] classes; a config must match.
fn check_xor_widths(sizes: &[usize]) -> feedforward_nn::Result<()> {
    let output = SIZES[SIZES.len() - 1];
    match (sizes.first(), sizes.last()) {
        (Some(&2), Some(&last)) if last == output => Ok(()),
        _ => Err(NetworkError::InvalidConfig(format!(
            "XOR needs input width 2 and output width {}, got sizes {:?}",
            output, sizes
        ))),
    }
}

// Network and options either from a JSON config passed as the first argument
// or from the constants above.
fn setup() -> feedforward_nn::Result<(Network, TrainingOptions)> {
    match env::args().nth(1) {
        Some(path) => {
            let config = load_config(&path)?;
            check_xor_widths(&config.sizes)?;
            let mut rng = config.rng();
            let network = config.build_network(&mut rng)?;
            Ok((network, config.training_options()))
        }
        None => {
            let mut rng = feedforward_nn::utils::SimpleRng::new(SEED);
            let network = Network::new(&SIZES, Cost::CrossEntropy, &mut rng)?;
            let options = TrainingOptions::new(EPOCHS, BATCH_SIZE, LEARNING_RATE)
                .with_monitor(MonitorFlags {
                    training_cost: true,
                    ..MonitorFlags::none()
                })
                .with_seed(SEED);
            Ok((network, options))
        }
    }
}

fn run() -> feedforward_nn::Result<()> {
    let (mut network, options) = setup()?;
    let mut training = xor_dataset();
    let reference = training.clone();

    info!(sizes = ?network.sizes(), cost = %network.cost(), "training XOR");
    // No held-out split for a truth table: evaluation runs on the same four rows.
    let history = Trainer::new(options).train(&mut network, &mut training, Some(&reference))?;

    if let Some(cost) = history.training_cost.last() {
        info!(epochs = history.epochs_completed, cost, "final training cost");
    }
    if let Some(correct) = history.evaluation_accuracy.last() {
        info!(epochs = history.epochs_completed, correct, "final evaluation accuracy");
    }

    for input in reference.iter() {
        let output = network.forward(input.features());
        info!(
            input = ?input.features(),
            expected = input.label().value(),
            predicted = network.predict(input.features()),
            activations = ?output.as_slice(),
            "prediction"
        );
    }
    info!(
        correct = network.accuracy(&reference),
        total = reference.len(),
        "accuracy"
    );
    Ok(())
}

fn main() {
    if let Err(err) = install_logger() {
        eprintln!("Could not install logger: {}", err);
    }
    if let Err(err) = run() {
        error!(%err, "training failed");
        process::exit(1);
    }
}
