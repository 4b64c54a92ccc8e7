//! Shared utilities for the network implementation
//!
//! This module provides random number generation, activation functions and
//! logging setup used across the crate.

pub mod activations;
pub mod logging;
pub mod rng;

pub use activations::{sigmoid, sigmoid_matrix, sigmoid_prime, sigmoid_prime_matrix};
pub use rng::SimpleRng;
