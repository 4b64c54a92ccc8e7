//! Parameter update rules
//!
//! The trainer applies one [`Sgd`] update per mini-batch. Gradients come from
//! [`Network::backprop`](crate::network::Network::backprop) and are summed over
//! the batch before the update is applied.

pub mod sgd;

pub use sgd::Sgd;
