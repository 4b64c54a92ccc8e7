//! JSON persistence for trained networks
//!
//! A saved network is a [`NetworkRecord`]:
//!
//! ```json
//! {
//!   "sizes": [2, 3, 1],
//!   "cost": "CrossEntropy",
//!   "weights": [[...6 values...], [...3 values...]],
//!   "biases": [[...3 values...], [...1 value...]]
//! }
//! ```
//!
//! Weights are flattened row-major per layer. Floats are written with
//! round-trip precision so a reloaded network is bit-identical.

use crate::cost::Cost;
use crate::error::{NetworkError, Result};
use crate::matrix::Matrix;
use crate::network::{validate_topology, Network};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Serialized form of a [`Network`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub sizes: Vec<usize>,
    /// Cost function name; a missing field reads as an empty (invalid) name.
    #[serde(default)]
    pub cost: String,
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<Vec<f64>>,
}

impl From<&Network> for NetworkRecord {
    fn from(network: &Network) -> Self {
        Self {
            sizes: network.sizes().to_vec(),
            cost: network.cost().name().to_string(),
            weights: network
                .weights()
                .iter()
                .map(|w| w.as_slice().to_vec())
                .collect(),
            biases: network
                .biases()
                .iter()
                .map(|b| b.as_slice().to_vec())
                .collect(),
        }
    }
}

impl NetworkRecord {
    /// Rebuild the network, checking the cost name and every array length
    /// against the stored topology.
    pub fn into_network(self) -> Result<Network> {
        let cost = Cost::from_name(&self.cost)?;
        validate_topology(&self.sizes)?;
        let layers = self.sizes.len() - 1;
        if self.weights.len() != layers {
            return Err(NetworkError::LayerCount {
                kind: "weight",
                expected: layers,
                found: self.weights.len(),
            });
        }
        if self.biases.len() != layers {
            return Err(NetworkError::LayerCount {
                kind: "bias",
                expected: layers,
                found: self.biases.len(),
            });
        }

        let mut weights = Vec::with_capacity(layers);
        let mut biases = Vec::with_capacity(layers);
        let shapes = self.sizes.windows(2).map(|pair| (pair[0], pair[1]));
        for (layer, ((fan_in, fan_out), (w, b))) in shapes
            .zip(self.weights.into_iter().zip(self.biases))
            .enumerate()
        {
            weights.push(flat_to_matrix(w, fan_out, fan_in, layer, "weights")?);
            biases.push(flat_to_matrix(b, 1, fan_out, layer, "biases")?);
        }

        Network::from_parameters(&self.sizes, cost, weights, biases)
    }
}

fn flat_to_matrix(
    values: Vec<f64>,
    rows: usize,
    cols: usize,
    layer: usize,
    kind: &'static str,
) -> Result<Matrix> {
    if values.len() != rows * cols {
        return Err(NetworkError::ParameterShape {
            layer,
            kind,
            expected: rows * cols,
            found: values.len(),
        });
    }
    Ok(Matrix::from_vec(rows, cols, values))
}

/// JSON has no NaN or infinity; `serde_json` would write them as `null` and
/// the file could not be read back.
fn check_finite(network: &Network) -> Result<()> {
    let layers = network
        .weights()
        .iter()
        .map(|w| ("weights", w))
        .enumerate()
        .chain(network.biases().iter().map(|b| ("biases", b)).enumerate());
    for (layer, (kind, matrix)) in layers {
        if let Some(index) = matrix.as_slice().iter().position(|v| !v.is_finite()) {
            return Err(NetworkError::NonFiniteParameter { layer, kind, index });
        }
    }
    Ok(())
}

impl Network {
    /// Encode the network as a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::NonFiniteParameter`] if any weight or bias is
    /// NaN or infinite.
    pub fn to_json(&self) -> Result<String> {
        check_finite(self)?;
        Ok(serde_json::to_string(&NetworkRecord::from(self))?)
    }

    /// Decode a network from a JSON string.
    pub fn from_json(json: &str) -> Result<Network> {
        let record: NetworkRecord = serde_json::from_str(json)?;
        record.into_network()
    }

    /// Write the network to `path` as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::NonFiniteParameter`] for NaN or infinite
    /// parameters, in which case no file is written, and
    /// [`NetworkError::Io`] if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        debug!(path = %path.display(), sizes = ?self.sizes(), "network saved");
        Ok(())
    }

    /// Read a network previously written by [`Network::save`].
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Io`] or [`NetworkError::Json`] for unreadable
    /// files, [`NetworkError::InvalidCostName`] for an unknown cost, and a
    /// shape error when the stored arrays do not fit the stored topology.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Network> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let network = Network::from_json(&contents)?;
        debug!(path = %path.display(), sizes = ?network.sizes(), "network loaded");
        Ok(network)
    }
}
