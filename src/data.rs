//! Labeled examples and datasets
//!
//! Loading data from disk is left to the caller; this module only defines the
//! in-memory shapes the trainer consumes.

use crate::matrix::Matrix;
use crate::utils::rng::SimpleRng;
use std::ops::Index;

/// Target of one example: the raw scalar and its one-hot encoding.
///
/// The one-hot row is derived once in [`Label::new`] and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    value: f64,
    one_hot: Matrix,
}

impl Label {
    /// Build a label over `output_size` classes.
    ///
    /// The hot index is `round(value)`. A value that rounds outside
    /// `0..output_size` yields an all-zero row.
    pub fn new(value: f64, output_size: usize) -> Self {
        let mut one_hot = vec![0.0; output_size];
        let rounded = value.round();
        if rounded >= 0.0 && (rounded as usize) < output_size {
            one_hot[rounded as usize] = 1.0;
        }
        Self {
            value,
            one_hot: Matrix::from_vec(1, output_size, one_hot),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// One-hot row (1 × output_size).
    pub fn one_hot(&self) -> &Matrix {
        &self.one_hot
    }

    /// Class index the label refers to, `round(value)`.
    pub fn class(&self) -> i64 {
        self.value.round() as i64
    }
}

/// One feature vector with its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    features: Vec<f64>,
    label: Label,
}

impl Input {
    /// Create an example, deriving the label's one-hot row for `output_size`
    /// classes.
    pub fn new(features: Vec<f64>, value: f64, output_size: usize) -> Self {
        Self {
            features,
            label: Label::new(value, output_size),
        }
    }

    /// Create an example from an already constructed label.
    pub fn with_label(features: Vec<f64>, label: Label) -> Self {
        Self { features, label }
    }

    pub fn features(&self) -> &[f64] {
        &self.features
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Features as a single-row matrix.
    pub fn to_row(&self) -> Matrix {
        Matrix::row_vector(&self.features)
    }
}

/// Ordered collection of examples.
///
/// Order only matters for reproducing a shuffle sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    inputs: Vec<Input>,
}

impl Dataset {
    pub fn new(inputs: Vec<Input>) -> Self {
        Self { inputs }
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Input> {
        self.inputs.get(index)
    }

    pub fn push(&mut self, input: Input) {
        self.inputs.push(input);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Input> {
        self.inputs.iter()
    }

    pub fn as_slice(&self) -> &[Input] {
        &self.inputs
    }

    /// Uniform random permutation in place.
    pub fn shuffle(&mut self, rng: &mut SimpleRng) {
        rng.shuffle(&mut self.inputs);
    }

    /// Contiguous mini-batches of `size` examples; the last batch is shorter
    /// when the length is not a multiple of `size`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn batches(&self, size: usize) -> std::slice::Chunks<'_, Input> {
        self.inputs.chunks(size)
    }
}

impl Index<usize> for Dataset {
    type Output = Input;

    fn index(&self, index: usize) -> &Input {
        &self.inputs[index]
    }
}

impl FromIterator<Input> for Dataset {
    fn from_iter<I: IntoIterator<Item = Input>>(iter: I) -> Self {
        Self {
            inputs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Input;
    type IntoIter = std::slice::Iter<'a, Input>;

    fn into_iter(self) -> Self::IntoIter {
        self.inputs.iter()
    }
}

impl From<Vec<Input>> for Dataset {
    fn from(inputs: Vec<Input>) -> Self {
        Self::new(inputs)
    }
}
