//! Dense row-major matrix used by every layer of the network
//!
//! All operations allocate and return a new matrix; operands are only ever
//! borrowed. Binary operations panic when shapes are incompatible, since the
//! shapes are fixed by the topology and a mismatch means a bug in the caller.

use crate::utils::rng::SimpleRng;
use std::fmt;
use std::ops::Index;

/// Row-major matrix of `f64` values.
///
/// Vectors are represented as single-row matrices (1 × n).
///
/// # Example
///
/// ```
/// use feedforward_nn::matrix::Matrix;
///
/// let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
/// let b = Matrix::from_vec(2, 1, vec![1.0, 1.0]);
/// let c = a.dot(&b);
/// assert_eq!(c.as_slice(), &[3.0, 7.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Matrix of zeros with the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Wrap row-major data.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "Matrix data length {} does not match shape {}x{}",
            data.len(),
            rows,
            cols
        );
        Self { rows, cols, data }
    }

    /// Single-row matrix copied from a slice.
    pub fn row_vector(values: &[f64]) -> Self {
        Self::from_vec(1, values.len(), values.to_vec())
    }

    /// Matrix of i.i.d. uniform samples centered at 0 with half-width
    /// `1 / sqrt(variance)`.
    pub fn random(rows: usize, cols: usize, variance: f64, rng: &mut SimpleRng) -> Self {
        let boundary = 1.0 / variance.sqrt();
        let data = (0..rows * cols)
            .map(|_| rng.gen_range_f64(-boundary, boundary))
            .collect();
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major view of the elements.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consume the matrix and return its row-major elements.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Elementwise sum.
    pub fn add(&self, other: &Matrix) -> Matrix {
        self.zip_with(other, "add", |a, b| a + b)
    }

    /// Elementwise difference `self - other`.
    pub fn subtract(&self, other: &Matrix) -> Matrix {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    /// Elementwise (Hadamard) product.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        self.zip_with(other, "multiply", |a, b| a * b)
    }

    /// Multiply every element by `factor`.
    pub fn scale(&self, factor: f64) -> Matrix {
        self.apply(|v| v * factor)
    }

    /// Matrix product `self · other`.
    ///
    /// # Panics
    ///
    /// Panics if `self.cols() != other.rows()`.
    pub fn dot(&self, other: &Matrix) -> Matrix {
        assert_eq!(
            self.cols, other.rows,
            "dot: incompatible shapes {}x{} and {}x{}",
            self.rows, self.cols, other.rows, other.cols
        );
        let mut out = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            let lhs_row = &self.data[i * self.cols..(i + 1) * self.cols];
            let out_row = &mut out.data[i * other.cols..(i + 1) * other.cols];
            for (k, &lhs) in lhs_row.iter().enumerate() {
                let rhs_row = &other.data[k * other.cols..(k + 1) * other.cols];
                for (value, &rhs) in out_row.iter_mut().zip(rhs_row) {
                    *value += lhs * rhs;
                }
            }
        }
        out
    }

    /// Matrix product `self · otherᵀ` without materializing the transpose.
    ///
    /// # Panics
    ///
    /// Panics if `self.cols() != other.cols()`.
    pub fn dot_transposed(&self, other: &Matrix) -> Matrix {
        assert_eq!(
            self.cols, other.cols,
            "dot_transposed: incompatible shapes {}x{} and ({}x{})^T",
            self.rows, self.cols, other.rows, other.cols
        );
        let mut out = Matrix::zeros(self.rows, other.rows);
        for i in 0..self.rows {
            let lhs_row = &self.data[i * self.cols..(i + 1) * self.cols];
            for j in 0..other.rows {
                let rhs_row = &other.data[j * other.cols..(j + 1) * other.cols];
                out.data[i * other.rows + j] =
                    lhs_row.iter().zip(rhs_row).map(|(a, b)| a * b).sum();
            }
        }
        out
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        out
    }

    /// Apply `f` to every element.
    pub fn apply<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Elementwise natural log with `ln(0) = 0`.
    ///
    /// The zero case keeps cross-entropy finite when a sigmoid output saturates
    /// to exactly 0 or 1.
    pub fn ln(&self) -> Matrix {
        self.apply(|v| if v == 0.0 { 0.0 } else { v.ln() })
    }

    /// Frobenius (L2) norm.
    pub fn norm(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Sum of all elements.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Row-major index of the first maximum element.
    pub fn argmax(&self) -> usize {
        let mut best = 0usize;
        for (i, &value) in self.data.iter().enumerate().skip(1) {
            if value > self.data[best] {
                best = i;
            }
        }
        best
    }

    fn zip_with<F>(&self, other: &Matrix, op: &str, f: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        assert_eq!(
            self.shape(),
            other.shape(),
            "{}: shape mismatch {}x{} vs {}x{}",
            op,
            self.rows,
            self.cols,
            other.rows,
            other.cols
        );
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.rows && col < self.cols,
            "Index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols.max(1)) {
            let cells: Vec<String> = row.iter().map(|v| format!("{:.6}", v)).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}
