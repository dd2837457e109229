use rand::Rng;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;

use crate::error::{MatrixError, Result};

/// Dense 2-D matrix of `f64` values.
///
/// The backing buffer is flat and row-major: element `(row, col)` lives at
/// `data[row * cols + col]`. The invariant `data.len() == rows * cols` holds
/// at all times; `reshape` may change `rows`/`cols` but never the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Builds a 1xN row vector from a flat sequence of values.
    pub fn row(values: Vec<f64>) -> Matrix {
        Matrix {
            rows: 1,
            cols: values.len(),
            data: values,
        }
    }

    /// Builds a 1xN row vector from raw unsigned bytes.
    ///
    /// Each byte is widened to `f64` with no scaling: pixel value 200 becomes
    /// 200.0. Normalization (e.g. dividing by 255) is the caller's business,
    /// done on the result via `scale`.
    pub fn from_bytes(bytes: &[u8]) -> Matrix {
        Matrix::row(bytes.iter().map(|&b| b as f64).collect())
    }

    pub fn identity(order: usize) -> Matrix {
        let mut res = Matrix::zeros(order, order);
        for i in 0..order {
            res.data[i * order + i] = 1.0;
        }
        res
    }

    pub fn ones(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![1.0; rows * cols],
        }
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    /// Both u1 and u2 must be uniform on (0, 1].
    fn sample_standard_normal<R: Rng>(rng: &mut R) -> f64 {
        // Draw two independent uniform samples in (0, 1] to avoid log(0).
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Fills a matrix with samples from N(mean, std_dev²).
    ///
    /// The generator is passed in rather than pulled from a thread-local, so
    /// construction is reproducible under a seeded rng.
    pub fn gaussian<R: Rng>(
        rows: usize,
        cols: usize,
        mean: f64,
        std_dev: f64,
        rng: &mut R,
    ) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for cell in res.data.iter_mut() {
            *cell = Matrix::sample_standard_normal(rng) * std_dev + mean;
        }
        res
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The flat row-major backing buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check_index(row, col)?;
        Ok(self.data[row * self.cols + col])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.check_index(row, col)?;
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Reinterprets the buffer with new dimensions. No data moves; the new
    /// shape must hold exactly as many elements as the old one.
    pub fn reshape(&mut self, rows: usize, cols: usize) -> Result<()> {
        if self.rows * self.cols != rows * cols {
            return Err(MatrixError::ReshapeSizeMismatch {
                current: self.rows * self.cols,
                requested: rows * cols,
            });
        }
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);
        for row in 0..res.rows {
            for col in 0..res.cols {
                res.data[row * res.cols + col] = self.data[col * self.cols + row];
            }
        }
        res
    }

    /// True iff the row or column counts differ. Basis of every shape guard.
    pub fn diff_shape(&self, other: &Matrix) -> bool {
        self.rows != other.rows || self.cols != other.cols
    }

    fn check_shape(&self, other: &Matrix) -> Result<()> {
        if self.diff_shape(other) {
            return Err(MatrixError::ShapeMismatch {
                left: (self.rows, self.cols),
                right: (other.rows, other.cols),
            });
        }
        Ok(())
    }

    pub fn add_assign(&mut self, other: &Matrix) -> Result<()> {
        self.check_shape(other)?;
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += b;
        }
        Ok(())
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        let mut res = self.clone();
        res.add_assign(other)?;
        Ok(res)
    }

    pub fn sub_assign(&mut self, other: &Matrix) -> Result<()> {
        self.check_shape(other)?;
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a -= b;
        }
        Ok(())
    }

    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        let mut res = self.clone();
        res.sub_assign(other)?;
        Ok(res)
    }

    /// Hadamard product: elementwise multiplication of equal-shaped matrices.
    pub fn hadamard_assign(&mut self, other: &Matrix) -> Result<()> {
        self.check_shape(other)?;
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a *= b;
        }
        Ok(())
    }

    pub fn hadamard(&self, other: &Matrix) -> Result<Matrix> {
        let mut res = self.clone();
        res.hadamard_assign(other)?;
        Ok(res)
    }

    pub fn scale_assign(&mut self, factor: f64) {
        for cell in self.data.iter_mut() {
            *cell *= factor;
        }
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        let mut res = self.clone();
        res.scale_assign(factor);
        res
    }

    pub fn map_assign<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64,
    {
        for cell in self.data.iter_mut() {
            *cell = f(*cell);
        }
    }

    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        let mut res = self.clone();
        res.map_assign(f);
        res
    }

    /// Matrix product `self * other`.
    ///
    /// Each output cell is the inner product of a row of `self` and a column
    /// of `other`, summed in ascending inner-index order. The fixed summation
    /// order pins the floating-point rounding, so results are reproducible
    /// (and bit-identical to `parallel::par_dot`).
    pub fn dot(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(MatrixError::DimensionMismatch {
                left_cols: self.cols,
                right_rows: other.rows,
            });
        }

        let inner = self.cols;
        let mut res = Matrix::zeros(self.rows, other.cols);
        for row in 0..res.rows {
            for col in 0..res.cols {
                let mut sum = 0.0;
                for k in 0..inner {
                    sum += self.data[row * inner + k] * other.data[k * other.cols + col];
                }
                res.data[row * res.cols + col] = sum;
            }
        }
        Ok(res)
    }

    /// Overwrites this matrix's contents with `other`'s.
    ///
    /// Shapes must match exactly; there is no way to alias or partially copy
    /// another matrix's buffer.
    pub fn copy_from(&mut self, other: &Matrix) -> Result<()> {
        self.check_shape(other)?;
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f64>) -> Matrix {
        debug_assert_eq!(data.len(), rows * cols);
        Matrix { rows, cols, data }
    }
}
