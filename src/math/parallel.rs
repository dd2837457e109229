use rayon::prelude::*;

use crate::error::{MatrixError, Result};
use crate::math::matrix::Matrix;

/// Data-parallel matrix product, bit-identical to [`Matrix::dot`].
///
/// The flat output index space `[0, rows * cols)` is partitioned across
/// rayon's worker pool. Each worker owns a disjoint range of output cells and
/// only reads the two input matrices, so no synchronization is needed. The
/// inner summation runs in ascending index order no matter which worker
/// computes a cell, so the result matches the sequential product exactly —
/// not approximately.
///
/// The call blocks until every cell is written; no handle is exposed.
pub fn par_dot(left: &Matrix, right: &Matrix) -> Result<Matrix> {
    if left.cols() != right.rows() {
        return Err(MatrixError::DimensionMismatch {
            left_cols: left.cols(),
            right_rows: right.rows(),
        });
    }

    let inner = left.cols();
    let out_rows = left.rows();
    let out_cols = right.cols();
    let a = left.as_slice();
    let b = right.as_slice();

    let mut out = vec![0.0f64; out_rows * out_cols];
    out.par_iter_mut().enumerate().for_each(|(index, cell)| {
        let row = index / out_cols;
        let col = index % out_cols;
        let mut sum = 0.0;
        for k in 0..inner {
            sum += a[row * inner + k] * b[k * out_cols + col];
        }
        *cell = sum;
    });

    Ok(Matrix::from_parts(out_rows, out_cols, out))
}
