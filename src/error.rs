use std::fmt;

/// Contract-violation errors raised by the matrix core.
///
/// All four kinds are programmer errors, not transient conditions: they are
/// raised at the point of violation and are never retried or recovered from
/// inside the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// A row or column index is >= the matrix's dimension.
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// Two matrices required to share a shape do not.
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// A matrix product's inner dimensions disagree.
    DimensionMismatch {
        left_cols: usize,
        right_rows: usize,
    },
    /// A reshape target's element count differs from the current count.
    ReshapeSizeMismatch {
        current: usize,
        requested: usize,
    },
}

pub type Result<T> = std::result::Result<T, MatrixError>;

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::IndexOutOfRange { row, col, rows, cols } => write!(
                f,
                "index ({row}, {col}) out of range for a {rows}x{cols} matrix"
            ),
            MatrixError::ShapeMismatch { left, right } => write!(
                f,
                "shape mismatch: {}x{} vs {}x{}",
                left.0, left.1, right.0, right.1
            ),
            MatrixError::DimensionMismatch { left_cols, right_rows } => write!(
                f,
                "dot product dimension mismatch: left has {left_cols} columns, right has {right_rows} rows"
            ),
            MatrixError::ReshapeSizeMismatch { current, requested } => write!(
                f,
                "reshape size mismatch: matrix holds {current} elements, target shape holds {requested}"
            ),
        }
    }
}

impl std::error::Error for MatrixError {}
