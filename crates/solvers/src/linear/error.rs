use numtrace_core::FractionError;
use thiserror::Error;

use super::ConfigError;

/// Errors that stop a linear-system solver.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("coefficient matrix is empty")]
    Empty,

    #[error("coefficient matrix must be square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("at least {required} equations are required, got {actual}")]
    TooFewEquations { required: usize, actual: usize },

    #[error("constant vector has {actual} entries, expected {expected}")]
    ConstantsLength { expected: usize, actual: usize },

    #[error("coefficient a[{row}][{col}] is not finite: {value}")]
    NonFiniteCoefficient { row: usize, col: usize, value: f64 },

    #[error("constant b[{row}] is not finite: {value}")]
    NonFiniteConstant { row: usize, value: f64 },

    #[error("determinant of A is 0 ({determinant}), no unique solution exists")]
    Singular { determinant: String },

    #[error("zero pivot in column {column} after pivoting, no unique solution exists")]
    ZeroPivot { column: usize },

    #[error("zero diagonal entry in row {row}")]
    ZeroDiagonal { row: usize },

    #[error("iterates are no longer finite at iteration {iteration}")]
    Diverged { iteration: usize },

    #[error(transparent)]
    Fraction(#[from] FractionError),
}
