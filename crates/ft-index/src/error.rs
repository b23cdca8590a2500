//! Index error type.

use thiserror::Error;

use ft_core::CoreError;

/// Errors produced by `ft-index`.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("cannot build an index over zero points")]
    EmptyInput,

    #[error("index queried before it was built")]
    IndexNotBuilt,

    #[error("leaf size must be at least 1")]
    InvalidLeafSize,

    #[error("{0} points exceed the 32-bit stop index range")]
    TooManyPoints(usize),

    #[error("unknown stop id {0:?}")]
    UnknownStop(String),

    #[error("ball tree invariant violated: {0}")]
    InvariantViolated(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type IndexResult<T> = Result<T, IndexError>;
