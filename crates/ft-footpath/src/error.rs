use ft_core::CoreError;
use ft_index::IndexError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FootpathError {
    #[error("footpath configuration error: {0}")]
    Config(#[from] CoreError),

    #[error(transparent)]
    Index(#[from] IndexError),
}

pub type FootpathResult<T> = Result<T, FootpathError>;
