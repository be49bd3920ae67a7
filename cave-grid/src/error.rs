use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("grid dimension must be positive, got {0}")]
    InvalidDimension(usize),
    #[error("density must be within [0, 1], got {0}")]
    InvalidDensity(f64),
    #[error("iteration count must not be negative, got {0}")]
    InvalidIterationCount(i64),
    #[error("malformed grid text: {0}")]
    MalformedGrid(String),
    #[error("unknown rule {0:?}")]
    UnknownRule(String),
}
