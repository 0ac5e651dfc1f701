//! Construction errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("capacity must be greater than zero")]
    ZeroCapacity,
    #[error("max load factor must be finite and at least 0.1, got {0}")]
    InvalidLoadFactor(f64),
}
