//! Errors reported by the structures in this crate.
//!
//! Lookups that miss are never errors: they are reported as `None` or `false`.

use thiserror::Error;

/// Errors raised synchronously by constructors and indexed accessors.
/// No operation that returns an error has mutated its structure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Returns `Ok(())` if `index < len`.
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfBounds { index, len })
    }
}
