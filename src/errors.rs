//! Errors
//!
//! Custom error types used throughout the `sapling` crate.
use thiserror::Error;

/// Errors that can occur when configuring, fitting or using a decision tree.
#[derive(Debug, Error)]
pub enum SaplingError {
    /// Shape or value problems with the data passed to `fit` or `predict`.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidConfiguration(String, String, String),
    /// The model was used before `fit` was called.
    #[error("The model has not been fitted, call fit before using it.")]
    NotFitted,
    /// Unable to write model to file.
    #[error("Unable to write model to file: {0}")]
    UnableToWrite(String),
    /// Unable to read model from file.
    #[error("Unable to read model from a file {0}")]
    UnableToRead(String),
}
