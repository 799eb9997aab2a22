//! Error types for pipe execution and pipeline validation.

use thiserror::Error;

/// The main error type for pipeline operations.
///
/// A pipe reports failure by returning one of these; the chain stores the
/// rendered message (`to_string()`) in the failing [`Outcome`](crate::Outcome).
#[derive(Error, Debug)]
pub enum Error {
    /// A generic failure raised by a pipe, rendered verbatim.
    #[error("{0}")]
    Message(String),

    /// A pipe rejected its input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A pipe panicked while executing.
    #[error("Pipe panicked: {0}")]
    Panic(String),

    /// The configured chain ends on a type the pipeline does not declare.
    #[error("The return type '{type_name}' is not valid.")]
    InvalidReturnType {
        /// Name of the chain's final payload type.
        type_name: String,
    },

    /// The pipeline was never configured and carries no seeded outcome.
    #[error("The pipeline has not been configured.")]
    NotConfigured,
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Message(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Message(msg.to_string())
    }
}

/// A specialized `Result` type for pipe execution.
pub type Result<T> = std::result::Result<T, Error>;
