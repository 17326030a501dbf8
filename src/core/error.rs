//! Error types for tokensim.

use thiserror::Error;

/// Result type alias for tokensim operations.
pub type Result<T> = std::result::Result<T, TokensimError>;

/// Error types for the modeling core.
///
/// Every violation is raised at the point it is detected; a failed run
/// produces no partial result.
#[derive(Error, Debug)]
pub enum TokensimError {
    /// Structurally invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Categorical label not present in its weight table.
    #[error("Unknown {dimension} label: {label:?}")]
    UnknownLabel {
        dimension: &'static str,
        label: String,
    },

    /// Division by zero error.
    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    /// Value outside its valid domain (e.g. negative where only
    /// non-negative is allowed).
    #[error("Out of domain: {message}")]
    OutOfDomain { message: String },
}

impl TokensimError {
    /// Create an invalid config error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an unknown label error.
    pub fn unknown_label(dimension: &'static str, label: impl Into<String>) -> Self {
        Self::UnknownLabel {
            dimension,
            label: label.into(),
        }
    }

    /// Create a division by zero error.
    pub fn division_by_zero(context: impl Into<String>) -> Self {
        Self::DivisionByZero {
            context: context.into(),
        }
    }

    /// Create an out of domain error.
    pub fn out_of_domain(message: impl Into<String>) -> Self {
        Self::OutOfDomain {
            message: message.into(),
        }
    }
}

impl From<TokensimError> for pyo3::PyErr {
    fn from(err: TokensimError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
