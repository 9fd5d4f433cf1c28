use thiserror::Error;

/// Error type for the amath crate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Error while parsing an expression
    #[error("ParseError: {0}")]
    ParseError(String),
    /// Unknown variable during evaluation
    #[error("NameError: {0}")]
    NameError(String),
    /// A raw input value rejected by strict parsing
    #[error("InvalidInput: {field} = '{value}' is not a valid {expected}")]
    InvalidInput {
        /// Name of the offending field
        field: &'static str,
        /// The raw value as supplied
        value: String,
        /// What the field should have contained
        expected: &'static str,
    },
    /// A sequence request above the configured term limit
    #[error("TooManyTerms: {requested} terms requested, the limit is {limit}")]
    TooManyTerms {
        /// Requested number of terms
        requested: usize,
        /// Configured maximum
        limit: usize,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
