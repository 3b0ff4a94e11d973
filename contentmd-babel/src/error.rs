//! Error types for format operations

use thiserror::Error;

/// Errors that can occur during format operations
///
/// The Markdown conversion itself never fails; these cover the edges around it: format
/// lookup, option parsing and the structured formats.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested direction
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// An option value could not be understood
    #[error("Invalid value '{value}' for option '{option}'")]
    InvalidOption { option: String, value: String },
}

impl FormatError {
    pub fn invalid_option(option: impl Into<String>, value: impl Into<String>) -> Self {
        FormatError::InvalidOption {
            option: option.into(),
            value: value.into(),
        }
    }
}
