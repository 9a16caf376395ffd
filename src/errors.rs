/*!
 * Error types for the locqa application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when reading or writing translation files
#[derive(Error, Debug)]
pub enum FormatError {
    /// The file content could not be parsed
    #[error("Failed to parse {format} content: {message}")]
    Parse {
        /// Name of the format being parsed
        format: &'static str,
        /// Underlying parser message
        message: String,
    },

    /// The file could not be serialized back to its format
    #[error("Failed to serialize {format} content: {message}")]
    Serialize {
        /// Name of the format being written
        format: &'static str,
        /// Underlying writer message
        message: String,
    },

    /// A required CSV column is absent from the header row
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// The file extension does not map to a supported format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// IO failure while reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormatError {
    pub(crate) fn parse(format: &'static str, message: impl ToString) -> Self {
        Self::Parse { format, message: message.to_string() }
    }

    pub(crate) fn serialize(format: &'static str, message: impl ToString) -> Self {
        Self::Serialize { format, message: message.to_string() }
    }
}

/// Errors that can occur when talking to translation engines
#[derive(Error, Debug, Clone)]
pub enum EngineError {
    /// Error when making an API request fails
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an engine response fails
    #[error("Failed to parse engine response: {0}")]
    ParseError(String),

    /// Error returned by the engine itself
    #[error("Engine responded with error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message from the engine
        message: String,
    },

    /// The engine returned an empty translation
    #[error("Engine returned an empty translation")]
    EmptyResponse,

    /// The engine is missing required configuration
    #[error("Engine not configured: {0}")]
    NotConfigured(String),

    /// Every engine in the chain failed for a request
    #[error("All engines failed: {}", .0.join("; "))]
    AllEnginesFailed(Vec<String>),
}

impl From<reqwest::Error> for EngineError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a file format
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Error from a translation engine
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
