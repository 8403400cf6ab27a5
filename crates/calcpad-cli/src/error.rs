//! Error types for the CLI

use calcpad::core::CalcError;
use calcpad::script::ScriptError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Script could not be loaded
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Calculator rejected the input
    #[error("Calculator error: {0}")]
    Calc(#[from] CalcError),

    /// Script ran but some steps did not match
    #[error("Script '{name}' failed: {failed} step(s) did not match")]
    ScriptFailed {
        /// Script name
        name: String,
        /// Number of failed steps
        failed: usize,
    },
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a script failure error
    #[must_use]
    pub fn script_failed(name: impl Into<String>, failed: usize) -> Self {
        Self::ScriptFailed {
            name: name.into(),
            failed,
        }
    }
}
