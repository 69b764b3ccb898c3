use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for Gauge project filesystem operations.
#[derive(Debug, Error, Diagnostic)]
pub enum GaugeError {
    /// A project root, directory or file could not be found.
    #[error("{message}")]
    #[diagnostic(help("Check that the path lies inside a Gauge project (a directory containing manifest.json)"))]
    NotFound { message: String },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Layout configuration could not be parsed.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl GaugeError {
    pub fn not_found(message: impl Into<String>) -> Self {
        GaugeError::NotFound {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GaugeError::NotFound { .. })
    }
}

/// Convenience alias for results carrying a [`GaugeError`].
pub type GaugeResult<T> = std::result::Result<T, GaugeError>;
