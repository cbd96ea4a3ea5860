//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Network connection error
    #[error("Connection failed: {0}")]
    Connection(String),

    /// IO error during printing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Printer is offline or unreachable
    #[error("Printer offline: {0}")]
    Offline(String),

    /// Timeout waiting for printer
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Bitmap rendering failed (font load, layout or rasterization)
    #[error("Render failed: {0}")]
    Render(String),

    /// OS print spooler error
    #[error("Spooler error: {0}")]
    Spooler(String),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
