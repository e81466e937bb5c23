//! # Error Types
//!
//! This module defines error types used throughout the tillroll library.
//!
//! Every variant that can surface from a print job carries the operation
//! name, plus the device or item key it concerns, so a log line alone is
//! enough to tell which job failed.

use thiserror::Error;

/// Main error type for tillroll operations
#[derive(Debug, Error)]
pub enum PrintError {
    /// Missing or invalid printer profile, site, or paper width.
    ///
    /// Fatal: the session does not become initialized.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A composition entry point was called before `initialize`.
    #[error("Printer session not initialized (operation: {operation})")]
    NotInitialized { operation: &'static str },

    /// One label or list item could not be composed.
    ///
    /// Batch operations record this and move on to the next item.
    #[error("Failed to render {key} during {operation}: {reason}")]
    ItemRender {
        operation: &'static str,
        key: String,
        reason: String,
    },

    /// The transport refused or failed to deliver the bytes.
    #[error("Transport error on {device} during {operation}: {reason}")]
    Transport {
        operation: &'static str,
        device: String,
        reason: String,
    },

    /// Image processing error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PrintError {
    /// Build an [`PrintError::ItemRender`] for the given operation and item key.
    pub fn item(operation: &'static str, key: impl Into<String>, reason: impl ToString) -> Self {
        Self::ItemRender {
            operation,
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for tillroll operations
pub type PrintResult<T> = Result<T, PrintError>;
