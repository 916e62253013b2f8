//! # Error Types
//!
//! This module defines error types used throughout the lineprinter library.

use thiserror::Error;

use crate::protocol::modes::ModeFamily;

/// Main error type for lineprinter operations
#[derive(Debug, Error)]
pub enum LinePrinterError {
    /// The printer port could not be opened, or the session was ended
    #[error("Transport unavailable on {port}: {reason}")]
    TransportUnavailable { port: String, reason: String },

    /// A size or justification code that is not in its mode table
    #[error("Unknown {family} mode code: {code}")]
    UnknownModeCode { family: ModeFamily, code: u8 },

    /// Invalid parameter (toggle value, baud rate, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LinePrinterError {
    /// Shorthand for a [`LinePrinterError::TransportUnavailable`].
    pub fn unavailable(port: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TransportUnavailable {
            port: port.into(),
            reason: reason.into(),
        }
    }

    /// Whether this is a port open failure (as opposed to a protocol error).
    pub fn is_transport_unavailable(&self) -> bool {
        matches!(self, Self::TransportUnavailable { .. })
    }
}
