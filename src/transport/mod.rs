//! # Printer Transport Layer
//!
//! This module provides communication backends for sending data to printers.
//!
//! ## Available Transports
//!
//! - [`serial`]: Raw serial tty (RS-232 or USB-serial adapters)
//! - [`memory`]: In-memory recorder for tests and dry runs
//!
//! A session only needs four primitives from a backend, captured by the
//! [`Transport`] trait. Opening must fail with
//! [`LinePrinterError::TransportUnavailable`] so callers can tell a bad port
//! apart from a write fault.

pub mod memory;
pub mod serial;

pub use memory::MemoryTransport;
pub use serial::SerialTransport;

use crate::error::LinePrinterError;

/// A connection to a printer that can be opened, closed and written to.
pub trait Transport {
    /// Open the connection. Opening an already open transport is a no-op.
    fn open(&mut self) -> Result<(), LinePrinterError>;

    /// Close the connection. Closing a closed transport is a no-op.
    fn close(&mut self) -> Result<(), LinePrinterError>;

    fn is_open(&self) -> bool;

    /// Blocking write of the whole buffer.
    fn write(&mut self, bytes: &[u8]) -> Result<(), LinePrinterError>;

    /// Human-readable port name, used in error messages.
    fn port(&self) -> &str;
}
