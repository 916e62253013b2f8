//! # In-Memory Transport
//!
//! Records every write instead of sending it anywhere. The CLI uses it for
//! `--dry-run` and the tests use it to assert on the exact byte stream.

use super::Transport;
use crate::error::LinePrinterError;

/// Transport that keeps written signals in memory.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    port: String,
    open: bool,
    refuse_open: bool,
    writes: Vec<Vec<u8>>,
    opens: usize,
    closes: usize,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::named("memory")
    }

    pub fn named(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            ..Default::default()
        }
    }

    /// A transport whose `open` always fails, like a missing device node.
    pub fn unavailable(port: impl Into<String>) -> Self {
        Self {
            refuse_open: true,
            ..Self::named(port)
        }
    }

    /// Each `write` call, in order.
    pub fn writes(&self) -> &[Vec<u8>] {
        &self.writes
    }

    /// All written bytes concatenated.
    pub fn bytes(&self) -> Vec<u8> {
        self.writes.concat()
    }

    /// Drain the recorded writes.
    pub fn take_writes(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.writes)
    }

    pub fn open_count(&self) -> usize {
        self.opens
    }

    pub fn close_count(&self) -> usize {
        self.closes
    }
}

impl Transport for MemoryTransport {
    fn open(&mut self) -> Result<(), LinePrinterError> {
        if self.refuse_open {
            return Err(LinePrinterError::unavailable(&self.port, "device refused to open"));
        }
        if !self.open {
            self.open = true;
            self.opens += 1;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), LinePrinterError> {
        if self.open {
            self.open = false;
            self.closes += 1;
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), LinePrinterError> {
        if !self.open {
            return Err(LinePrinterError::unavailable(&self.port, "write on closed port"));
        }
        self.writes.push(bytes.to_vec());
        Ok(())
    }

    fn port(&self) -> &str {
        &self.port
    }
}
