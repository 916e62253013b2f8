//! # Lineprinter - Serial Thermal Receipt Printer Driver
//!
//! Lineprinter drives ESC/POS-style thermal receipt printers over a serial
//! connection. It provides:
//!
//! - **Protocol implementation**: Fixed control sequences and the size and
//!   justification mode tables
//! - **Session**: Text output interleaved with mode changes, with an
//!   indented echo of everything sent
//! - **Transport**: Raw serial tty, plus an in-memory recorder
//!
//! ## Quick Start
//!
//! ```no_run
//! use lineprinter::{LinePrinter, PrinterConfig};
//! use lineprinter::protocol::modes::SIZE_TRIPLE;
//!
//! let mut printer = LinePrinter::connect(PrinterConfig {
//!     port: Some("/dev/ttyUSB0".to_string()),
//!     echo: true,
//!     ..PrinterConfig::default()
//! })?;
//!
//! printer.set_size(SIZE_TRIPLE)?;
//! printer.write_centered("RECEIPT")?;
//! printer.flip(true)?;
//! printer.write_line("upside down")?;
//! printer.flip(false)?;
//!
//! // Feed, cut and close the port
//! printer.end()?;
//!
//! # Ok::<(), lineprinter::LinePrinterError>(())
//! ```
//!
//! With echo on, stdout shows:
//!
//! ```text
//! <bigger>
//!   <center>                 RECEIPT                  </center>
//!   <flip>
//!     upside down
//!   </flip>
//! <cut/>
//! ...
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | Control sequences and mode tables |
//! | [`printer`] | Session, format stack, configuration |
//! | [`transport`] | Communication backends |
//! | [`demo`] | Mode showcase print jobs |
//! | [`error`] | Error types |

pub mod demo;
pub mod error;
pub mod printer;
pub mod protocol;
pub mod transport;

// Re-exports for convenience
pub use error::LinePrinterError;
pub use printer::{LinePrinter, PopOutcome, PrinterConfig, Toggle};
pub use transport::{MemoryTransport, SerialTransport, Transport};
