//! # ESC/POS Protocol Implementation
//!
//! This module provides the low-level byte sequences understood by serial
//! thermal receipt printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Parameterless commands (init, line feed, cut, rotate, flip)
//! - [`modes`]: Size and justification mode tables
//!
//! ## Usage Example
//!
//! ```
//! use lineprinter::protocol::{commands, modes};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(modes::lookup(modes::ModeFamily::Justify, modes::JUSTIFY_CENTER)?.signal);
//! data.extend(b"RECEIPT");
//! data.extend(commands::line_feed());
//! data.extend(commands::cut());
//! # Ok::<(), lineprinter::LinePrinterError>(())
//! ```

pub mod commands;
pub mod modes;
