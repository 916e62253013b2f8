//! # Printer Module
//!
//! This module provides the printer session and its configuration.
//!
//! ## Modules
//!
//! - [`config`]: Connection settings and port discovery
//! - [`format`]: Toggle-mode stack and indented debug echo
//! - [`session`]: The [`LinePrinter`] session

pub mod config;
pub mod format;
pub mod session;

pub use config::PrinterConfig;
pub use format::{FormatStack, PopOutcome};
pub use session::{LinePrinter, Toggle};
