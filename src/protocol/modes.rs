//! # Mode Tables
//!
//! Character size and justification are mutually exclusive modes: only one
//! value per family is active at a time. Each family is a fixed table
//! mapping a numeric mode code to a display name and the control signal
//! that selects it.
//!
//! ## Size Codes
//!
//! The codes are protocol constants, not a dense enum. The tens digit is the
//! width multiplier minus one and the units digit is the height multiplier
//! minus one, mirroring the `GS ! n` nibble layout.
//!
//! | Code | Name   | Bytes    |
//! |------|--------|----------|
//! | 0    | normal | 1D 21 00 |
//! | 1    | tall   | 1D 21 01 |
//! | 2    | taller | 1D 21 02 |
//! | 10   | wide   | 1D 21 10 |
//! | 20   | wider  | 1D 21 20 |
//! | 11   | big    | 1D 21 11 |
//! | 22   | bigger | 1D 21 22 |
//!
//! ## Justification Codes
//!
//! | Code | Name   | Bytes    |
//! |------|--------|----------|
//! | 0    | left   | 1B 61 00 |
//! | 1    | center | 1B 61 01 |
//! | 2    | right  | 1B 61 02 |

use std::fmt;

use super::commands::{ESC, GS};
use crate::error::LinePrinterError;

pub const SIZE_NORMAL: u8 = 0;
pub const SIZE_TALL: u8 = 1;
pub const SIZE_TALLER: u8 = 2;
pub const SIZE_WIDE: u8 = 10;
pub const SIZE_WIDER: u8 = 20;
pub const SIZE_DOUBLE: u8 = 11;
pub const SIZE_TRIPLE: u8 = 22;

pub const JUSTIFY_LEFT: u8 = 0;
pub const JUSTIFY_CENTER: u8 = 1;
pub const JUSTIFY_RIGHT: u8 = 2;

/// One row of a mode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTableEntry {
    /// Numeric code callers select the mode with
    pub code: u8,
    /// Name used in the debug echo (`<big>`, `</center>`)
    pub name: &'static str,
    /// Raw control sequence written to the printer
    pub signal: [u8; 3],
}

impl ModeTableEntry {
    const fn new(code: u8, name: &'static str, signal: [u8; 3]) -> Self {
        Self { code, name, signal }
    }
}

/// Character size modes (`GS ! n`)
pub static SIZE_MODES: [ModeTableEntry; 7] = [
    ModeTableEntry::new(SIZE_NORMAL, "normal", [GS, b'!', 0x00]),
    ModeTableEntry::new(SIZE_TALL, "tall", [GS, b'!', 0x01]),
    ModeTableEntry::new(SIZE_TALLER, "taller", [GS, b'!', 0x02]),
    ModeTableEntry::new(SIZE_WIDE, "wide", [GS, b'!', 0x10]),
    ModeTableEntry::new(SIZE_WIDER, "wider", [GS, b'!', 0x20]),
    ModeTableEntry::new(SIZE_DOUBLE, "big", [GS, b'!', 0x11]),
    ModeTableEntry::new(SIZE_TRIPLE, "bigger", [GS, b'!', 0x22]),
];

/// Justification modes (`ESC a n`)
pub static JUSTIFY_MODES: [ModeTableEntry; 3] = [
    ModeTableEntry::new(JUSTIFY_LEFT, "left", [ESC, b'a', 0x00]),
    ModeTableEntry::new(JUSTIFY_CENTER, "center", [ESC, b'a', 0x01]),
    ModeTableEntry::new(JUSTIFY_RIGHT, "right", [ESC, b'a', 0x02]),
];

/// The two mutually exclusive mode families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFamily {
    Size,
    Justify,
}

impl ModeFamily {
    /// The family's mode table.
    pub fn table(self) -> &'static [ModeTableEntry] {
        match self {
            Self::Size => &SIZE_MODES,
            Self::Justify => &JUSTIFY_MODES,
        }
    }

    /// The identity code of the family. Selecting it ends the active mode
    /// without opening a new one.
    pub fn baseline(self) -> u8 {
        match self {
            Self::Size => SIZE_NORMAL,
            Self::Justify => JUSTIFY_LEFT,
        }
    }
}

impl fmt::Display for ModeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Size => write!(f, "size"),
            Self::Justify => write!(f, "justify"),
        }
    }
}

/// Look up a mode by code.
///
/// ## Example
///
/// ```
/// use lineprinter::protocol::modes::{lookup, ModeFamily, SIZE_DOUBLE};
///
/// let entry = lookup(ModeFamily::Size, SIZE_DOUBLE)?;
/// assert_eq!(entry.name, "big");
/// assert_eq!(entry.signal, [0x1D, 0x21, 0x11]);
/// # Ok::<(), lineprinter::LinePrinterError>(())
/// ```
///
/// ## Errors
///
/// Returns [`LinePrinterError::UnknownModeCode`] when no entry has `code`.
pub fn lookup(family: ModeFamily, code: u8) -> Result<&'static ModeTableEntry, LinePrinterError> {
    family
        .table()
        .iter()
        .find(|entry| entry.code == code)
        .ok_or(LinePrinterError::UnknownModeCode { family, code })
}

// ============================================================================
// TESTS
// ============================================================================
