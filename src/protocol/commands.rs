//! # ESC/POS Control Commands
//!
//! This module implements the fixed control sequences used to drive serial
//! thermal receipt printers (Posiflex Aura PP7000-II and compatibles).
//!
//! ## Escape Sequence Structure
//!
//! Commands are short byte sequences introduced by a prefix byte:
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - Three bytes with a parameter: `ESC a n`, `GS ! n`, `GS V n`
//!
//! Size and justification commands are parameterized and live in the mode
//! tables of [`super::modes`]. The commands here take no parameters.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for character size (`GS !`) and the cutter (`GS V`).
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## Example
///
/// ```
/// use lineprinter::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// PAPER CONTROL COMMANDS
// ============================================================================

/// # Line Feed (LF)
///
/// Prints the line buffer and advances the paper by one line.
#[inline]
pub fn line_feed() -> Vec<u8> {
    vec![LF]
}

/// # Full Cut (GS V 0)
///
/// Cuts the paper at the current position without feeding first, so the
/// caller is responsible for feeding enough blank lines to move printed
/// content past the blade.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 0   |
/// | Hex     | 1D 56 00 |
/// | Decimal | 29 86 0  |
#[inline]
pub fn cut() -> Vec<u8> {
    vec![GS, b'V', 0]
}

// ============================================================================
// TOGGLE MODES
// ============================================================================

/// # Rotate 90° Clockwise On (ESC V I)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | Hex     | 1B 56 49 |
///
/// The parameter byte is ASCII `I` (0x49), which the printer reads as odd
/// and therefore "on".
#[inline]
pub fn rotate_clockwise_on() -> Vec<u8> {
    vec![ESC, b'V', b'I']
}

/// # Rotate 90° Clockwise Off (ESC V H)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | Hex     | 1B 56 48 |
#[inline]
pub fn rotate_clockwise_off() -> Vec<u8> {
    vec![ESC, b'V', b'H']
}

/// # Upside Down On (ESC { 1)
///
/// Prints subsequent lines rotated 180°.
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | Hex     | 1B 7B 01 |
#[inline]
pub fn flip_on() -> Vec<u8> {
    vec![ESC, b'{', 1]
}

/// # Upside Down Off (ESC { 2)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | Hex     | 1B 7B 02 |
#[inline]
pub fn flip_off() -> Vec<u8> {
    vec![ESC, b'{', 2]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Format bytes as space-separated uppercase hex, e.g. `1D 56 00`.
///
/// Used for debug logging and the CLI dry-run dump.
pub fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// TESTS
// ============================================================================
