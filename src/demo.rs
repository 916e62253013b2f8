//! # Demo Sequences
//!
//! Print jobs that exercise every mode the printer supports. Run one with
//! echo enabled and compare the paper against the echo to check that the
//! printer honors each command.

use std::io::Write;

use crate::error::LinePrinterError;
use crate::printer::LinePrinter;
use crate::protocol::modes::{
    SIZE_DOUBLE, SIZE_NORMAL, SIZE_TALL, SIZE_TALLER, SIZE_TRIPLE, SIZE_WIDE, SIZE_WIDER,
};
use crate::transport::Transport;

/// Demo names accepted by [`run`].
pub fn list_demos() -> &'static [&'static str] {
    &["modes", "nesting"]
}

pub fn is_demo(name: &str) -> bool {
    list_demos().contains(&name)
}

/// Run a demo by name. Returns `Ok(false)` for unknown names.
pub fn run<T: Transport, W: Write>(
    name: &str,
    printer: &mut LinePrinter<T, W>,
) -> Result<bool, LinePrinterError> {
    match name {
        "modes" => mode_showcase(printer)?,
        "nesting" => nesting_showcase(printer)?,
        _ => return Ok(false),
    }
    Ok(true)
}

/// One line in each size, justification and toggle mode, ending with
/// rotation and upside-down combined.
pub fn mode_showcase<T: Transport, W: Write>(
    printer: &mut LinePrinter<T, W>,
) -> Result<(), LinePrinterError> {
    printer.justify_center()?;
    printer.set_size(SIZE_DOUBLE)?;
    printer.write_line("big")?;
    printer.set_size(SIZE_TRIPLE)?;
    printer.justify_right()?;
    printer.write_line("bigger")?;
    printer.justify_left()?;

    for (code, label) in [
        (SIZE_TALL, "tall"),
        (SIZE_TALLER, "taller"),
        (SIZE_WIDE, "wide"),
        (SIZE_WIDER, "wider"),
    ] {
        printer.set_size(code)?;
        printer.write_line(label)?;
    }
    printer.set_size(SIZE_NORMAL)?;

    printer.flip(true)?;
    printer.write_line("flipped")?;
    printer.flip(false)?;

    printer.rotate_clockwise(true)?;
    printer.write_line("rotated")?;
    printer.rotate_clockwise(false)?;

    printer.justify_left()?;
    printer.set_size(SIZE_NORMAL)?;
    printer.write_line("normal")?;

    printer.flip(true)?;
    printer.rotate_clockwise(true)?;
    printer.write_line("rotated&flipped")?;
    printer.rotate_clockwise(false)?;
    printer.flip(false)?;
    Ok(())
}

/// Overlapping toggles closed in the wrong order, plus a redundant close.
/// The echo annotates both.
pub fn nesting_showcase<T: Transport, W: Write>(
    printer: &mut LinePrinter<T, W>,
) -> Result<(), LinePrinterError> {
    printer.write_centered("nesting")?;
    printer.flip(true)?;
    printer.rotate_clockwise(true)?;
    printer.write_line("rotated&flipped")?;
    printer.flip(false)?;
    printer.write_line("rotated")?;
    printer.rotate_clockwise(false)?;
    printer.flip(false)?;
    printer.write_line("normal")?;
    Ok(())
}
