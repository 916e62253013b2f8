//! # Printer Session
//!
//! A [`LinePrinter`] owns one transport and all of the state needed to
//! describe what the printer is currently doing:
//!
//! - the active size and justification modes (one slot each, because a new
//!   value replaces the old one on the printer)
//! - the [`FormatStack`] of open toggle modes (rotation, upside-down)
//! - the echo writer and its indentation depth
//!
//! Nothing is shared between sessions. Calls must be serialized by the
//! caller; a session is not meant to be used from several threads.
//!
//! ## Example
//!
//! ```no_run
//! use lineprinter::{LinePrinter, PrinterConfig};
//! use lineprinter::protocol::modes::SIZE_DOUBLE;
//!
//! let mut printer = LinePrinter::connect(PrinterConfig {
//!     port: Some("/dev/ttyUSB0".to_string()),
//!     echo: true,
//!     ..PrinterConfig::default()
//! })?;
//! printer.justify_center()?;
//! printer.set_size(SIZE_DOUBLE)?;
//! printer.write_line("big")?;
//! printer.end()?;
//! # Ok::<(), lineprinter::LinePrinterError>(())
//! ```

use std::io::{self, Stdout, Write};
use std::str::FromStr;

use log::error;

use super::config::PrinterConfig;
use super::format::{Echo, FormatStack, PopOutcome};
use crate::error::LinePrinterError;
use crate::protocol::commands;
use crate::protocol::modes::{
    JUSTIFY_CENTER, JUSTIFY_LEFT, JUSTIFY_RIGHT, ModeFamily, lookup,
};
use crate::transport::{SerialTransport, Transport};

pub const ROTATE_CLOCKWISE: &str = "rotate-clockwise";
pub const FLIP: &str = "flip";

// ============================================================================
// TOGGLE ARGUMENT
// ============================================================================

/// On/off argument for toggle modes.
///
/// Only `true`/`1` and `false`/`0` are accepted. Any other integer is
/// rejected when the toggle is applied rather than treated as truthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Bool(bool),
    Int(i64),
}

impl Toggle {
    /// ## Errors
    ///
    /// [`LinePrinterError::InvalidArgument`] for integers other than 0 and 1.
    pub fn to_bool(self) -> Result<bool, LinePrinterError> {
        match self {
            Self::Bool(on) => Ok(on),
            Self::Int(1) => Ok(true),
            Self::Int(0) => Ok(false),
            Self::Int(other) => Err(LinePrinterError::InvalidArgument(format!(
                "The value should be true/1/false/0 but is {}",
                other
            ))),
        }
    }
}

impl From<bool> for Toggle {
    fn from(on: bool) -> Self {
        Self::Bool(on)
    }
}

impl From<i32> for Toggle {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<i64> for Toggle {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<u8> for Toggle {
    fn from(n: u8) -> Self {
        Self::Int(n.into())
    }
}

impl FromStr for Toggle {
    type Err = LinePrinterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(Self::Bool(true)),
            "false" => Ok(Self::Bool(false)),
            other => other.parse::<i64>().map(Self::Int).map_err(|_| {
                LinePrinterError::InvalidArgument(format!(
                    "The value should be true/1/false/0 but is \"{}\"",
                    other
                ))
            }),
        }
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// # Line Printer Session
///
/// Every method that writes first makes sure the transport is open,
/// reopening it if it was closed with [`close`](Self::close). After
/// [`end`](Self::end) the session refuses to reopen until
/// [`reopen`](Self::reopen) is called.
#[derive(Debug)]
pub struct LinePrinter<T: Transport = SerialTransport, W: Write = Stdout> {
    transport: T,
    config: PrinterConfig,
    echo: Echo<W>,
    formats: FormatStack,
    in_size: Option<&'static str>,
    in_just: Option<&'static str>,
    ended: bool,
}

impl LinePrinter {
    /// Open the configured serial port, echoing to stdout.
    ///
    /// ## Errors
    ///
    /// [`LinePrinterError::TransportUnavailable`] if the port can't be
    /// opened. Guidance on finding the right port is logged first.
    pub fn connect(config: PrinterConfig) -> Result<Self, LinePrinterError> {
        let transport = SerialTransport::new(config.resolved_port(), config.baud)?;
        Self::with_transport(transport, config, io::stdout())
    }
}

impl<T: Transport, W: Write> LinePrinter<T, W> {
    /// Start a session on any transport and echo sink. The transport is
    /// opened and the printer reset.
    pub fn with_transport(
        mut transport: T,
        config: PrinterConfig,
        sink: W,
    ) -> Result<Self, LinePrinterError> {
        open_with_guidance(&mut transport)?;
        let echo = Echo::new(sink, config.echo);
        let mut printer = Self {
            transport,
            config,
            echo,
            formats: FormatStack::new(),
            in_size: None,
            in_just: None,
            ended: false,
        };
        printer.reset()?;
        Ok(printer)
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn echo_sink(&self) -> &W {
        self.echo.sink()
    }

    pub fn echo_enabled(&self) -> bool {
        self.echo.enabled()
    }

    /// Turn the echo on or off. Nesting is tracked either way.
    pub fn set_echo(&mut self, enabled: bool) {
        self.echo.set_enabled(enabled);
    }

    pub fn indent_depth(&self) -> usize {
        self.echo.depth()
    }

    /// Name of the active size mode, `None` at normal size.
    pub fn active_size(&self) -> Option<&'static str> {
        self.in_size
    }

    /// Name of the active justification, `None` when left-justified.
    pub fn active_justify(&self) -> Option<&'static str> {
        self.in_just
    }

    /// Open toggle modes, oldest first.
    pub fn active_formats(&self) -> &[String] {
        self.formats.active()
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    // ------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------

    fn ensure_open(&mut self) -> Result<(), LinePrinterError> {
        if self.ended {
            return Err(LinePrinterError::unavailable(
                self.transport.port(),
                "session ended; call reopen() first",
            ));
        }
        if !self.transport.is_open() {
            open_with_guidance(&mut self.transport)?;
        }
        Ok(())
    }

    fn send(&mut self, signal: &[u8]) -> Result<(), LinePrinterError> {
        self.transport.write(signal)
    }

    /// Close the transport if it is open. Later writes reopen it.
    pub fn close(&mut self) -> Result<(), LinePrinterError> {
        if self.transport.is_open() {
            self.transport.close()?;
        }
        Ok(())
    }

    /// Re-establish the connection after [`end`](Self::end) and reset the
    /// printer.
    pub fn reopen(&mut self) -> Result<(), LinePrinterError> {
        self.ended = false;
        self.ensure_open()?;
        self.reset()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Hardware reset (`ESC @`).
    ///
    /// Only the echo indentation is cleared here. The active size, justify
    /// and toggle records are kept as they were.
    pub fn reset(&mut self) -> Result<(), LinePrinterError> {
        self.ensure_open()?;
        self.echo.reset();
        self.send(&commands::init())
    }

    pub fn line_feed(&mut self) -> Result<(), LinePrinterError> {
        self.ensure_open()?;
        self.echo.line("")?;
        self.send(&commands::line_feed())
    }

    /// Print `text` and feed one line.
    pub fn write_line(&mut self, text: &str) -> Result<(), LinePrinterError> {
        self.ensure_open()?;
        self.echo.line(text)?;
        self.send(text.as_bytes())?;
        self.line_feed()
    }

    pub fn write_lines<I, S>(&mut self, lines: I) -> Result<(), LinePrinterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.write_line(line.as_ref())?;
        }
        Ok(())
    }

    /// Print `text` padded with spaces to the configured width.
    ///
    /// This pads in software and does not touch the justification mode.
    pub fn write_centered(&mut self, text: &str) -> Result<(), LinePrinterError> {
        self.ensure_open()?;
        let padded = center(text, self.config.width);
        self.echo.line(&format!("<center>{}</center>", padded))?;
        self.send(padded.as_bytes())?;
        self.send(&commands::line_feed())
    }

    /// Feed `pre_cut_feed_count` blank lines, then cut.
    pub fn cut(&mut self) -> Result<(), LinePrinterError> {
        self.ensure_open()?;
        self.echo.line("<cut/>")?;
        for _ in 0..self.config.pre_cut_feed_count {
            self.line_feed()?;
        }
        self.send(&commands::cut())
    }

    /// Cut the paper and close the connection.
    pub fn end(&mut self) -> Result<(), LinePrinterError> {
        self.ensure_open()?;
        self.echo.reset();
        self.cut()?;
        self.close()?;
        self.ended = true;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Toggle modes
    // ------------------------------------------------------------------

    /// Rotate subsequent text 90° clockwise, or stop rotating.
    ///
    /// Returns how the close went when turning off, `None` when turning on.
    pub fn rotate_clockwise(
        &mut self,
        on: impl Into<Toggle>,
    ) -> Result<Option<PopOutcome>, LinePrinterError> {
        let on = on.into().to_bool()?;
        let signal = if on {
            commands::rotate_clockwise_on()
        } else {
            commands::rotate_clockwise_off()
        };
        self.toggle(ROTATE_CLOCKWISE, on, &signal)
    }

    /// Print upside down, or right side up again.
    pub fn flip(&mut self, on: impl Into<Toggle>) -> Result<Option<PopOutcome>, LinePrinterError> {
        let on = on.into().to_bool()?;
        let signal = if on { commands::flip_on() } else { commands::flip_off() };
        self.toggle(FLIP, on, &signal)
    }

    fn toggle(
        &mut self,
        name: &str,
        on: bool,
        signal: &[u8],
    ) -> Result<Option<PopOutcome>, LinePrinterError> {
        // The signal goes out first so the stack follows the hardware even
        // when the echo sink fails.
        self.ensure_open()?;
        self.send(signal)?;
        if on {
            self.formats.push(name, &mut self.echo)?;
            Ok(None)
        } else {
            Ok(Some(self.formats.pop(name, &mut self.echo)?))
        }
    }

    // ------------------------------------------------------------------
    // Mutually exclusive modes
    // ------------------------------------------------------------------

    /// Select a character size by code (see [`crate::protocol::modes`]).
    ///
    /// ## Errors
    ///
    /// [`LinePrinterError::UnknownModeCode`] for codes not in the table;
    /// nothing is written in that case.
    pub fn set_size(&mut self, code: u8) -> Result<(), LinePrinterError> {
        self.set_mode(ModeFamily::Size, code)
    }

    /// Select a justification by code.
    pub fn set_justify(&mut self, code: u8) -> Result<(), LinePrinterError> {
        self.set_mode(ModeFamily::Justify, code)
    }

    pub fn justify_left(&mut self) -> Result<(), LinePrinterError> {
        self.set_justify(JUSTIFY_LEFT)
    }

    pub fn justify_center(&mut self) -> Result<(), LinePrinterError> {
        self.set_justify(JUSTIFY_CENTER)
    }

    pub fn justify_right(&mut self) -> Result<(), LinePrinterError> {
        self.set_justify(JUSTIFY_RIGHT)
    }

    fn set_mode(&mut self, family: ModeFamily, code: u8) -> Result<(), LinePrinterError> {
        let entry = lookup(family, code)?;
        self.ensure_open()?;
        self.send(&entry.signal)?;

        let slot = match family {
            ModeFamily::Size => &mut self.in_size,
            ModeFamily::Justify => &mut self.in_just,
        };
        let previous = slot.take();
        let opened = (code != family.baseline()).then_some(entry.name);
        *slot = opened;

        if let Some(previous) = previous {
            self.echo.close(&format!("</{}>", previous))?;
        }
        if let Some(name) = opened {
            self.echo.open(&format!("<{}>", name))?;
        }
        Ok(())
    }
}

/// Open a transport, logging how to find the right port if it fails.
fn open_with_guidance<T: Transport>(transport: &mut T) -> Result<(), LinePrinterError> {
    transport.open().inspect_err(|e| {
        if e.is_transport_unavailable() {
            error!("{}", e);
            error!("You can get the proper port via:");
            error!("  sudo dmesg | grep tty");
            error!(
                "For example, \"[1537133.727889] usb 2-1: pl2303 converter now attached to ttyUSB0\""
            );
            error!("shows that /dev/ttyUSB0 is the correct port.");
        }
    })
}

/// Center `text` in a field of `width` characters.
///
/// When the padding can't be split evenly the extra space goes on the left
/// only if both the padding and the width are odd, so output lines up with
/// other receipt tools. Text at least `width` long is returned unchanged.
///
/// ```
/// use lineprinter::printer::session::center;
///
/// assert_eq!(center("hi", 6), "  hi  ");
/// assert_eq!(center("abc", 6), " abc  ");
/// assert_eq!(center("toolong", 4), "toolong");
/// ```
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    let right = margin - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

// ============================================================================
// TESTS
// ============================================================================
