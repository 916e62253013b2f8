//! # Format Stack and Debug Echo
//!
//! Toggle modes (rotation, upside-down) can overlap and nest. The printer
//! itself has no notion of nesting, so the session keeps a record of open
//! toggles purely to render a readable, indented echo of what was sent:
//!
//! ```text
//! <flip>
//!   <rotate-clockwise>
//!     rotated&flipped
//!   </rotate-clockwise>
//! </flip>
//! ```
//!
//! Closing a toggle out of order, or closing one that was never opened, is
//! not an error. It is reported in the echo and as a [`PopOutcome`].

use std::io::{self, Write};

/// Indentation unit for one nesting level.
pub const TAB: &str = "  ";

/// Echo line written when more modes are closed than were opened.
pub const DEDENT_WARNING: &str = "WARNING: More modes ended than started.";

/// Indented, optionally silent writer for the human-readable echo.
///
/// Indentation is tracked whether or not echo is enabled, so switching echo
/// on mid-session shows the correct nesting from then on.
#[derive(Debug)]
pub struct Echo<W: Write> {
    sink: W,
    enabled: bool,
    depth: usize,
}

impl<W: Write> Echo<W> {
    pub fn new(sink: W, enabled: bool) -> Self {
        Self {
            sink,
            enabled,
            depth: 0,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Write one line at the current depth.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        if self.enabled {
            writeln!(self.sink, "{}{}", TAB.repeat(self.depth), text)?;
        }
        Ok(())
    }

    /// Write an opening line, then indent what follows.
    pub fn open(&mut self, text: &str) -> io::Result<()> {
        self.line(text)?;
        self.indent();
        Ok(())
    }

    /// Dedent, then write a closing line.
    pub fn close(&mut self, text: &str) -> io::Result<()> {
        self.dedent()?;
        self.line(text)
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decrease depth by one level, clamping at zero with a warning line.
    pub fn dedent(&mut self) -> io::Result<()> {
        if self.depth == 0 {
            return self.line(DEDENT_WARNING);
        }
        self.depth -= 1;
        Ok(())
    }

    /// Back to column zero.
    pub fn reset(&mut self) {
        self.depth = 0;
    }
}

/// What a [`FormatStack::pop`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopOutcome {
    /// The mode was the most recently opened one and was closed.
    Closed,
    /// The mode was not active; nothing changed.
    AlreadyInactive,
    /// The mode was active below other modes. It was removed from
    /// `position`, and `remaining` are the modes still open.
    OutOfOrder {
        position: usize,
        remaining: Vec<String>,
    },
}

/// Ordered record of open toggle modes, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatStack {
    formats: Vec<String>,
}

impl FormatStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &[String] {
        &self.formats
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.formats.iter().any(|f| f == name)
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Open `name`: echo `<name>` at the current depth, then indent.
    ///
    /// Duplicates are not filtered here; the caller decides whether pushing
    /// an already-open mode makes sense.
    pub fn push<W: Write>(&mut self, name: &str, echo: &mut Echo<W>) -> io::Result<()> {
        self.formats.push(name.to_string());
        echo.open(&format!("<{}>", name))
    }

    /// Close `name`, tolerating closes that are redundant or out of order.
    pub fn pop<W: Write>(&mut self, name: &str, echo: &mut Echo<W>) -> io::Result<PopOutcome> {
        let Some(position) = self.formats.iter().position(|f| f == name) else {
            echo.line(&format!("<!--already not formatted: {}-->", name))?;
            return Ok(PopOutcome::AlreadyInactive);
        };

        self.formats.remove(position);
        echo.close(&format!("</{}>", name))?;

        if position == self.formats.len() {
            return Ok(PopOutcome::Closed);
        }

        echo.line(&format!(
            "<!--still formatted in: {:?} after removing format [{}]-->",
            self.formats, position
        ))?;
        Ok(PopOutcome::OutOfOrder {
            position,
            remaining: self.formats.clone(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
