//! # Printer Configuration
//!
//! Connection and layout settings for a serial receipt printer.
//!
//! ## Defaults
//!
//! | Field | Default | Notes |
//! |-------|---------|-------|
//! | `port` | guessed | `/dev/ttyUSB0`, or `COM7` on Windows |
//! | `baud` | 19200 | Posiflex Aura PP7000-II in serial mode |
//! | `width` | 42 | Characters per line, used for centering |
//! | `pre_cut_feed_count` | 6 | Blank lines fed before cutting |
//! | `echo` | false | Human-readable debug echo |
//!
//! A guessed port is a convenience for testing only: pointing a session at
//! the wrong serial device may send bytes to something that isn't a
//! printer. Set `port` explicitly in real deployments.
//!
//! ## Usage
//!
//! ```
//! use lineprinter::printer::PrinterConfig;
//!
//! let config = PrinterConfig {
//!     port: Some("/dev/ttyS0".to_string()),
//!     ..PrinterConfig::default()
//! };
//! assert_eq!(config.baud, 19200);
//! assert_eq!(config.resolved_port(), "/dev/ttyS0");
//! ```

use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::LinePrinterError;

/// Default baud rate.
///
/// This rate is only right for printers like the Posiflex Aura PP7000-II
/// when in serial mode. See the manual for your device.
pub const DEFAULT_BAUD: u32 = 19200;

pub const DEFAULT_WIDTH: usize = 42;

/// Lines to feed before cutting so the printed content clears the blade.
/// Cutting too close to the last line jams some mechanisms.
pub const DEFAULT_PRE_CUT_FEED_COUNT: usize = 6;

/// # Printer Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterConfig {
    /// Serial device, or `None` to guess per host OS
    pub port: Option<String>,

    pub baud: u32,

    /// Print width in characters
    pub width: usize,

    pub pre_cut_feed_count: usize,

    /// Mirror every command as an indented echo line
    pub echo: bool,
}

impl PrinterConfig {
    /// # Posiflex Aura PP7000-II (serial mode)
    ///
    /// 80mm receipt printer, 42 columns in the default font.
    pub const PP7000: Self = Self {
        port: None,
        baud: DEFAULT_BAUD,
        width: DEFAULT_WIDTH,
        pre_cut_feed_count: DEFAULT_PRE_CUT_FEED_COUNT,
        echo: false,
    };

    /// The configured port, or the host default with a warning.
    pub fn resolved_port(&self) -> String {
        match &self.port {
            Some(port) => port.clone(),
            None => {
                let port = default_port();
                warn!(
                    "Guessed port={}: set the port manually in a non-test scenario \
                     so it doesn't interrupt your 3D printer or something!",
                    port
                );
                port.to_string()
            }
        }
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    ///
    /// ```json
    /// { "port": "/dev/ttyUSB1", "width": 48, "echo": true }
    /// ```
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, LinePrinterError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            LinePrinterError::InvalidArgument(format!("{}: {}", path.display(), e))
        })?;
        debug!("loaded printer config from {}", path.display());
        Ok(config)
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::PP7000
    }
}

// ============================================================================
// PORT DISCOVERY
// ============================================================================

/// The port a USB-serial thermal printer most likely shows up as.
pub fn default_port() -> &'static str {
    if cfg!(windows) { "COM7" } else { "/dev/ttyUSB0" }
}

/// Likely serial device names on this host, most likely first.
pub fn candidate_ports() -> Vec<String> {
    if cfg!(windows) {
        let mut ports = vec!["COM7".to_string()];
        ports.extend((1..=9).filter(|n| *n != 7).map(|n| format!("COM{}", n)));
        ports
    } else if cfg!(target_os = "macos") {
        vec![
            "/dev/tty.usbserial".to_string(),
            "/dev/cu.usbserial".to_string(),
        ]
    } else {
        let mut ports: Vec<String> = (0..4).map(|n| format!("/dev/ttyUSB{}", n)).collect();
        ports.extend((0..2).map(|n| format!("/dev/ttyACM{}", n)));
        ports.extend((0..2).map(|n| format!("/dev/ttyS{}", n)));
        ports
    }
}

/// Try each candidate in order and return the first one that opens.
///
/// ## Example
///
/// ```
/// use lineprinter::printer::config::probe_ports;
/// use lineprinter::transport::{MemoryTransport, Transport};
///
/// let candidates = vec!["/dev/ttyUSB0".to_string(), "/dev/ttyUSB1".to_string()];
/// let (port, _transport) = probe_ports(&candidates, |port| {
///     let mut t = if port.ends_with('1') {
///         MemoryTransport::named(port)
///     } else {
///         MemoryTransport::unavailable(port)
///     };
///     t.open()?;
///     Ok(t)
/// })?;
/// assert_eq!(port, "/dev/ttyUSB1");
/// # Ok::<(), lineprinter::LinePrinterError>(())
/// ```
///
/// ## Errors
///
/// Returns [`LinePrinterError::TransportUnavailable`] naming every candidate
/// when none opens. Errors other than `TransportUnavailable` (such as an
/// invalid baud rate) are returned immediately.
pub fn probe_ports<T, F>(candidates: &[String], mut open: F) -> Result<(String, T), LinePrinterError>
where
    F: FnMut(&str) -> Result<T, LinePrinterError>,
{
    let mut failures = Vec::new();
    for port in candidates {
        match open(port) {
            Ok(transport) => {
                debug!("probe: {} opened", port);
                return Ok((port.clone(), transport));
            }
            Err(e) if e.is_transport_unavailable() => {
                debug!("probe: {} failed: {}", port, e);
                failures.push(port.as_str());
            }
            Err(e) => return Err(e),
        }
    }
    Err(LinePrinterError::unavailable(
        failures.join(", "),
        "no candidate port could be opened",
    ))
}

// ============================================================================
// TESTS
// ============================================================================
