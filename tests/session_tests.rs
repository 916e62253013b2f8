//! # Session Tests
//!
//! Drive a [`LinePrinter`] over a [`MemoryTransport`] with a `Vec<u8>` echo
//! sink, checking the exact bytes sent and the exact echo produced.

use std::io::Write;

use lineprinter::protocol::modes::{
    JUSTIFY_MODES, SIZE_DOUBLE, SIZE_MODES, SIZE_NORMAL, SIZE_TRIPLE,
};
use lineprinter::{
    LinePrinter, LinePrinterError, MemoryTransport, PopOutcome, PrinterConfig, Transport,
};
use pretty_assertions::assert_eq;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

type TestPrinter = LinePrinter<MemoryTransport, Vec<u8>>;

/// A session with echo on and the construction-time reset already drained.
fn printer_with(config: PrinterConfig) -> TestPrinter {
    let mut printer =
        LinePrinter::with_transport(MemoryTransport::new(), config, Vec::new()).unwrap();
    printer.transport_mut().take_writes();
    printer
}

fn printer() -> TestPrinter {
    printer_with(PrinterConfig {
        echo: true,
        ..PrinterConfig::default()
    })
}

fn echo_lines(printer: &TestPrinter) -> Vec<String> {
    String::from_utf8(printer.echo_sink().clone())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

// ============================================================================
// MODE TABLES
// ============================================================================

#[test]
fn test_set_size_writes_table_signal() {
    for entry in &SIZE_MODES {
        let mut printer = printer();
        printer.set_size(entry.code).unwrap();

        assert_eq!(printer.transport().writes(), [entry.signal.to_vec()]);
        if entry.code == SIZE_NORMAL {
            assert_eq!(printer.active_size(), None);
        } else {
            assert_eq!(printer.active_size(), Some(entry.name));
        }
    }
}

#[test]
fn test_set_justify_writes_table_signal() {
    for entry in &JUSTIFY_MODES {
        let mut printer = printer();
        printer.set_justify(entry.code).unwrap();

        assert_eq!(printer.transport().writes(), [vec![0x1B, 0x61, entry.code]]);
        if entry.code == 0 {
            assert_eq!(printer.active_justify(), None);
        } else {
            assert_eq!(printer.active_justify(), Some(entry.name));
        }
    }
}

#[test]
fn test_unknown_codes_write_nothing() {
    let mut printer = printer();
    printer.set_size(SIZE_DOUBLE).unwrap();
    printer.transport_mut().take_writes();
    let echo_before = echo_lines(&printer);

    for code in [3, 12, 21, 99] {
        match printer.set_size(code) {
            Err(LinePrinterError::UnknownModeCode { code: c, .. }) => assert_eq!(c, code),
            other => panic!("expected UnknownModeCode, got {:?}", other),
        }
    }
    assert!(matches!(
        printer.set_justify(3),
        Err(LinePrinterError::UnknownModeCode { .. })
    ));

    assert!(printer.transport().writes().is_empty());
    assert_eq!(printer.active_size(), Some("big"));
    assert_eq!(echo_lines(&printer), echo_before);
}

#[test]
fn test_mode_echo_nesting() {
    let mut printer = printer();
    printer.justify_center().unwrap();
    printer.set_size(SIZE_DOUBLE).unwrap();
    printer.write_line("big").unwrap();
    printer.set_size(SIZE_TRIPLE).unwrap();
    printer.justify_right().unwrap();
    printer.write_line("bigger").unwrap();
    printer.justify_left().unwrap();
    printer.set_size(SIZE_NORMAL).unwrap();

    assert_eq!(
        echo_lines(&printer),
        vec![
            "<center>",
            "  <big>",
            "    big",
            "    ",
            "  </big>",
            "  <bigger>",
            "  </center>",
            "  <right>",
            "    bigger",
            "    ",
            "  </right>",
            "</bigger>",
        ]
    );
    assert_eq!(printer.indent_depth(), 0);
}

// ============================================================================
// TOGGLE MODES
// ============================================================================

#[test]
fn test_out_of_order_close() {
    let mut printer = printer();
    printer.flip(true).unwrap();
    printer.rotate_clockwise(true).unwrap();
    let outcome = printer.flip(false).unwrap();

    assert_eq!(
        outcome,
        Some(PopOutcome::OutOfOrder {
            position: 0,
            remaining: vec!["rotate-clockwise".to_string()],
        })
    );
    assert_eq!(printer.active_formats(), ["rotate-clockwise".to_string()]);
    assert_eq!(
        echo_lines(&printer),
        vec![
            "<flip>",
            "  <rotate-clockwise>",
            "  </flip>",
            "  <!--still formatted in: [\"rotate-clockwise\"] after removing format [0]-->",
        ]
    );
    // The flip-off signal is still sent
    assert_eq!(printer.transport().writes().last(), Some(&vec![0x1B, 0x7B, 0x02]));
}

#[test]
fn test_close_inactive_toggle_is_noop() {
    let mut printer = printer();
    let outcome = printer.flip(false).unwrap();

    assert_eq!(outcome, Some(PopOutcome::AlreadyInactive));
    assert!(printer.active_formats().is_empty());
    assert_eq!(printer.indent_depth(), 0);
    assert_eq!(echo_lines(&printer), vec!["<!--already not formatted: flip-->"]);
}

#[test]
fn test_toggle_rejects_non_boolean() {
    let mut printer = printer();

    assert!(matches!(printer.flip(2), Err(LinePrinterError::InvalidArgument(_))));
    assert!(matches!(
        printer.rotate_clockwise(-1i64),
        Err(LinePrinterError::InvalidArgument(_))
    ));

    assert!(printer.transport().writes().is_empty());
    assert!(printer.active_formats().is_empty());
    assert!(printer.echo_sink().is_empty());
}

#[test]
fn test_toggle_accepts_int_and_bool() {
    let mut printer = printer();
    assert_eq!(printer.rotate_clockwise(1).unwrap(), None);
    assert_eq!(printer.rotate_clockwise(false).unwrap(), Some(PopOutcome::Closed));
    assert_eq!(printer.flip(true).unwrap(), None);
    assert_eq!(printer.flip(0).unwrap(), Some(PopOutcome::Closed));
}

#[test]
fn test_indent_clamps_after_reset() {
    let mut printer = printer();
    printer.flip(true).unwrap();
    // Reset clears indentation but keeps the toggle record
    printer.reset().unwrap();
    assert_eq!(printer.active_formats(), ["flip".to_string()]);

    let outcome = printer.flip(false).unwrap();
    assert_eq!(outcome, Some(PopOutcome::Closed));
    assert_eq!(printer.indent_depth(), 0);
    assert_eq!(
        echo_lines(&printer),
        vec!["<flip>", "WARNING: More modes ended than started.", "</flip>"]
    );
}

// ============================================================================
// ECHO
// ============================================================================

#[test]
fn test_silent_session_tracks_nesting() {
    let mut printer = printer_with(PrinterConfig::default());
    printer.set_size(SIZE_DOUBLE).unwrap();
    printer.flip(true).unwrap();
    assert!(printer.echo_sink().is_empty());
    assert_eq!(printer.indent_depth(), 2);

    printer.set_echo(true);
    printer.write_line("upside down").unwrap();
    printer.flip(false).unwrap();

    assert_eq!(
        echo_lines(&printer),
        vec!["    upside down", "    ", "  </flip>"]
    );
}

/// Echo sink that refuses every write.
struct Broken;

impl Write for Broken {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("sink closed"))
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn broken_printer(echo: bool) -> LinePrinter<MemoryTransport, Broken> {
    let config = PrinterConfig {
        echo,
        ..PrinterConfig::default()
    };
    let mut printer = LinePrinter::with_transport(MemoryTransport::new(), config, Broken).unwrap();
    printer.transport_mut().take_writes();
    printer
}

#[test]
fn test_echo_sink_errors_propagate() {
    let mut printer = broken_printer(true);
    assert!(matches!(printer.write_line("x"), Err(LinePrinterError::Io(_))));
}

#[test]
fn test_toggle_state_follows_signal_when_echo_fails() {
    let mut printer = broken_printer(true);

    assert!(matches!(printer.flip(true), Err(LinePrinterError::Io(_))));
    assert_eq!(printer.transport().writes(), [vec![0x1B, 0x7B, 0x01]]);
    assert_eq!(printer.active_formats(), ["flip".to_string()]);

    assert!(matches!(printer.flip(false), Err(LinePrinterError::Io(_))));
    assert_eq!(printer.transport().writes()[1], vec![0x1B, 0x7B, 0x02]);
    assert!(printer.active_formats().is_empty());
}

#[test]
fn test_size_state_follows_signal_when_echo_fails() {
    let mut printer = broken_printer(false);
    printer.set_size(SIZE_DOUBLE).unwrap();
    assert_eq!(printer.active_size(), Some("big"));

    printer.set_echo(true);
    assert!(matches!(printer.set_size(SIZE_NORMAL), Err(LinePrinterError::Io(_))));
    assert_eq!(printer.active_size(), None);
    assert_eq!(printer.transport().writes().last(), Some(&vec![0x1D, 0x21, 0x00]));
    assert_eq!(printer.indent_depth(), 0);
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[test]
fn test_write_line() {
    let mut printer = printer();
    printer.write_line("hello").unwrap();
    assert_eq!(printer.transport().writes(), [b"hello".to_vec(), vec![0x0A]]);
    assert_eq!(echo_lines(&printer), vec!["hello", ""]);
}

#[test]
fn test_write_lines() {
    let mut printer = printer();
    printer.write_lines(["a", "b"]).unwrap();
    assert_eq!(printer.transport().bytes(), b"a\nb\n".to_vec());
}

#[test]
fn test_write_centered_pads_to_width() {
    let mut printer = printer();
    printer.write_centered("hi").unwrap();

    let padded = format!("{}hi{}", " ".repeat(20), " ".repeat(20));
    assert_eq!(padded.len(), 42);
    assert_eq!(printer.transport().writes(), [padded.as_bytes().to_vec(), vec![0x0A]]);
    assert_eq!(echo_lines(&printer), vec![format!("<center>{}</center>", padded)]);
}

#[test]
fn test_write_centered_uses_configured_width() {
    let mut printer = printer_with(PrinterConfig {
        width: 10,
        ..PrinterConfig::default()
    });
    printer.write_centered("abcd").unwrap();
    assert_eq!(printer.transport().writes()[0], b"   abcd   ".to_vec());
}

#[test]
fn test_cut_feeds_first() {
    let mut printer = printer_with(PrinterConfig {
        pre_cut_feed_count: 2,
        echo: true,
        ..PrinterConfig::default()
    });
    printer.cut().unwrap();

    assert_eq!(
        printer.transport().writes(),
        [vec![0x0A], vec![0x0A], vec![0x1D, 0x56, 0x00]]
    );
    assert_eq!(echo_lines(&printer), vec!["<cut/>", "", ""]);
    assert!(printer.transport().is_open());
}

#[test]
fn test_end_feeds_cuts_and_closes() {
    let mut printer = printer();
    printer.set_size(SIZE_DOUBLE).unwrap();
    printer.transport_mut().take_writes();

    printer.end().unwrap();

    let mut expected = vec![vec![0x0A]; 6];
    expected.push(vec![0x1D, 0x56, 0x00]);
    assert_eq!(printer.transport().writes(), expected.as_slice());
    assert!(!printer.transport().is_open());
    assert_eq!(printer.transport().close_count(), 1);
    assert_eq!(printer.indent_depth(), 0);

    // Echo starts back at column zero for the cut
    let lines = echo_lines(&printer);
    assert_eq!(lines[lines.len() - 7], "<cut/>");
}

#[test]
fn test_writes_after_end_fail() {
    let mut printer = printer();
    printer.end().unwrap();
    let sent = printer.transport().writes().len();

    assert!(printer.write_line("late").unwrap_err().is_transport_unavailable());
    assert!(printer.line_feed().unwrap_err().is_transport_unavailable());
    assert!(printer.flip(true).unwrap_err().is_transport_unavailable());
    assert!(printer.set_size(SIZE_DOUBLE).unwrap_err().is_transport_unavailable());

    assert_eq!(printer.transport().writes().len(), sent);
    assert!(printer.active_formats().is_empty());
    assert_eq!(printer.active_size(), None);
}

#[test]
fn test_refused_operations_leave_echo_untouched() {
    let mut printer = printer();
    printer.end().unwrap();
    let echo = printer.echo_sink().clone();
    let depth = printer.indent_depth();

    assert!(printer.reset().unwrap_err().is_transport_unavailable());
    assert!(printer.cut().unwrap_err().is_transport_unavailable());
    assert!(printer.end().unwrap_err().is_transport_unavailable());

    assert_eq!(printer.echo_sink(), &echo);
    assert_eq!(printer.indent_depth(), depth);
}

#[test]
fn test_reset_signal() {
    let mut printer = printer();
    printer.reset().unwrap();
    assert_eq!(printer.transport().writes(), [vec![0x1B, 0x40]]);
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn test_config_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"port": "/dev/ttyUSB3", "baud": 9600, "pre_cut_feed_count": 3}}"#
    )
    .unwrap();

    let config = PrinterConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.port.as_deref(), Some("/dev/ttyUSB3"));
    assert_eq!(config.baud, 9600);
    assert_eq!(config.pre_cut_feed_count, 3);
    assert_eq!(config.width, 42);
    assert!(!config.echo);
}

#[test]
fn test_config_from_bad_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{\"baud\": \"fast\"}}").unwrap();

    assert!(matches!(
        PrinterConfig::from_json_file(file.path()),
        Err(LinePrinterError::InvalidArgument(_))
    ));
}
