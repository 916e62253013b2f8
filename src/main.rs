//! # Lineprinter CLI
//!
//! Command-line interface for serial thermal receipt printers.
//!
//! ## Usage
//!
//! ```bash
//! # Print the mode showcase with the echo on
//! lineprinter --port /dev/ttyUSB0 --echo demo
//!
//! # List available demos
//! lineprinter demo --list
//!
//! # Print lines (stdin when none are given), centered, double size
//! lineprinter --port /dev/ttyUSB0 print --center --size 11 "HELLO" "WORLD"
//!
//! # Show the bytes instead of sending them
//! lineprinter --dry-run --echo demo nesting
//!
//! # Find the printer
//! lineprinter ports
//! ```
//!
//! Set `RUST_LOG=debug` to log every signal written to the port.

use clap::{Parser, Subcommand};
use log::warn;
use std::io::{self, BufRead, Stdout};
use std::path::PathBuf;

use lineprinter::{
    LinePrinter, LinePrinterError, MemoryTransport, PrinterConfig, SerialTransport, Transport,
    demo,
    printer::config::{DEFAULT_BAUD, candidate_ports, probe_ports},
    protocol::commands::hex,
};

/// Lineprinter - Serial thermal receipt printer utility
#[derive(Parser, Debug)]
#[command(name = "lineprinter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file (command-line options take precedence)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Serial device (guessed per OS when omitted)
    #[arg(long, global = true)]
    port: Option<String>,

    /// Baud rate
    #[arg(long, global = true)]
    baud: Option<u32>,

    /// Print width in characters, used for centering
    #[arg(long, global = true)]
    width: Option<usize>,

    /// Blank lines to feed before cutting
    #[arg(long, global = true)]
    pre_cut_feed: Option<usize>,

    /// Echo every command as indented, tag-like lines on stdout
    #[arg(long, global = true)]
    echo: bool,

    /// Don't open the port; dump the bytes that would be sent
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a demo sequence, then cut
    Demo {
        /// Demo to print
        #[arg(default_value = "modes")]
        name: String,

        /// List available demos
        #[arg(long)]
        list: bool,
    },

    /// Print lines of text, then cut
    Print {
        /// Lines to print (read from stdin when omitted)
        lines: Vec<String>,

        /// Pad each line to the print width
        #[arg(long)]
        center: bool,

        /// Size code: 0, 1, 2, 10, 20, 11, 22
        #[arg(long)]
        size: Option<u8>,

        /// Justification code: 0 left, 1 center, 2 right
        #[arg(long)]
        justify: Option<u8>,

        /// Print upside down
        #[arg(long)]
        flip: bool,

        /// Rotate 90° clockwise
        #[arg(long)]
        rotate: bool,

        /// Leave the paper uncut
        #[arg(long)]
        no_cut: bool,
    },

    /// List candidate serial ports and report the first that opens
    Ports,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LinePrinterError> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    match &cli.command {
        Commands::Demo { list: true, .. } => {
            println!("Available demos:");
            for name in demo::list_demos() {
                println!("  {}", name);
            }
            return Ok(());
        }
        Commands::Demo { name, .. } if !demo::is_demo(name) => {
            return Err(LinePrinterError::InvalidArgument(format!(
                "Unknown demo '{}'. Run with --list to see available demos.",
                name
            )));
        }
        Commands::Ports => return list_ports(config.baud),
        _ => {}
    }

    if cli.dry_run {
        let transport = MemoryTransport::named(config.resolved_port());
        let mut printer = LinePrinter::with_transport(transport, config, io::stdout())?;
        execute(&cli.command, &mut printer)?;
        for signal in printer.transport().writes() {
            println!("{}", hex(signal));
        }
    } else {
        let mut printer = LinePrinter::connect(config)?;
        if let Err(e) = execute(&cli.command, &mut printer) {
            // Don't leave the port open on the way out
            if let Err(close_err) = printer.close() {
                warn!("Failed to close {}: {}", printer.transport().port(), close_err);
            }
            return Err(e);
        }
    }

    Ok(())
}

/// Merge the config file (if any) with command-line overrides.
fn build_config(cli: &Cli) -> Result<PrinterConfig, LinePrinterError> {
    let mut config = match &cli.config {
        Some(path) => PrinterConfig::from_json_file(path)?,
        None => PrinterConfig::default(),
    };

    if let Some(port) = &cli.port {
        config.port = Some(port.clone());
    }
    match cli.baud {
        Some(baud) => config.baud = baud,
        None if cli.config.is_none() && !cli.dry_run => warn!(
            "Guessed baud={} (this rate is only for thermal printers such as the \
             Posiflex Aura PP7000-II in serial mode; see the manual for your device)",
            DEFAULT_BAUD
        ),
        None => {}
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(count) = cli.pre_cut_feed {
        config.pre_cut_feed_count = count;
    }
    config.echo |= cli.echo;

    Ok(config)
}

fn execute<T: Transport>(
    command: &Commands,
    printer: &mut LinePrinter<T, Stdout>,
) -> Result<(), LinePrinterError> {
    match command {
        Commands::Demo { name, .. } => {
            demo::run(name, printer)?;
            printer.end()?;
            println!("To verify success, check whether the print matches the echo above.");
        }
        Commands::Print {
            lines,
            center,
            size,
            justify,
            flip,
            rotate,
            no_cut,
        } => {
            if let Some(code) = justify {
                printer.set_justify(*code)?;
            }
            if let Some(code) = size {
                printer.set_size(*code)?;
            }
            if *flip {
                printer.flip(true)?;
            }
            if *rotate {
                printer.rotate_clockwise(true)?;
            }

            let lines = if lines.is_empty() {
                io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?
            } else {
                lines.clone()
            };
            for line in &lines {
                if *center {
                    printer.write_centered(line)?;
                } else {
                    printer.write_line(line)?;
                }
            }

            if *rotate {
                printer.rotate_clockwise(false)?;
            }
            if *flip {
                printer.flip(false)?;
            }
            if *no_cut {
                printer.close()?;
            } else {
                printer.end()?;
            }
        }
        // Probes ports itself, never reaches a session
        Commands::Ports => {}
    }
    Ok(())
}

fn list_ports(baud: u32) -> Result<(), LinePrinterError> {
    let candidates = candidate_ports();
    println!("Candidate ports:");
    for port in &candidates {
        println!("  {}", port);
    }

    match probe_ports(&candidates, |port| SerialTransport::open_port(port, baud)) {
        Ok((port, mut transport)) => {
            transport.close()?;
            println!("\nFirst port that opens: {}", port);
            Ok(())
        }
        Err(LinePrinterError::TransportUnavailable { .. }) => {
            println!("\nNone of the candidate ports could be opened.");
            println!("You can get the proper port via:");
            println!("  sudo dmesg | grep tty");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
