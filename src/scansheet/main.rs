//! # scansheet
//!
//! Generate a batch of random 12-digit barcodes, print them as a Code 128
//! PDF sheet, then check scanned codes against the batch.
//!
//! ## Usage
//!
//! ```text
//! scansheet generate 40 -o batch.pdf --open   # one-shot: generate and print
//! scansheet session                           # operator console on stdin
//! scansheet config                            # effective configuration
//! scansheet init                              # write config.json defaults
//! ```
//!
//! Running `scansheet` without a subcommand starts the console.
//!
//! ## Operator Console
//!
//! The console keeps one session for the life of the process:
//!
//! ```text
//! > generate 20
//! Generated 20 barcodes
//! > print
//! PDF saved as barcodes.pdf (20 barcodes on 2 pages)
//! > 482910375562
//! Valid and scanned
//! > stats
//! ```
//!
//! A line that is not a console command is treated as a scan, so a
//! keyboard-wedge scanner can feed the console directly.
//!
//! ## Configuration
//!
//! `config.json` in the platform config directory, or in `--config-dir`.
//! Page size, margins, the grid, symbol size and the default output file are
//! all configurable. Logging follows `RUST_LOG`; `-v` turns on debug output.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
