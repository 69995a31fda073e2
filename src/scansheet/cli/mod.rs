//! # CLI Layer
//!
//! One possible UI client for scansheet. This is the only place that knows
//! about the terminal: argument parsing, the operator console, colored
//! output, exit codes and launching a PDF viewer.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap, version string
//! - `commands`: Per-command handlers that call the API and print results
//! - `console`: Line parser for the interactive session
//! - `print`: Output formatting
//! - `viewer`: Opening a printed sheet with the platform viewer

mod commands;
mod console;
mod print;
pub mod setup;
mod viewer;

pub use commands::run;
