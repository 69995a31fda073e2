//! # Scansheet Architecture
//!
//! Scansheet is a **UI-agnostic barcode session library**: it generates a
//! batch of random 12-digit codes, confirms scans against them, and prints the
//! batch as a paginated sheet of Code 128 symbols. The bundled terminal client
//! is one possible UI.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Argument parsing, operator console, terminal output      │
//! │  - Opening the printed sheet in a viewer                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - BarcodeApi owns the Session and the configuration        │
//! │  - Normalizes raw operator input                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - generate, confirm, stats, list, print, config            │
//! │  - Returns CmdResult, no terminal I/O                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - session.rs: generated codes and confirmed scans          │
//! │  - layout/: page grid math and the render loop              │
//! │  - render/: renderer/writer traits, Code 128, PDF           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never exits the
//! process, and never assumes a terminal. Diagnostics go through `tracing`;
//! the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each operation
//! - [`session`]: Session state (generated and scanned codes)
//! - [`layout`]: Page grid and sheet rendering loop
//! - [`render`]: Barcode symbology, rasterization and document writers
//! - [`model`]: Core data types (`Code`, `ConfirmResult`, `SessionStats`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod render;
pub mod session;
