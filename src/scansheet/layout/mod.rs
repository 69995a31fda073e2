//! # Sheet Layout
//!
//! Maps an ordered sequence of codes onto pages of a fixed `rows × columns`
//! grid and drives the injected renderer and writer.
//!
//! - [`PageGrid`]: page geometry and index → (page, row, column, rect) math.
//! - [`SheetLayout`]: the render loop, with per-code failure collection and
//!   fatal writer errors.
//!
//! Coordinates are millimetres with the origin at the bottom-left corner of
//! the page, which is what the PDF writer expects.

mod grid;
mod sheet;

pub use grid::{CellRect, PageGrid, Placement};
pub use sheet::{CodeFailure, FailureKind, RenderAborted, RenderReport, SheetLayout};
