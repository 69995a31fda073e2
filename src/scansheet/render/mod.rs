//! # Rendering Collaborators
//!
//! The sheet layout does not know how a symbol is drawn or what document
//! format it ends up in. It talks to two traits:
//!
//! - [`BarcodeRenderer`] turns a [`Code`] into an in-memory image and later
//!   releases it.
//! - [`DocumentWriter`] places images on fixed-size pages and produces the
//!   final document.
//!
//! ## Implementations
//!
//! - [`barcode::Code128Renderer`]: Code 128 symbols rasterized to grayscale
//!   images (symbology in [`code128`]).
//! - [`pdf::PdfWriter`]: PDF output via `printpdf`.
//! - [`memory::RecordingWriter`]: records pages and draw calls in memory, for
//!   tests and for callers that only need geometry.
//!
//! Images never touch the filesystem; they are handed straight from the
//! renderer to the writer.

use crate::error::{EncodeError, WriterError};
use crate::layout::CellRect;
use crate::model::Code;
use image::GrayImage;

pub mod barcode;
pub mod code128;
pub mod memory;
pub mod pdf;

/// A rendered symbol for one code.
#[derive(Debug, Clone)]
pub struct BarcodeImage {
    pub code: Code,
    pub raster: GrayImage,
}

impl BarcodeImage {
    pub fn new(code: Code, raster: GrayImage) -> Self {
        Self { code, raster }
    }

    pub fn width_px(&self) -> u32 {
        self.raster.width()
    }

    pub fn height_px(&self) -> u32 {
        self.raster.height()
    }
}

/// Produces a drawable symbol for one code in a fixed linear symbology.
pub trait BarcodeRenderer {
    type Image;

    fn encode(&mut self, code: &Code) -> Result<Self::Image, EncodeError>;

    /// Release whatever backs `image`. Called once per code, whether or not
    /// encoding succeeded; `None` must be a no-op.
    fn release(&mut self, image: Option<Self::Image>) {
        drop(image);
    }
}

/// A fixed-page-size document under construction.
///
/// The first page opens implicitly with the first drawn image; later pages are
/// opened with [`DocumentWriter::start_new_page`].
pub trait DocumentWriter<I> {
    type Output;

    fn start_new_page(&mut self) -> Result<(), WriterError>;

    fn draw_image(&mut self, image: &I, rect: CellRect) -> Result<(), WriterError>;

    /// Pages opened so far
    fn page_count(&self) -> usize;

    fn finalize(self) -> Result<Self::Output, WriterError>;
}
