use std::path::PathBuf;
use thiserror::Error;

/// A payload the symbology cannot represent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("empty payload")]
    Empty,

    #[error("invalid character {found:?} at position {position}")]
    InvalidCharacter { position: usize, found: char },

    #[error("numeric payload must have an even number of digits, got {0}")]
    OddLength(usize),

    #[error("barcode rasterization failed: {0}")]
    Raster(String),
}

/// Failures raised by a document writer.
///
/// `Draw` only affects the code being drawn; `PageAllocation` and `Finalize`
/// abort the whole document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriterError {
    #[error("cannot allocate page: {0}")]
    PageAllocation(String),

    #[error("cannot draw image: {0}")]
    Draw(String),

    #[error("cannot finalize document: {0}")]
    Finalize(String),
}

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid code: {0}")]
    InvalidCode(String),

    #[error("No barcodes to print")]
    EmptyInput,

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Document error: {0}")]
    Writer(#[from] WriterError),

    #[error("Rendering aborted after {pages} page(s): {source}{}", partial_note(.partial))]
    RenderAborted {
        pages: usize,
        source: WriterError,
        partial: Option<PathBuf>,
    },

    #[error("Viewer error: {0}")]
    Viewer(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn partial_note(partial: &Option<PathBuf>) -> String {
    match partial {
        Some(path) => format!(" (partial document saved to {})", path.display()),
        None => String::new(),
    }
}

impl WriterError {
    /// Whether the error ends the whole document rather than one image.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, WriterError::Draw(_))
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
