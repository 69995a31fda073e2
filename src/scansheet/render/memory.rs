use super::{BarcodeImage, DocumentWriter};
use crate::error::WriterError;
use crate::layout::CellRect;
use crate::model::Code;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCell {
    pub code: Code,
    pub rect: CellRect,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedPage {
    pub cells: Vec<RecordedCell>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedDocument {
    pub pages: Vec<RecordedPage>,
}

impl RecordedDocument {
    pub fn drawn(&self) -> usize {
        self.pages.iter().map(|p| p.cells.len()).sum()
    }
}

/// In-memory writer that records every page and draw call.
/// Does NOT produce a printable document.
///
/// Failures can be injected for testing callers' error handling.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    doc: RecordedDocument,
    fail_draw: HashSet<Code>,
    max_pages: Option<usize>,
    fail_finalize: bool,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drawing `code` fails with a per-image error
    pub fn failing_draw(mut self, code: Code) -> Self {
        self.fail_draw.insert(code);
        self
    }

    /// Opening more than `pages` pages fails
    pub fn page_limit(mut self, pages: usize) -> Self {
        self.max_pages = Some(pages);
        self
    }

    pub fn failing_finalize(mut self) -> Self {
        self.fail_finalize = true;
        self
    }

    fn open_page(&mut self) -> Result<(), WriterError> {
        if let Some(limit) = self.max_pages {
            if self.doc.pages.len() >= limit {
                return Err(WriterError::PageAllocation(format!(
                    "page limit of {} reached",
                    limit
                )));
            }
        }
        self.doc.pages.push(RecordedPage::default());
        Ok(())
    }
}

impl DocumentWriter<BarcodeImage> for RecordingWriter {
    type Output = RecordedDocument;

    fn start_new_page(&mut self) -> Result<(), WriterError> {
        self.open_page()
    }

    fn draw_image(&mut self, image: &BarcodeImage, rect: CellRect) -> Result<(), WriterError> {
        if self.fail_draw.contains(&image.code) {
            return Err(WriterError::Draw(format!("refusing to draw {}", image.code)));
        }
        if self.doc.pages.is_empty() {
            self.open_page()?;
        }
        if let Some(page) = self.doc.pages.last_mut() {
            page.cells.push(RecordedCell {
                code: image.code.clone(),
                rect,
            });
        }
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.doc.pages.len()
    }

    fn finalize(self) -> Result<RecordedDocument, WriterError> {
        if self.fail_finalize {
            return Err(WriterError::Finalize("injected failure".to_string()));
        }
        Ok(self.doc)
    }
}
