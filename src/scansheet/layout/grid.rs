use crate::config::PageConfig;
use crate::error::{Result, SheetError};

/// A cell rectangle in document units (millimetres), origin at the bottom-left
/// of the page. `y` is the bottom edge of the cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Where one code lands in the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Position of the code in the input sequence
    pub index: usize,
    /// 0-based page number
    pub page: usize,
    pub row: usize,
    pub column: usize,
    pub rect: CellRect,
}

/// Fixed-size grid of cells repeated on every page.
///
/// Cell geometry depends only on the page configuration, never on how many
/// codes end up on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGrid {
    page_width: f32,
    page_height: f32,
    margin_x: f32,
    margin_y: f32,
    columns: usize,
    rows: usize,
}

impl PageGrid {
    pub fn new(
        page_width: f32,
        page_height: f32,
        margin_x: f32,
        margin_y: f32,
        columns: usize,
        rows: usize,
    ) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(SheetError::Config(format!(
                "grid needs at least one column and one row, got {}x{}",
                columns, rows
            )));
        }
        if margin_x < 0.0
            || margin_y < 0.0
            || page_width - 2.0 * margin_x <= 0.0
            || page_height - 2.0 * margin_y <= 0.0
        {
            return Err(SheetError::Config(format!(
                "page {}x{} with margins {}x{} has no printable area",
                page_width, page_height, margin_x, margin_y
            )));
        }
        Ok(Self {
            page_width,
            page_height,
            margin_x,
            margin_y,
            columns,
            rows,
        })
    }

    pub fn from_config(page: &PageConfig) -> Result<Self> {
        Self::new(
            page.width_mm,
            page.height_mm,
            page.margin_x_mm,
            page.margin_y_mm,
            page.columns,
            page.rows,
        )
    }

    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn codes_per_page(&self) -> usize {
        self.columns * self.rows
    }

    pub fn cell_width(&self) -> f32 {
        (self.page_width - 2.0 * self.margin_x) / self.columns as f32
    }

    pub fn cell_height(&self) -> f32 {
        (self.page_height - 2.0 * self.margin_y) / self.rows as f32
    }

    /// Pages needed for `count` codes. Zero codes need zero pages.
    pub fn page_count(&self, count: usize) -> usize {
        count.div_ceil(self.codes_per_page())
    }

    /// Placement of the code at `index`, filling left-to-right, top-to-bottom.
    pub fn placement(&self, index: usize) -> Placement {
        let per_page = self.codes_per_page();
        let pos = index % per_page;
        let column = pos % self.columns;
        let row = pos / self.columns;
        let cell_width = self.cell_width();
        let cell_height = self.cell_height();

        Placement {
            index,
            page: index / per_page,
            row,
            column,
            rect: CellRect {
                x: self.margin_x + column as f32 * cell_width,
                y: self.page_height - self.margin_y - (row + 1) as f32 * cell_height,
                width: cell_width,
                height: cell_height,
            },
        }
    }
}
