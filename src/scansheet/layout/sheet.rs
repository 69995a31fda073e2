use super::grid::{PageGrid, Placement};
use crate::config::PageConfig;
use crate::error::{EncodeError, Result, WriterError};
use crate::model::Code;
use crate::render::{BarcodeRenderer, DocumentWriter};
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum FailureKind {
    Encode(EncodeError),
    Draw(WriterError),
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Encode(e) => write!(f, "{}", e),
            FailureKind::Draw(e) => write!(f, "{}", e),
        }
    }
}

/// A code that could not be placed. Its cell stays blank.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeFailure {
    pub index: usize,
    pub code: Code,
    pub kind: FailureKind,
}

/// Outcome of a render that reached `finalize`.
#[derive(Debug)]
pub struct RenderReport<O> {
    pub document: O,
    pub pages: usize,
    /// Placements of the codes that were actually drawn
    pub placed: Vec<Placement>,
    pub failures: Vec<CodeFailure>,
}

impl<O> RenderReport<O> {
    pub fn rendered(&self) -> usize {
        self.placed.len()
    }
}

/// A writer failure that stopped the render.
///
/// `partial` holds the document finalized from the pages written before the
/// failure, when the writer could still produce one.
#[derive(Debug)]
pub struct RenderAborted<O> {
    pub error: WriterError,
    pub pages: usize,
    pub partial: Option<O>,
    pub failures: Vec<CodeFailure>,
}

/// Lays codes out on a [`PageGrid`] and drives rendering.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    grid: PageGrid,
}

impl SheetLayout {
    pub fn new(grid: PageGrid) -> Self {
        Self { grid }
    }

    pub fn from_config(page: &PageConfig) -> Result<Self> {
        Ok(Self::new(PageGrid::from_config(page)?))
    }

    pub fn grid(&self) -> &PageGrid {
        &self.grid
    }

    /// Render `codes` in order, `codes_per_page` to a page.
    ///
    /// Per-code encode and draw failures are collected and rendering goes on
    /// with the next code. Page allocation and finalize failures abort.
    /// The renderer's `release` runs once for every code regardless of outcome.
    ///
    /// The document always has `ceil(len / codes_per_page)` pages, even when
    /// failures leave a page without any symbol. An empty input produces a
    /// finalized document with zero pages.
    pub fn render<R, W>(
        &self,
        codes: &[Code],
        renderer: &mut R,
        mut writer: W,
    ) -> std::result::Result<RenderReport<W::Output>, RenderAborted<W::Output>>
    where
        R: BarcodeRenderer,
        W: DocumentWriter<R::Image>,
    {
        let per_page = self.grid.codes_per_page();
        let expected_pages = self.grid.page_count(codes.len());
        let mut placed = Vec::with_capacity(codes.len());
        let mut failures = Vec::new();

        for (i, code) in codes.iter().enumerate() {
            let placement = self.grid.placement(i);

            if i % per_page == 0 && i != 0 {
                // Pages skipped by failures are opened blank before this one
                while writer.page_count() <= placement.page {
                    if let Err(error) = writer.start_new_page() {
                        return Err(abort::<R::Image, W>(writer, error, failures));
                    }
                }
            }

            let (image, outcome) = match renderer.encode(code) {
                Ok(image) => {
                    let drawn = writer.draw_image(&image, placement.rect);
                    (Some(image), drawn.map_err(FailureKind::Draw))
                }
                Err(e) => (None, Err(FailureKind::Encode(e))),
            };
            renderer.release(image);

            match outcome {
                Err(FailureKind::Draw(error)) if error.is_fatal() => {
                    return Err(abort::<R::Image, W>(writer, error, failures));
                }
                Ok(()) => {
                    debug!(
                        code = %code,
                        page = placement.page + 1,
                        row = placement.row,
                        column = placement.column,
                        "placed barcode"
                    );
                    placed.push(placement);
                }
                Err(kind) => {
                    warn!(code = %code, index = i, error = %kind, "barcode skipped");
                    failures.push(CodeFailure {
                        index: i,
                        code: code.clone(),
                        kind,
                    });
                }
            }
        }

        while writer.page_count() < expected_pages {
            if let Err(error) = writer.start_new_page() {
                return Err(abort::<R::Image, W>(writer, error, failures));
            }
        }

        let pages = writer.page_count();
        match writer.finalize() {
            Ok(document) => {
                info!(
                    pages,
                    rendered = placed.len(),
                    failed = failures.len(),
                    "sheet rendered"
                );
                Ok(RenderReport {
                    document,
                    pages,
                    placed,
                    failures,
                })
            }
            Err(error) => {
                warn!(error = %error, "document could not be finalized");
                Err(RenderAborted {
                    error,
                    pages,
                    partial: None,
                    failures,
                })
            }
        }
    }
}

fn abort<I, W: DocumentWriter<I>>(
    writer: W,
    error: WriterError,
    failures: Vec<CodeFailure>,
) -> RenderAborted<W::Output> {
    let pages = writer.page_count();
    warn!(error = %error, pages, "render aborted");
    RenderAborted {
        error,
        pages,
        partial: writer.finalize().ok(),
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::barcode::Code128Renderer;
    use crate::render::memory::RecordingWriter;
    use crate::render::BarcodeImage;
    use crate::session::fixtures::SessionFixture;
    use std::collections::HashSet;

    /// Delegates to Code 128 but refuses selected codes.
    struct FlakyRenderer {
        inner: Code128Renderer,
        refuse: HashSet<Code>,
        encoded: usize,
        released: usize,
        released_none: usize,
    }

    impl FlakyRenderer {
        fn new(refuse: &[&Code]) -> Self {
            Self {
                inner: Code128Renderer::default(),
                refuse: refuse.iter().map(|c| (*c).clone()).collect(),
                encoded: 0,
                released: 0,
                released_none: 0,
            }
        }
    }

    impl BarcodeRenderer for FlakyRenderer {
        type Image = BarcodeImage;

        fn encode(&mut self, code: &Code) -> std::result::Result<BarcodeImage, EncodeError> {
            self.encoded += 1;
            if self.refuse.contains(code) {
                return Err(EncodeError::Raster("injected".to_string()));
            }
            self.inner.encode(code)
        }

        fn release(&mut self, image: Option<BarcodeImage>) {
            match image {
                Some(_) => self.released += 1,
                None => self.released_none += 1,
            }
        }
    }

    fn layout() -> SheetLayout {
        SheetLayout::from_config(&PageConfig::default()).unwrap()
    }

    fn codes(n: i64) -> Vec<Code> {
        SessionFixture::new()
            .with_generated(n)
            .session
            .codes()
            .to_vec()
    }

    #[test]
    fn twenty_codes_make_two_pages() {
        let codes = codes(20);
        let mut renderer = Code128Renderer::default();
        let report = layout()
            .render(&codes, &mut renderer, RecordingWriter::new())
            .unwrap();

        assert_eq!(report.pages, 2);
        assert_eq!(report.document.pages.len(), 2);
        assert_eq!(report.document.pages[0].cells.len(), 16);
        assert_eq!(report.document.pages[1].cells.len(), 4);
        assert!(report.failures.is_empty());
        assert_eq!(renderer.released(), 20);
    }

    #[test]
    fn full_pages_have_no_trailing_blank_page() {
        for k in 1..=3 {
            let codes = codes(16 * k);
            let report = layout()
                .render(&codes, &mut Code128Renderer::default(), RecordingWriter::new())
                .unwrap();
            assert_eq!(report.pages, k as usize);
            assert!(report.document.pages.iter().all(|p| p.cells.len() == 16));
        }
    }

    #[test]
    fn partial_last_page() {
        for r in 1..16 {
            let codes = codes(32 + r);
            let report = layout()
                .render(&codes, &mut Code128Renderer::default(), RecordingWriter::new())
                .unwrap();
            assert_eq!(report.pages, 3);
            assert_eq!(report.document.pages[2].cells.len(), r as usize);
        }
    }

    #[test]
    fn cells_follow_input_order() {
        let codes = codes(18);
        let report = layout()
            .render(&codes, &mut Code128Renderer::default(), RecordingWriter::new())
            .unwrap();

        let drawn: Vec<&Code> = report
            .document
            .pages
            .iter()
            .flat_map(|p| p.cells.iter().map(|c| &c.code))
            .collect();
        assert_eq!(drawn, codes.iter().collect::<Vec<_>>());

        let grid = layout().grid().clone();
        assert_eq!(report.document.pages[1].cells[1].rect, grid.placement(1).rect);
    }

    #[test]
    fn empty_input_finalizes_zero_pages() {
        let report = layout()
            .render(&[], &mut Code128Renderer::default(), RecordingWriter::new())
            .unwrap();
        assert_eq!(report.pages, 0);
        assert!(report.document.pages.is_empty());
        assert_eq!(report.rendered(), 0);
    }

    #[test]
    fn one_encode_failure_out_of_ten() {
        let codes = codes(10);
        let mut renderer = FlakyRenderer::new(&[&codes[3]]);

        let report = layout()
            .render(&codes, &mut renderer, RecordingWriter::new())
            .unwrap();

        assert_eq!(report.rendered(), 9);
        assert_eq!(report.document.drawn(), 9);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 3);
        assert_eq!(report.failures[0].code, codes[3]);
        assert!(matches!(report.failures[0].kind, FailureKind::Encode(_)));

        // Cleanup ran for every code
        assert_eq!(renderer.encoded, 10);
        assert_eq!(renderer.released, 9);
        assert_eq!(renderer.released_none, 1);
    }

    #[test]
    fn draw_failure_is_per_code() {
        let codes = codes(5);
        let writer = RecordingWriter::new().failing_draw(codes[0].clone());
        let mut renderer = FlakyRenderer::new(&[]);

        let report = layout().render(&codes, &mut renderer, writer).unwrap();
        assert_eq!(report.rendered(), 4);
        assert!(matches!(report.failures[0].kind, FailureKind::Draw(_)));
        assert_eq!(renderer.released, 5);
    }

    #[test]
    fn failed_first_page_is_still_emitted() {
        let codes = codes(20);
        let refused: Vec<&Code> = codes[..16].iter().collect();
        let mut renderer = FlakyRenderer::new(&refused);

        let report = layout()
            .render(&codes, &mut renderer, RecordingWriter::new())
            .unwrap();
        assert_eq!(report.pages, 2);
        assert!(report.document.pages[0].cells.is_empty());
        assert_eq!(report.document.pages[1].cells.len(), 4);
    }

    #[test]
    fn all_failures_still_produce_the_page() {
        let codes = codes(3);
        let refused: Vec<&Code> = codes.iter().collect();
        let report = layout()
            .render(&codes, &mut FlakyRenderer::new(&refused), RecordingWriter::new())
            .unwrap();
        assert_eq!(report.pages, 1);
        assert_eq!(report.failures.len(), 3);
    }

    #[test]
    fn page_allocation_failure_aborts_with_partial_document() {
        let codes = codes(40);
        let writer = RecordingWriter::new().page_limit(2);

        let aborted = layout()
            .render(&codes, &mut Code128Renderer::default(), writer)
            .unwrap_err();
        assert!(matches!(aborted.error, WriterError::PageAllocation(_)));
        assert_eq!(aborted.pages, 2);

        let partial = aborted.partial.unwrap();
        assert_eq!(partial.pages.len(), 2);
        assert_eq!(partial.drawn(), 32);
    }

    #[test]
    fn page_failure_on_first_draw_aborts_at_once() {
        let codes = codes(3);
        let mut renderer = FlakyRenderer::new(&[]);
        let writer = RecordingWriter::new().page_limit(0);

        let aborted = layout().render(&codes, &mut renderer, writer).unwrap_err();
        assert!(matches!(aborted.error, WriterError::PageAllocation(_)));
        assert_eq!(aborted.pages, 0);
        assert!(aborted.failures.is_empty());
        assert_eq!(aborted.partial.unwrap().drawn(), 0);

        // Stopped at the first code, whose image was still released
        assert_eq!(renderer.encoded, 1);
        assert_eq!(renderer.released, 1);
    }

    #[test]
    fn finalize_failure_is_fatal() {
        let codes = codes(3);
        let writer = RecordingWriter::new().failing_finalize();

        let aborted = layout()
            .render(&codes, &mut Code128Renderer::default(), writer)
            .unwrap_err();
        assert!(matches!(aborted.error, WriterError::Finalize(_)));
        assert!(aborted.partial.is_none());
        assert_eq!(aborted.pages, 1);
    }
}
