use crate::commands::{CmdMessage, CmdResult, SheetSummary};
use crate::config::SheetConfig;
use crate::error::{Result, SheetError};
use crate::layout::SheetLayout;
use crate::render::barcode::Code128Renderer;
use crate::render::pdf::PdfWriter;
use crate::render::{BarcodeRenderer, DocumentWriter};
use crate::session::Session;
use std::fs;
use std::path::Path;

/// Prints the session's codes as a Code 128 PDF sheet at `output`.
pub fn run(session: &Session, config: &SheetConfig, output: &Path) -> Result<CmdResult> {
    let layout = SheetLayout::from_config(&config.page)?;
    let mut renderer = Code128Renderer::from_config(&config.barcode);
    let title = format!("Barcodes {}", session.id().simple());
    let writer = PdfWriter::new(&title, &config.page, &config.barcode)?;
    run_with(session, &layout, &mut renderer, writer, output)
}

/// Prints with any renderer and byte-producing writer.
///
/// A session without codes is [`SheetError::EmptyInput`] and touches nothing.
/// When the writer fails fatally, whatever partial document it could still
/// produce is written to `output` before the error is returned.
pub fn run_with<R, W>(
    session: &Session,
    layout: &SheetLayout,
    renderer: &mut R,
    writer: W,
    output: &Path,
) -> Result<CmdResult>
where
    R: BarcodeRenderer,
    W: DocumentWriter<R::Image, Output = Vec<u8>>,
{
    let codes = session.codes();
    if codes.is_empty() {
        return Err(SheetError::EmptyInput);
    }

    let report = match layout.render(codes, renderer, writer) {
        Ok(report) => report,
        Err(aborted) => {
            let partial = match aborted.partial {
                Some(bytes) => {
                    fs::write(output, bytes)?;
                    Some(output.to_path_buf())
                }
                None => None,
            };
            return Err(SheetError::RenderAborted {
                pages: aborted.pages,
                source: aborted.error,
                partial,
            });
        }
    };

    fs::write(output, &report.document)?;

    let mut result = CmdResult::default();
    for failure in &report.failures {
        result.add_message(CmdMessage::warning(format!(
            "Could not render {} (#{}): {}",
            failure.code,
            failure.index + 1,
            failure.kind
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "PDF saved as {} ({} barcodes on {} pages)",
        output.display(),
        report.rendered(),
        report.pages
    )));

    Ok(result.with_sheet(SheetSummary {
        path: output.to_path_buf(),
        pages: report.pages,
        rendered: report.rendered(),
        failures: report.failures,
    }))
}
