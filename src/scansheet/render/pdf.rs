use super::{BarcodeImage, DocumentWriter};
use crate::config::{BarcodeConfig, PageConfig};
use crate::error::WriterError;
use crate::layout::CellRect;
use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, IndirectFontRef, Mm,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Px,
};

/// Resolution images are embedded at before scaling to their cell
const EMBED_DPI: f32 = 300.0;
const MM_PER_INCH: f32 = 25.4;
const PT_TO_MM: f32 = 0.3528;
/// Average advance of a Helvetica digit, in ems
const DIGIT_ADVANCE_EM: f32 = 0.556;

/// Writes barcode sheets as PDF pages of a fixed size.
pub struct PdfWriter {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    layer: Option<PdfLayerReference>,
    pages: usize,
    page_width: f32,
    page_height: f32,
    padding: f32,
    caption_size: Option<f32>,
}

impl PdfWriter {
    pub fn new(title: &str, page: &PageConfig, barcode: &BarcodeConfig) -> Result<Self, WriterError> {
        let doc = PdfDocument::empty(title);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| WriterError::PageAllocation(e.to_string()))?;

        Ok(Self {
            doc,
            font,
            layer: None,
            pages: 0,
            page_width: page.width_mm,
            page_height: page.height_mm,
            padding: barcode.padding_mm,
            caption_size: barcode.caption.then_some(barcode.caption_size_pt),
        })
    }

    fn current_layer(&mut self) -> Result<PdfLayerReference, WriterError> {
        if self.layer.is_none() {
            self.start_new_page()?;
        }
        self.layer
            .clone()
            .ok_or_else(|| WriterError::PageAllocation("no open page".to_string()))
    }
}

impl DocumentWriter<BarcodeImage> for PdfWriter {
    type Output = Vec<u8>;

    fn start_new_page(&mut self) -> Result<(), WriterError> {
        let (page, layer) = self.doc.add_page(
            Mm(self.page_width),
            Mm(self.page_height),
            format!("Page {}", self.pages + 1),
        );
        self.layer = Some(self.doc.get_page(page).get_layer(layer));
        self.pages += 1;
        Ok(())
    }

    fn draw_image(&mut self, image: &BarcodeImage, rect: CellRect) -> Result<(), WriterError> {
        let (width_px, height_px) = (image.width_px(), image.height_px());
        if width_px == 0 || height_px == 0 {
            return Err(WriterError::Draw(format!("empty raster for {}", image.code)));
        }

        let caption_height = self
            .caption_size
            .map(|size| size * PT_TO_MM * 1.5)
            .unwrap_or(0.0);
        let box_width = rect.width - 2.0 * self.padding;
        let box_height = rect.height - 2.0 * self.padding - caption_height;
        if box_width <= 0.0 || box_height <= 0.0 {
            return Err(WriterError::Draw(format!(
                "cell {:.1}x{:.1} mm is too small for padding and caption",
                rect.width, rect.height
            )));
        }

        let layer = self.current_layer()?;

        let natural_width = width_px as f32 / EMBED_DPI * MM_PER_INCH;
        let natural_height = height_px as f32 / EMBED_DPI * MM_PER_INCH;
        let symbol_bottom = rect.y + self.padding + caption_height;

        let xobject = Image::from(ImageXObject {
            width: Px(width_px as usize),
            height: Px(height_px as usize),
            color_space: ColorSpace::Greyscale,
            bits_per_component: ColorBits::Bit8,
            interpolate: false,
            image_data: image.raster.as_raw().clone(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });
        xobject.add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(rect.x + self.padding)),
                translate_y: Some(Mm(symbol_bottom)),
                scale_x: Some(box_width / natural_width),
                scale_y: Some(box_height / natural_height),
                dpi: Some(EMBED_DPI),
                ..Default::default()
            },
        );

        if let Some(size) = self.caption_size {
            let text = image.code.as_str();
            let text_width = text.len() as f32 * DIGIT_ADVANCE_EM * size * PT_TO_MM;
            let text_x = rect.x + (rect.width - text_width) / 2.0;
            layer.use_text(
                text,
                size,
                Mm(text_x),
                Mm(rect.y + self.padding),
                &self.font,
            );
        }
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn finalize(self) -> Result<Vec<u8>, WriterError> {
        self.doc
            .save_to_bytes()
            .map_err(|e| WriterError::Finalize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::barcode::Code128Renderer;
    use crate::layout::SheetLayout;
    use crate::render::BarcodeRenderer;
    use crate::session::fixtures::SessionFixture;

    fn writer() -> PdfWriter {
        PdfWriter::new("test", &PageConfig::default(), &BarcodeConfig::default()).unwrap()
    }

    fn cell() -> CellRect {
        CellRect {
            x: 15.0,
            y: 215.25,
            width: 45.0,
            height: 66.75,
        }
    }

    #[test]
    fn draws_and_finalizes_a_pdf() {
        let mut renderer = Code128Renderer::default();
        let image = renderer.encode(&"123456789012".parse().unwrap()).unwrap();

        let mut writer = writer();
        writer.draw_image(&image, cell()).unwrap();
        assert_eq!(writer.page_count(), 1);

        let bytes = writer.finalize().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn explicit_pages_are_counted() {
        let mut renderer = Code128Renderer::default();
        let image = renderer.encode(&"123456789012".parse().unwrap()).unwrap();

        let mut writer = writer();
        writer.draw_image(&image, cell()).unwrap();
        writer.start_new_page().unwrap();
        writer.draw_image(&image, cell()).unwrap();
        assert_eq!(writer.page_count(), 2);
    }

    /// Counts `/Type /Page` dictionaries, skipping the `/Pages` tree node.
    fn page_objects(pdf: &[u8]) -> usize {
        let text = String::from_utf8_lossy(pdf);
        text.match_indices("/Type")
            .filter(|(i, _)| {
                let rest = text[i + "/Type".len()..].trim_start();
                rest.starts_with("/Page") && !rest.starts_with("/Pages")
            })
            .count()
    }

    #[test]
    fn saved_document_has_one_page_per_sixteen_codes() {
        let codes = SessionFixture::new()
            .with_generated(20)
            .session
            .codes()
            .to_vec();
        let layout = SheetLayout::from_config(&PageConfig::default()).unwrap();

        let report = layout
            .render(&codes, &mut Code128Renderer::default(), writer())
            .unwrap();

        assert_eq!(report.pages, 2);
        assert_eq!(page_objects(&report.document), 2);
    }

    #[test]
    fn caption_off_leaves_room_for_the_symbol() {
        let mut renderer = Code128Renderer::default();
        let image = renderer.encode(&"123456789012".parse().unwrap()).unwrap();
        // Tall enough for the padding alone, not for padding plus caption
        let short = CellRect {
            x: 15.0,
            y: 15.0,
            width: 45.0,
            height: 8.0,
        };

        let mut captioned = writer();
        assert!(matches!(
            captioned.draw_image(&image, short),
            Err(WriterError::Draw(_))
        ));

        let barcode = BarcodeConfig {
            caption: false,
            ..BarcodeConfig::default()
        };
        let mut plain = PdfWriter::new("test", &PageConfig::default(), &barcode).unwrap();
        plain.draw_image(&image, short).unwrap();
        assert_eq!(plain.page_count(), 1);

        let bytes = plain.finalize().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(page_objects(&bytes), 1);
    }

    #[test]
    fn tiny_cell_is_a_draw_error() {
        let mut renderer = Code128Renderer::default();
        let image = renderer.encode(&"123456789012".parse().unwrap()).unwrap();

        let mut writer = writer();
        let tiny = CellRect {
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 4.0,
        };
        assert!(matches!(
            writer.draw_image(&image, tiny),
            Err(WriterError::Draw(_))
        ));
        // A rejected draw does not open a page
        assert_eq!(writer.page_count(), 0);
    }
}
