use super::code128;
use super::{BarcodeImage, BarcodeRenderer};
use crate::config::BarcodeConfig;
use crate::error::EncodeError;
use crate::model::Code;
use image::{GrayImage, Luma};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);
/// Largest raster a single symbol may allocate
const MAX_RASTER_PIXELS: u64 = 128 * 1024 * 1024;

/// Rasterizes Code 128 symbols into grayscale images held in memory.
#[derive(Debug, Clone)]
pub struct Code128Renderer {
    module_px: u32,
    bar_height_px: u32,
    quiet_zone_modules: u32,
    released: usize,
}

impl Default for Code128Renderer {
    fn default() -> Self {
        Self::from_config(&BarcodeConfig::default())
    }
}

impl Code128Renderer {
    pub fn from_config(config: &BarcodeConfig) -> Self {
        Self {
            module_px: config.module_px.max(1),
            bar_height_px: config.bar_height_px.max(1),
            quiet_zone_modules: config.quiet_zone_modules,
            released: 0,
        }
    }

    /// Images handed back through [`BarcodeRenderer::release`]
    pub fn released(&self) -> usize {
        self.released
    }

    pub fn rasterize(&self, payload: &str) -> Result<GrayImage, EncodeError> {
        let modules = code128::modules(payload)?;
        let total_modules = u32::try_from(modules.len())
            .ok()
            .and_then(|n| n.checked_add(self.quiet_zone_modules.checked_mul(2)?))
            .ok_or_else(|| EncodeError::Raster(format!("{} modules is too wide", modules.len())))?;
        let width = total_modules
            .checked_mul(self.module_px)
            .ok_or_else(|| EncodeError::Raster("symbol width overflows".to_string()))?;
        let pixels = u64::from(width) * u64::from(self.bar_height_px);
        if pixels > MAX_RASTER_PIXELS {
            return Err(EncodeError::Raster(format!(
                "{}x{} px symbol exceeds the {} pixel limit",
                width, self.bar_height_px, MAX_RASTER_PIXELS
            )));
        }

        let mut raster = GrayImage::from_pixel(width, self.bar_height_px, LIGHT);
        let mut x = self.quiet_zone_modules * self.module_px;
        for dark in modules {
            if dark {
                for dx in 0..self.module_px {
                    for y in 0..self.bar_height_px {
                        raster.put_pixel(x + dx, y, DARK);
                    }
                }
            }
            x += self.module_px;
        }
        Ok(raster)
    }
}

impl BarcodeRenderer for Code128Renderer {
    type Image = BarcodeImage;

    fn encode(&mut self, code: &Code) -> Result<BarcodeImage, EncodeError> {
        let raster = self.rasterize(code.as_str())?;
        Ok(BarcodeImage::new(code.clone(), raster))
    }

    fn release(&mut self, image: Option<BarcodeImage>) {
        if image.is_some() {
            self.released += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer(module_px: u32, quiet: u32) -> Code128Renderer {
        Code128Renderer::from_config(&BarcodeConfig {
            module_px,
            bar_height_px: 10,
            quiet_zone_modules: quiet,
            ..BarcodeConfig::default()
        })
    }

    #[test]
    fn raster_width_covers_modules_and_quiet_zones() {
        let raster = renderer(2, 10).rasterize("123456789012").unwrap();
        assert_eq!(raster.width(), (101 + 20) * 2);
        assert_eq!(raster.height(), 10);
    }

    #[test]
    fn quiet_zone_is_blank_and_first_bar_is_dark() {
        let raster = renderer(1, 10).rasterize("123456789012").unwrap();
        for x in 0..10 {
            assert_eq!(*raster.get_pixel(x, 0), LIGHT);
        }
        assert_eq!(*raster.get_pixel(10, 0), DARK);
        assert_eq!(*raster.get_pixel(10, 9), DARK);
    }

    #[test]
    fn encode_wraps_code() {
        let mut r = Code128Renderer::default();
        let code: Code = "100000000000".parse().unwrap();
        let image = r.encode(&code).unwrap();
        assert_eq!(image.code, code);
        assert!(image.width_px() > 0);
    }

    #[test]
    fn release_counts_only_real_images() {
        let mut r = Code128Renderer::default();
        let code: Code = "100000000000".parse().unwrap();
        let image = r.encode(&code).unwrap();
        r.release(None);
        r.release(Some(image));
        r.release(None);
        assert_eq!(r.released(), 1);
    }

    #[test]
    fn oversized_raster_is_an_encode_error() {
        let mut r = Code128Renderer::from_config(&BarcodeConfig {
            module_px: 1_000_000,
            bar_height_px: u32::MAX,
            ..BarcodeConfig::default()
        });
        assert!(matches!(
            r.rasterize("123456789012"),
            Err(EncodeError::Raster(_))
        ));

        let code: Code = "123456789012".parse().unwrap();
        assert!(matches!(r.encode(&code), Err(EncodeError::Raster(_))));
    }

    #[test]
    fn raster_limit_admits_every_valid_config() {
        // 12 digits, 100 quiet modules a side, 64 px modules, 4096 px bars
        let widest = (101 + 2 * 100) * 64_u64;
        assert!(widest * 4096 <= MAX_RASTER_PIXELS);
    }

    #[test]
    fn rasterize_reports_bad_payload() {
        assert!(matches!(
            renderer(1, 0).rasterize("123"),
            Err(EncodeError::OddLength(3))
        ));
    }
}
