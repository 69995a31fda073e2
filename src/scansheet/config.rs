use crate::error::{Result, SheetError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_OUTPUT: &str = "barcodes.pdf";
const DEFAULT_MAX_CODES: usize = 10_000;
const MAX_MODULE_PX: u32 = 64;
const MAX_BAR_HEIGHT_PX: u32 = 4096;
const MAX_QUIET_ZONE_MODULES: u32 = 100;

/// Configuration for scansheet, stored as `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SheetConfig {
    #[serde(default)]
    pub page: PageConfig,

    #[serde(default)]
    pub barcode: BarcodeConfig,

    /// File name used when printing without an explicit path
    #[serde(default = "default_output")]
    pub output: String,

    /// Upper bound for a single generation request
    #[serde(default = "default_max_codes")]
    pub max_codes: usize,
}

/// Physical page geometry, in millimetres. Defaults to A4 with a 4x4 grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_x_mm: f32,
    pub margin_y_mm: f32,
    pub columns: usize,
    pub rows: usize,
}

/// How each symbol is rasterized and placed inside its cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BarcodeConfig {
    /// Width of the narrowest bar, in pixels
    pub module_px: u32,
    pub bar_height_px: u32,
    /// Blank modules on each side of the symbol
    pub quiet_zone_modules: u32,
    /// Inner padding between the cell edge and the symbol
    pub padding_mm: f32,
    /// Print the digits below each symbol
    pub caption: bool,
    pub caption_size_pt: f32,
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

fn default_max_codes() -> usize {
    DEFAULT_MAX_CODES
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_x_mm: 15.0,
            margin_y_mm: 15.0,
            columns: 4,
            rows: 4,
        }
    }
}

impl Default for BarcodeConfig {
    fn default() -> Self {
        Self {
            module_px: 2,
            bar_height_px: 80,
            quiet_zone_modules: 10,
            padding_mm: 3.0,
            caption: true,
            caption_size_pt: 8.0,
        }
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            barcode: BarcodeConfig::default(),
            output: default_output(),
            max_codes: DEFAULT_MAX_CODES,
        }
    }
}

impl SheetConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        Self::load_file(config_dir.as_ref().join(CONFIG_FILENAME))
    }

    /// Load config from an explicit file path, or return defaults if not found
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: SheetConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let page = &self.page;
        if page.columns == 0 || page.rows == 0 {
            return Err(SheetError::Config(format!(
                "grid needs at least one column and one row, got {}x{}",
                page.columns, page.rows
            )));
        }
        if !(page.width_mm > 0.0 && page.height_mm > 0.0) {
            return Err(SheetError::Config(format!(
                "page size must be positive, got {}x{} mm",
                page.width_mm, page.height_mm
            )));
        }
        if page.margin_x_mm < 0.0
            || page.margin_y_mm < 0.0
            || 2.0 * page.margin_x_mm >= page.width_mm
            || 2.0 * page.margin_y_mm >= page.height_mm
        {
            return Err(SheetError::Config(format!(
                "margins {}x{} mm leave no printable area",
                page.margin_x_mm, page.margin_y_mm
            )));
        }
        let barcode = &self.barcode;
        if !(1..=MAX_MODULE_PX).contains(&barcode.module_px) {
            return Err(SheetError::Config(format!(
                "barcode module width must be 1..={} px, got {}",
                MAX_MODULE_PX, barcode.module_px
            )));
        }
        if !(1..=MAX_BAR_HEIGHT_PX).contains(&barcode.bar_height_px) {
            return Err(SheetError::Config(format!(
                "barcode bar height must be 1..={} px, got {}",
                MAX_BAR_HEIGHT_PX, barcode.bar_height_px
            )));
        }
        if barcode.quiet_zone_modules > MAX_QUIET_ZONE_MODULES {
            return Err(SheetError::Config(format!(
                "quiet zone must be at most {} modules, got {}",
                MAX_QUIET_ZONE_MODULES, barcode.quiet_zone_modules
            )));
        }
        if !(barcode.padding_mm >= 0.0 && barcode.padding_mm.is_finite()) {
            return Err(SheetError::Config(
                "barcode padding must not be negative".to_string(),
            ));
        }
        let caption_fits = barcode.caption_size_pt > 0.0 && barcode.caption_size_pt.is_finite();
        if barcode.caption && !caption_fits {
            return Err(SheetError::Config(format!(
                "caption size must be positive, got {} pt",
                barcode.caption_size_pt
            )));
        }
        Ok(())
    }
}
