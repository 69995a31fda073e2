//! # API Facade
//!
//! The single entry point for UI clients. [`BarcodeApi`] owns the operator's
//! [`Session`] and the configuration, and dispatches to the command layer.
//!
//! The API:
//! - **Dispatches** to `commands::*`
//! - **Normalizes inputs** (raw count and scan text straight from a widget)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no global state: each UI keeps its own
//! `BarcodeApi` and passes it around by reference.

use crate::commands;
use crate::config::SheetConfig;
use crate::error::Result;
use crate::layout::SheetLayout;
use crate::render::{BarcodeRenderer, DocumentWriter};
use crate::session::Session;
use std::path::{Path, PathBuf};

pub struct BarcodeApi {
    session: Session,
    config: SheetConfig,
    config_dir: PathBuf,
}

impl BarcodeApi {
    /// Fails when the configuration does not describe a usable page grid.
    pub fn new(config: SheetConfig, config_dir: PathBuf) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            session: Session::new(),
            config,
            config_dir,
        })
    }

    pub fn generate(&mut self, count: i64) -> Result<commands::CmdResult> {
        commands::generate::run(&mut self.session, &self.config, count)
    }

    /// Like [`BarcodeApi::generate`], with the count as typed by the operator.
    /// An empty field counts as zero.
    pub fn generate_from_input(&mut self, input: &str) -> Result<commands::CmdResult> {
        let input = input.trim();
        let count = if input.is_empty() {
            0
        } else {
            input.parse::<i64>().map_err(|_| {
                crate::error::SheetError::InvalidInput(format!("not a number: {:?}", input))
            })?
        };
        self.generate(count)
    }

    pub fn confirm(&mut self, input: &str) -> Result<commands::CmdResult> {
        commands::confirm::run(&mut self.session, input)
    }

    pub fn stats(&self) -> Result<commands::CmdResult> {
        commands::stats::run(&self.session)
    }

    pub fn list(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.session)
    }

    /// Prints the sheet as PDF to `output`, or to the configured default file.
    pub fn print(&self, output: Option<&Path>) -> Result<commands::CmdResult> {
        let output = self.output_path(output);
        commands::print::run(&self.session, &self.config, &output)
    }

    pub fn print_with<R, W>(
        &self,
        renderer: &mut R,
        writer: W,
        output: Option<&Path>,
    ) -> Result<commands::CmdResult>
    where
        R: BarcodeRenderer,
        W: DocumentWriter<R::Image, Output = Vec<u8>>,
    {
        let layout = SheetLayout::from_config(&self.config.page)?;
        let output = self.output_path(output);
        commands::print::run_with(&self.session, &layout, renderer, writer, &output)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, &self.config, action)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &SheetConfig {
        &self.config
    }

    pub fn output_path(&self, output: Option<&Path>) -> PathBuf {
        output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&self.config.output))
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, SheetSummary};
