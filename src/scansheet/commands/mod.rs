//! # Command Layer
//!
//! The business logic of scansheet. Each command lives in its own submodule
//! and is a plain function over a [`Session`](crate::session::Session) and
//! configuration.
//!
//! Commands:
//! - operate on domain types and return a structured [`CmdResult`]
//! - never write to stdout/stderr or exit the process
//! - may write the printed sheet to disk (`print`) or the config file (`config`)
//!
//! The UI layer decides how to show the result.
//!
//! ## Command Modules
//!
//! - [`generate`]: Replace the session's codes with fresh random ones
//! - [`confirm`]: Check a scanned code against the session
//! - [`stats`]: Totals for the session
//! - [`list`]: Generated codes with their scan state
//! - [`print`]: Lay out and render the sheet to a document file
//! - [`config`]: Show or initialize configuration

use crate::config::SheetConfig;
use crate::layout::CodeFailure;
use crate::model::{Code, ConfirmResult, ListedCode, SessionStats};
use serde::Serialize;
use std::path::PathBuf;

pub mod config;
pub mod confirm;
pub mod generate;
pub mod list;
pub mod print;
pub mod stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What a printed sheet came out as.
#[derive(Debug, Clone)]
pub struct SheetSummary {
    pub path: PathBuf,
    pub pages: usize,
    pub rendered: usize,
    pub failures: Vec<CodeFailure>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub codes: Vec<Code>,
    pub listed: Vec<ListedCode>,
    pub stats: Option<SessionStats>,
    pub confirmation: Option<ConfirmResult>,
    pub sheet: Option<SheetSummary>,
    pub config: Option<SheetConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_codes(mut self, codes: Vec<Code>) -> Self {
        self.codes = codes;
        self
    }

    pub fn with_listed(mut self, listed: Vec<ListedCode>) -> Self {
        self.listed = listed;
        self
    }

    pub fn with_stats(mut self, stats: SessionStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_confirmation(mut self, result: ConfirmResult) -> Self {
        self.confirmation = Some(result);
        self
    }

    pub fn with_sheet(mut self, sheet: SheetSummary) -> Self {
        self.sheet = Some(sheet);
        self
    }

    pub fn with_config(mut self, config: SheetConfig) -> Self {
        self.config = Some(config);
        self
    }
}
