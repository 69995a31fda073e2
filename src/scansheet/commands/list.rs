use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::Session;

pub fn run(session: &Session) -> Result<CmdResult> {
    let listed = session.listing();
    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info("No barcodes generated yet."));
    }
    Ok(result.with_listed(listed).with_stats(session.stats()))
}
