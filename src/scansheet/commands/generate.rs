use crate::commands::{CmdMessage, CmdResult};
use crate::config::SheetConfig;
use crate::error::{Result, SheetError};
use crate::session::Session;
use rand::Rng;

pub fn run(session: &mut Session, config: &SheetConfig, count: i64) -> Result<CmdResult> {
    run_with(session, config, count, &mut rand::thread_rng())
}

pub fn run_with<R: Rng + ?Sized>(
    session: &mut Session,
    config: &SheetConfig,
    count: i64,
    rng: &mut R,
) -> Result<CmdResult> {
    if usize::try_from(count).is_ok_and(|n| n > config.max_codes) {
        return Err(SheetError::InvalidInput(format!(
            "cannot generate {} barcodes at once, the limit is {}",
            count, config.max_codes
        )));
    }

    let codes = session.generate_with(count, rng)?.to_vec();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Generated {} barcodes",
        codes.len()
    )));
    Ok(result.with_codes(codes).with_stats(session.stats()))
}
