use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ConfirmResult;
use crate::session::Session;

/// Confirms raw scanner/keyboard input. Never fails on bad input: anything
/// that is not a generated code is `NotFound`.
pub fn run(session: &mut Session, input: &str) -> Result<CmdResult> {
    let outcome = session.confirm_input(input);
    let message = match outcome {
        ConfirmResult::Confirmed => CmdMessage::success(outcome.feedback()),
        ConfirmResult::AlreadyConfirmed => CmdMessage::warning(outcome.feedback()),
        ConfirmResult::NotFound => CmdMessage::error(outcome.feedback()),
    };

    let mut result = CmdResult::default()
        .with_confirmation(outcome)
        .with_stats(session.stats());
    result.add_message(message);
    Ok(result)
}
