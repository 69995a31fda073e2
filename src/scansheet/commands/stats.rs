use crate::commands::CmdResult;
use crate::error::Result;
use crate::session::Session;

pub fn run(session: &Session) -> Result<CmdResult> {
    Ok(CmdResult::default().with_stats(session.stats()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SessionStats;
    use crate::session::fixtures::SessionFixture;

    #[test]
    fn reports_totals() {
        let session = SessionFixture::new()
            .with_generated(7)
            .with_confirmed(2)
            .session;
        let result = run(&session).unwrap();
        assert_eq!(
            result.stats,
            Some(SessionStats {
                total: 7,
                confirmed: 2,
                remaining: 5
            })
        );
    }

    #[test]
    fn empty_session() {
        let result = run(&Session::new()).unwrap();
        assert_eq!(result.stats, Some(SessionStats::default()));
    }
}
