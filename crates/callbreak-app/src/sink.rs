use callbreak_core::{Player, RoundResult, RoundSink, SinkError};
use tracing::info;

/// Stands in for the remote store: reports each committed round to the log
/// and keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl RoundSink for TracingSink {
    fn append_round(
        &mut self,
        round_number: usize,
        players: &[Player],
        result: &RoundResult,
    ) -> Result<(), SinkError> {
        for player in players {
            if let Some(entry) = result.entry(player.seat()) {
                info!(
                    round = round_number,
                    player = player.name(),
                    guess = entry.guess,
                    obtained = entry.obtained,
                    score = entry.score,
                    "round result appended"
                );
            }
        }
        Ok(())
    }
}
