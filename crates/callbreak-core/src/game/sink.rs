use crate::model::player::Player;
use crate::model::round::RoundResult;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("round sink failed: {0}")]
pub struct SinkError(pub String);

/// Optional collaborator told about every committed round, e.g. a remote
/// document store. Failures never roll back a round.
pub trait RoundSink {
    fn append_round(
        &mut self,
        round_number: usize,
        players: &[Player],
        result: &RoundResult,
    ) -> Result<(), SinkError>;
}

/// Keeps every appended round in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    rounds: Vec<(usize, RoundResult)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rounds(&self) -> &[(usize, RoundResult)] {
        &self.rounds
    }
}

impl RoundSink for RecordingSink {
    fn append_round(
        &mut self,
        round_number: usize,
        _players: &[Player],
        result: &RoundResult,
    ) -> Result<(), SinkError> {
        self.rounds.push((round_number, result.clone()));
        Ok(())
    }
}
