use crate::model::player::{Player, Seat};
use crate::model::score::round_score;
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseKind {
    Guessing,
    Locked,
}

impl PhaseKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            PhaseKind::Guessing => "Guessing",
            PhaseKind::Locked => "Locked",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("{player} needs a whole-number guess of at least 1")]
    InvalidGuess { player: Player },
    #[error("{player} has no obtained score")]
    MissingObtained { player: Player },
    #[error("round is {actual}, expected {expected}")]
    WrongPhase {
        expected: PhaseKind,
        actual: PhaseKind,
    },
    #[error("there is no player in seat {}", .0 + 1)]
    UnknownSeat(usize),
}

/// Input state of the round being played. Entered values are kept as the
/// raw text typed by the user until they are validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundPhase {
    Guessing {
        guesses: Vec<String>,
    },
    Locked {
        guesses: Vec<u32>,
        obtained: Vec<String>,
    },
}

impl RoundPhase {
    pub const fn kind(&self) -> PhaseKind {
        match self {
            RoundPhase::Guessing { .. } => PhaseKind::Guessing,
            RoundPhase::Locked { .. } => PhaseKind::Locked,
        }
    }
}

/// One committed line of history for a single seat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeatScore {
    pub guess: u32,
    pub obtained: u32,
    pub score: f64,
}

/// Scores of a completed round, indexed by seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    entries: Vec<SeatScore>,
}

impl RoundResult {
    pub fn from_inputs(guesses: &[u32], obtained: &[u32]) -> Self {
        let entries = guesses
            .iter()
            .zip(obtained)
            .map(|(&guess, &obtained)| SeatScore {
                guess,
                obtained,
                score: round_score(guess, obtained),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[SeatScore] {
        &self.entries
    }

    pub fn entry(&self, seat: Seat) -> Option<&SeatScore> {
        self.entries.get(seat.index())
    }

    pub fn score(&self, seat: Seat) -> f64 {
        self.entry(seat).map(|entry| entry.score).unwrap_or(0.0)
    }

    pub fn scores(&self) -> Vec<f64> {
        self.entries.iter().map(|entry| entry.score).collect()
    }
}

#[derive(Debug, Clone)]
pub struct RoundState {
    phase: RoundPhase,
}

impl RoundState {
    pub fn new(seats: usize) -> Self {
        Self {
            phase: RoundPhase::Guessing {
                guesses: vec![String::new(); seats],
            },
        }
    }

    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    pub fn kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn set_guess(&mut self, seat: Seat, value: &str) -> Result<(), RoundError> {
        match &mut self.phase {
            RoundPhase::Guessing { guesses } => {
                let slot = guesses
                    .get_mut(seat.index())
                    .ok_or(RoundError::UnknownSeat(seat.index()))?;
                *slot = value.trim().to_string();
                Ok(())
            }
            RoundPhase::Locked { .. } => Err(RoundError::WrongPhase {
                expected: PhaseKind::Guessing,
                actual: PhaseKind::Locked,
            }),
        }
    }

    pub fn set_obtained(&mut self, seat: Seat, value: &str) -> Result<(), RoundError> {
        match &mut self.phase {
            RoundPhase::Locked { obtained, .. } => {
                let slot = obtained
                    .get_mut(seat.index())
                    .ok_or(RoundError::UnknownSeat(seat.index()))?;
                *slot = value.trim().to_string();
                Ok(())
            }
            RoundPhase::Guessing { .. } => Err(RoundError::WrongPhase {
                expected: PhaseKind::Locked,
                actual: PhaseKind::Guessing,
            }),
        }
    }

    /// Freezes the guesses. Fails on the first seat whose guess is not a
    /// whole number of at least one, leaving the round untouched.
    pub fn lock(&mut self, players: &[Player]) -> Result<(), RoundError> {
        let RoundPhase::Guessing { guesses } = &self.phase else {
            return Err(RoundError::WrongPhase {
                expected: PhaseKind::Guessing,
                actual: PhaseKind::Locked,
            });
        };

        let parsed = players
            .iter()
            .map(|player| {
                guesses
                    .get(player.seat().index())
                    .and_then(|text| parse_guess(text))
                    .ok_or_else(|| RoundError::InvalidGuess {
                        player: player.clone(),
                    })
            })
            .collect::<Result<Vec<u32>, RoundError>>()?;

        self.phase = RoundPhase::Locked {
            obtained: vec![String::new(); parsed.len()],
            guesses: parsed,
        };
        Ok(())
    }

    /// Validated guesses, available once the round is locked.
    pub fn locked_guesses(&self) -> Option<&[u32]> {
        match &self.phase {
            RoundPhase::Locked { guesses, .. } => Some(guesses),
            RoundPhase::Guessing { .. } => None,
        }
    }

    /// Scores the locked round without committing it.
    pub fn score(&self, players: &[Player]) -> Result<RoundResult, RoundError> {
        let RoundPhase::Locked { guesses, obtained } = &self.phase else {
            return Err(RoundError::WrongPhase {
                expected: PhaseKind::Locked,
                actual: PhaseKind::Guessing,
            });
        };

        let values = players
            .iter()
            .map(|player| {
                obtained
                    .get(player.seat().index())
                    .and_then(|text| parse_obtained(text))
                    .ok_or_else(|| RoundError::MissingObtained {
                        player: player.clone(),
                    })
            })
            .collect::<Result<Vec<u32>, RoundError>>()?;

        Ok(RoundResult::from_inputs(guesses, &values))
    }

    /// Clears all inputs and starts a fresh guessing round.
    pub fn reset(&mut self, seats: usize) {
        *self = Self::new(seats);
    }
}

fn parse_guess(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok().filter(|&value| value >= 1)
}

fn parse_obtained(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok()
}
