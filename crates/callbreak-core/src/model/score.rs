use crate::model::player::Seat;

/// Round score for a player who guessed `guess` and obtained `obtained`.
///
/// A guess is met when the obtained value lands in `[guess, 2 * guess]`,
/// which pays the average of the two. Anything else costs the full guess.
pub fn round_score(guess: u32, obtained: u32) -> f64 {
    let (g, o) = (u64::from(guess), u64::from(obtained));
    if o >= g && o <= 2 * g {
        (g + o) as f64 / 2.0
    } else {
        -(g as f64)
    }
}

/// Cumulative per-seat totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBoard {
    totals: Vec<f64>,
}

impl ScoreBoard {
    pub fn new(seats: usize) -> Self {
        Self {
            totals: vec![0.0; seats],
        }
    }

    pub fn apply_round(&mut self, scores: &[f64]) {
        for (total, points) in self.totals.iter_mut().zip(scores) {
            *total += points;
        }
    }

    pub fn score(&self, seat: Seat) -> f64 {
        self.totals.get(seat.index()).copied().unwrap_or(0.0)
    }

    pub fn standings(&self) -> &[f64] {
        &self.totals
    }
}
