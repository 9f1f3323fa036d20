use super::ranking::Standing;
use super::session::ScoringSession;
use crate::model::player::Player;
use crate::model::round::RoundResult;
use serde::Serialize;

/// Read-only export of a session: the roster, every committed round, the
/// totals, and the standings derived from them.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionSnapshot {
    pub players: Vec<Player>,
    pub rounds_played: usize,
    pub history: Vec<RoundResult>,
    pub totals: Vec<f64>,
    pub standings: Vec<Standing>,
}

impl SessionSnapshot {
    pub fn capture(session: &ScoringSession) -> Self {
        SessionSnapshot {
            players: session.players().to_vec(),
            rounds_played: session.history().len(),
            history: session.history().to_vec(),
            totals: session.totals().to_vec(),
            standings: session.ranking().standings().to_vec(),
        }
    }

    pub fn to_json(session: &ScoringSession) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(session))
    }
}

#[cfg(test)]
mod tests {
    use super::SessionSnapshot;
    use crate::game::session::ScoringSession;
    use crate::model::player::{Seat, seat_players};
    use std::time::Instant;

    #[test]
    fn snapshot_serializes_history_and_standings() {
        let mut session = ScoringSession::new(seat_players(["Asha", "Bikash"]));
        session.set_guess(Seat::new(0), "2").unwrap();
        session.set_guess(Seat::new(1), "3").unwrap();
        session.lock_guesses().unwrap();
        session.set_obtained(Seat::new(0), "4").unwrap();
        session.set_obtained(Seat::new(1), "3").unwrap();
        session.submit_round(Instant::now()).unwrap();

        let json = SessionSnapshot::to_json(&session).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rounds_played"], 1);
        assert_eq!(value["totals"][0], 3.0);
        assert_eq!(value["history"][0]["entries"][1]["obtained"], 3);
        assert_eq!(value["standings"][0]["player"]["name"], "Asha");
        assert_eq!(value["standings"][1]["rank"], 2);
    }

    #[test]
    fn fresh_session_snapshot_has_zero_totals() {
        let session = ScoringSession::new(seat_players(["Asha"]));
        let snapshot = SessionSnapshot::capture(&session);
        assert_eq!(snapshot.rounds_played, 0);
        assert_eq!(snapshot.totals, vec![0.0]);
        assert!(snapshot.history.is_empty());
    }
}
