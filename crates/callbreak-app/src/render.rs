//! Plain-text views of the roster and the score sheet.

use callbreak_core::model::round::RoundPhase;
use callbreak_core::{Player, Ranking, Roster, RoundResult, ScoringSession};

pub fn points(value: f64) -> String {
    format!("{value} pts")
}

pub fn roster_lines(roster: &Roster) -> Vec<String> {
    roster
        .slots()
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let shown = if name.trim().is_empty() {
                "(blank)"
            } else {
                name.as_str()
            };
            format!("{}. {shown}", index + 1)
        })
        .collect()
}

/// `Round N: name: X pts  name: Y pts` for every committed round.
pub fn history_lines(players: &[Player], history: &[RoundResult]) -> Vec<String> {
    history
        .iter()
        .enumerate()
        .map(|(index, round)| {
            let cells: Vec<String> = players
                .iter()
                .map(|player| format!("{}: {}", player.name(), points(round.score(player.seat()))))
                .collect();
            format!("Round {}: {}", index + 1, cells.join("  "))
        })
        .collect()
}

/// Standings table; the top position carries a `*`.
pub fn standings_lines(ranking: &Ranking) -> Vec<String> {
    ranking
        .iter()
        .map(|standing| {
            let marker = if standing.is_top() { '*' } else { ' ' };
            format!(
                "{marker}{}. {} {}",
                standing.rank,
                standing.player.name(),
                points(standing.total)
            )
        })
        .collect()
}

pub fn status_lines(session: &ScoringSession) -> Vec<String> {
    let mut lines = vec![format!(
        "Round {} ({})",
        session.round_number(),
        session.phase_kind()
    )];
    match session.phase() {
        RoundPhase::Guessing { guesses } => {
            for (player, guess) in session.players().iter().zip(guesses) {
                lines.push(format!("  {}: guess {}", player.name(), or_dash(guess)));
            }
        }
        RoundPhase::Locked { guesses, obtained } => {
            for ((player, guess), got) in session.players().iter().zip(guesses).zip(obtained) {
                lines.push(format!(
                    "  {}: guess {guess}, obtained {}",
                    player.name(),
                    or_dash(got)
                ));
            }
        }
    }
    lines
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callbreak_core::model::player::seat_players;
    use callbreak_core::Seat;

    #[test]
    fn points_drop_trailing_zero() {
        assert_eq!(points(5.5), "5.5 pts");
        assert_eq!(points(-4.0), "-4 pts");
    }

    #[test]
    fn roster_marks_blank_slots() {
        let roster = Roster::with_names(["Asha", ""]);
        assert_eq!(roster_lines(&roster), vec!["1. Asha", "2. (blank)"]);
    }

    #[test]
    fn history_lists_each_round() {
        let players = seat_players(["A", "B"]);
        let history = vec![
            RoundResult::from_inputs(&[5, 4], &[6, 10]),
            RoundResult::from_inputs(&[3, 6], &[2, 6]),
        ];
        assert_eq!(
            history_lines(&players, &history),
            vec![
                "Round 1: A: 5.5 pts  B: -4 pts",
                "Round 2: A: -3 pts  B: 6 pts",
            ]
        );
    }

    #[test]
    fn standings_mark_the_top_position() {
        let players = seat_players(["A", "B"]);
        let ranking = Ranking::from_totals(&players, &[2.0, 2.5]);
        assert_eq!(
            standings_lines(&ranking),
            vec!["*1. B 2.5 pts", " 2. A 2 pts"]
        );
    }

    #[test]
    fn status_shows_phase_and_inputs() {
        let mut session = ScoringSession::new(seat_players(["A", "B"]));
        session.set_guess(Seat::new(0), "3").unwrap();
        assert_eq!(
            status_lines(&session),
            vec!["Round 1 (Guessing)", "  A: guess 3", "  B: guess -"]
        );

        session.set_guess(Seat::new(1), "2").unwrap();
        session.lock_guesses().unwrap();
        session.set_obtained(Seat::new(1), "4").unwrap();
        assert_eq!(
            status_lines(&session),
            vec![
                "Round 1 (Locked)",
                "  A: guess 3, obtained -",
                "  B: guess 2, obtained 4",
            ]
        );
    }
}
