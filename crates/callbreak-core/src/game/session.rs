use crate::game::notice::{LeaderNotice, NoticeTicket};
use crate::game::ranking::Ranking;
use crate::game::sink::RoundSink;
use crate::model::player::{Player, Seat};
use crate::model::round::{PhaseKind, RoundError, RoundPhase, RoundResult, RoundState};
use crate::model::score::ScoreBoard;
use core::fmt;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Who leads after a round, and by how much.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderAnnouncement {
    pub player: Player,
    pub total: f64,
}

impl fmt::Display for LeaderAnnouncement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is leading with {} pts", self.player, self.total)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub round_number: usize,
    pub result: RoundResult,
    pub leader: Option<LeaderAnnouncement>,
    pub ticket: Option<NoticeTicket>,
}

/// Owns everything that happens after the roster is handed over: the round
/// in progress, the history of finished rounds, and the running totals.
pub struct ScoringSession {
    players: Vec<Player>,
    round: RoundState,
    history: Vec<RoundResult>,
    scores: ScoreBoard,
    notice: LeaderNotice<LeaderAnnouncement>,
    sink: Option<Box<dyn RoundSink>>,
}

impl ScoringSession {
    pub fn new(players: Vec<Player>) -> Self {
        let seats = players.len();
        info!(players = seats, "scoring session started");
        Self {
            players,
            round: RoundState::new(seats),
            history: Vec::new(),
            scores: ScoreBoard::new(seats),
            notice: LeaderNotice::default(),
            sink: None,
        }
    }

    pub fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice = LeaderNotice::new(duration);
        self
    }

    pub fn with_sink(mut self, sink: Box<dyn RoundSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> Option<&Player> {
        self.players.get(seat.index())
    }

    /// Resolves a one-based seat number or, failing that, the first player
    /// with a matching name.
    pub fn find_seat(&self, query: &str) -> Option<Seat> {
        let query = query.trim();
        if let Ok(number) = query.parse::<usize>() {
            if (1..=self.players.len()).contains(&number) {
                return Some(Seat::new(number - 1));
            }
        }
        self.players
            .iter()
            .find(|player| player.name() == query)
            .or_else(|| {
                self.players
                    .iter()
                    .find(|player| player.name().eq_ignore_ascii_case(query))
            })
            .map(Player::seat)
    }

    pub fn phase(&self) -> &RoundPhase {
        self.round.phase()
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.round.kind()
    }

    /// Number of the round currently being entered.
    pub fn round_number(&self) -> usize {
        self.history.len() + 1
    }

    pub fn history(&self) -> &[RoundResult] {
        &self.history
    }

    pub fn totals(&self) -> &[f64] {
        self.scores.standings()
    }

    pub fn total(&self, seat: Seat) -> f64 {
        self.scores.score(seat)
    }

    pub fn set_guess(&mut self, seat: Seat, value: &str) -> Result<(), RoundError> {
        self.round.set_guess(seat, value)?;
        debug!(seat = seat.number(), value, "guess entered");
        Ok(())
    }

    pub fn set_obtained(&mut self, seat: Seat, value: &str) -> Result<(), RoundError> {
        self.round.set_obtained(seat, value)?;
        debug!(seat = seat.number(), value, "obtained entered");
        Ok(())
    }

    pub fn lock_guesses(&mut self) -> Result<(), RoundError> {
        self.round.lock(&self.players)?;
        info!(
            round = self.round_number(),
            guesses = ?self.round.locked_guesses(),
            "guesses locked"
        );
        Ok(())
    }

    /// Scores the locked round, commits it to history and totals, and
    /// announces the new leader. On error nothing changes.
    pub fn submit_round(&mut self, now: Instant) -> Result<RoundSummary, RoundError> {
        let result = self.round.score(&self.players)?;
        let round_number = self.round_number();

        self.scores.apply_round(&result.scores());
        self.history.push(result.clone());
        self.round.reset(self.players.len());
        info!(
            round = round_number,
            scores = ?result.scores(),
            totals = ?self.scores.standings(),
            "round submitted"
        );

        if let Some(sink) = self.sink.as_mut() {
            if let Err(err) = sink.append_round(round_number, &self.players, &result) {
                warn!(round = round_number, error = %err, "round sink rejected result");
            }
        }

        let leader = self.leader();
        let ticket = leader
            .clone()
            .map(|announcement| self.notice.show(announcement, now));

        Ok(RoundSummary {
            round_number,
            result,
            leader,
            ticket,
        })
    }

    pub fn ranking(&self) -> Ranking {
        Ranking::from_totals(&self.players, self.scores.standings())
    }

    pub fn leader(&self) -> Option<LeaderAnnouncement> {
        self.ranking().leader().map(|standing| LeaderAnnouncement {
            player: standing.player.clone(),
            total: standing.total,
        })
    }

    /// Current leader notice, expired against `now`.
    pub fn notice(&mut self, now: Instant) -> Option<&LeaderAnnouncement> {
        self.notice.poll(now)
    }

    pub fn dismiss_notice(&mut self, ticket: NoticeTicket) -> bool {
        self.notice.dismiss(ticket)
    }
}

impl fmt::Debug for ScoringSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoringSession")
            .field("players", &self.players)
            .field("round", &self.round)
            .field("history", &self.history)
            .field("scores", &self.scores)
            .field("notice", &self.notice)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
