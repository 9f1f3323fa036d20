#![deny(warnings)]
pub mod game;
pub mod model;

pub use game::notice::{LeaderNotice, NoticeTicket};
pub use game::ranking::{Ranking, Standing};
pub use game::session::{LeaderAnnouncement, RoundSummary, ScoringSession};
pub use game::sink::{RoundSink, SinkError};
pub use model::player::{Player, Seat};
pub use model::roster::{Roster, RosterError};
pub use model::round::{RoundError, RoundPhase, RoundResult};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "callbreak"
    }

    pub const fn codename() -> &'static str {
        "Score Keeper"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
