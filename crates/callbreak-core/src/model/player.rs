use core::fmt;
use serde::{Deserialize, Serialize};

/// Position of a player in the roster, counted from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seat(usize);

impl Seat {
    pub const fn new(index: usize) -> Self {
        Seat(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }

    /// One-based number shown to users.
    pub const fn number(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.number())
    }
}

/// A participant, identified by display name. Names may repeat; the seat
/// keeps them apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    seat: Seat,
    name: String,
}

impl Player {
    pub fn new(seat: Seat, name: impl Into<String>) -> Self {
        Self {
            seat,
            name: name.into(),
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builds a seated roster from names in order.
pub fn seat_players<I, S>(names: I) -> Vec<Player>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .enumerate()
        .map(|(index, name)| Player::new(Seat::new(index), name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Player, Seat, seat_players};

    #[test]
    fn seat_number_is_one_based() {
        assert_eq!(Seat::new(0).number(), 1);
        assert_eq!(Seat::new(3).to_string(), "#4");
    }

    #[test]
    fn seat_players_preserves_order() {
        let players = seat_players(["Asha", "Bikash", "Asha"]);
        assert_eq!(players.len(), 3);
        assert_eq!(players[2], Player::new(Seat::new(2), "Asha"));
        assert_ne!(players[0], players[2]);
    }

    #[test]
    fn display_uses_name() {
        let player = Player::new(Seat::new(1), "Chandra");
        assert_eq!(player.to_string(), "Chandra");
    }
}
