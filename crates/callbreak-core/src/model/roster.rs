use crate::model::player::{Player, seat_players};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("at least one player is required")]
    Empty,
    #[error("player {} has no name", .index + 1)]
    BlankName { index: usize },
    #[error("the last player slot cannot be removed")]
    LastPlayer,
    #[error("there is no player slot {}", .0 + 1)]
    NoSuchSlot(usize),
}

/// Editable list of name slots collected before play begins.
///
/// A new roster starts with one blank slot, and never drops below one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    slots: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            slots: vec![String::new()],
        }
    }

    /// Prefills the roster. An empty list yields the usual single blank slot.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slots: Vec<String> = names.into_iter().map(Into::into).collect();
        if slots.is_empty() {
            Self::new()
        } else {
            Self { slots }
        }
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Appends a slot and returns its index.
    pub fn add(&mut self, name: impl Into<String>) -> usize {
        self.slots.push(name.into());
        self.slots.len() - 1
    }

    pub fn rename(&mut self, index: usize, name: impl Into<String>) -> Result<(), RosterError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(RosterError::NoSuchSlot(index))?;
        *slot = name.into();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<String, RosterError> {
        if index >= self.slots.len() {
            return Err(RosterError::NoSuchSlot(index));
        }
        if self.slots.len() == 1 {
            return Err(RosterError::LastPlayer);
        }
        Ok(self.slots.remove(index))
    }

    /// Validates every slot and hands the seated players to the scoring engine.
    /// Names are trimmed; any blank name blocks the transition.
    pub fn start(&self) -> Result<Vec<Player>, RosterError> {
        if self.slots.is_empty() {
            return Err(RosterError::Empty);
        }
        if let Some(index) = self.slots.iter().position(|name| name.trim().is_empty()) {
            return Err(RosterError::BlankName { index });
        }
        let players = seat_players(self.slots.iter().map(|name| name.trim().to_string()));
        debug!(players = players.len(), "roster accepted");
        Ok(players)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}
