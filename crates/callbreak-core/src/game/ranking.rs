use crate::model::player::Player;
use serde::Serialize;

/// A single row of the standings table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub rank: usize,
    pub player: Player,
    pub total: f64,
}

impl Standing {
    pub fn is_top(&self) -> bool {
        self.rank == 1
    }
}

/// Players ordered by total, highest first. Equal totals keep seat order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ranking {
    standings: Vec<Standing>,
}

impl Ranking {
    pub fn from_totals(players: &[Player], totals: &[f64]) -> Self {
        let mut rows: Vec<(&Player, f64)> = players
            .iter()
            .map(|player| {
                let total = totals.get(player.seat().index()).copied().unwrap_or(0.0);
                (player, total)
            })
            .collect();
        // Stable: ties keep seat order.
        rows.sort_by(|a, b| b.1.total_cmp(&a.1));

        let standings = rows
            .into_iter()
            .enumerate()
            .map(|(index, (player, total))| Standing {
                rank: index + 1,
                player: player.clone(),
                total,
            })
            .collect();
        Self { standings }
    }

    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    pub fn leader(&self) -> Option<&Standing> {
        self.standings.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Standing> {
        self.standings.iter()
    }
}
