//! Read-only table snapshot for presentation layers.
//!
//! Built after every state change; carries everything a UI needs to redraw
//! without touching the controller: whose turn it is, where they stand,
//! every balance and deed, and how the last request went.

use serde::{Deserialize, Serialize};

use crate::board::TileId;
use crate::core::{Money, PlayerId};
use crate::turn::{PendingDecision, TurnController};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub is_human: bool,
    pub balance: Money,
    pub position: TileId,
    pub in_jail: bool,
    pub holdings: Vec<TileId>,
}

/// Outcome of the last requested transaction, rendered for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReport {
    pub accepted: bool,
    pub summary: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub turn_number: u32,
    pub active_player: PlayerId,
    pub active_position: TileId,
    pub active_tile_name: String,
    pub active_tile_description: String,
    pub pending: Option<PendingDecision>,
    pub players: Vec<PlayerView>,
    pub last_transaction: Option<TransactionReport>,
}

impl TableView {
    #[must_use]
    pub fn capture(table: &TurnController) -> Self {
        let active = table.players().active_player();
        let tile = table.active_tile();

        let players = table
            .players()
            .iter()
            .map(|p| PlayerView {
                id: p.id,
                name: p.name.clone(),
                is_human: p.is_human,
                balance: p.balance,
                position: p.position,
                in_jail: p.in_jail,
                holdings: p.holdings.iter().copied().collect(),
            })
            .collect();

        let last_transaction = table.last_transaction().map(|result| match result {
            Ok(effect) => TransactionReport {
                accepted: true,
                summary: format!("{effect:?}"),
            },
            Err(err) => TransactionReport {
                accepted: false,
                summary: err.to_string(),
            },
        });

        Self {
            turn_number: table.turn_number(),
            active_player: active.id,
            active_position: active.position,
            active_tile_name: tile.name.clone(),
            active_tile_description: tile.describe(),
            pending: table.pending().copied(),
            players,
            last_transaction,
        }
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.id == id)
    }
}

impl TurnController {
    /// Snapshot for presentation.
    #[must_use]
    pub fn view(&self) -> TableView {
        TableView::capture(self)
    }
}
