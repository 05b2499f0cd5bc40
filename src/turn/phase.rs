//! Where the active player's turn stands.

use serde::{Deserialize, Serialize};

use crate::board::TileId;
use crate::core::PlayerId;
use crate::ledger::RentPayment;

/// Open decision point after landing on a Property, Railroad or Utility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDecision {
    pub player: PlayerId,
    pub tile: TileId,
    /// Total of the roll that landed here.
    pub dice_total: u8,
    /// Whether closing the decision hands the same player another roll.
    pub extra_turn: bool,
    /// Rent already collected on arrival, if the tile belonged to someone else.
    pub rent: Option<RentPayment>,
}

/// Observable turn states.
///
/// Movement and tile resolution run to completion inside a single roll
/// submission, so between calls the turn is either waiting for dice or
/// waiting for the player's answer at a decision point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    AwaitingRoll,
    AwaitingDecision(PendingDecision),
}

impl TurnPhase {
    #[must_use]
    pub fn pending(&self) -> Option<&PendingDecision> {
        match self {
            Self::AwaitingDecision(pending) => Some(pending),
            Self::AwaitingRoll => None,
        }
    }

    #[must_use]
    pub fn is_awaiting_roll(&self) -> bool {
        matches!(self, Self::AwaitingRoll)
    }
}
