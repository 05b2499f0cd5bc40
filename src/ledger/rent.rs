//! Rent computation and collection.
//!
//! Rent is a pure function of the ownership state, plus the dice total for
//! utilities. Collection is capped at what the payer holds: rent alone never
//! drives a balance below zero, and the shortfall is simply forgiven.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::book::PropertyLedger;
use crate::board::{TileId, TileKind};
use crate::core::{Money, PlayerId, TransactionError};
use crate::players::PlayerRegistry;

/// Rent actually moved between two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentPayment {
    pub payer: PlayerId,
    pub owner: PlayerId,
    pub tile: TileId,
    /// Full rent due.
    pub owed: Money,
    /// What the payer could cover; `paid <= owed`.
    pub paid: Money,
}

impl RentPayment {
    #[must_use]
    pub fn shortfall(&self) -> Money {
        self.owed - self.paid
    }
}

impl PropertyLedger {
    /// Rent due on `tile` right now.
    ///
    /// - Street: tiered rent if built on, monopoly rent if the owner holds
    ///   the whole group, base rent otherwise.
    /// - Railroad: by how many railroads the owner holds.
    /// - Utility: `dice_total` times the one- or both-utility multiplier.
    ///
    /// Unowned tiles and non-revenue kinds (Go, taxes, corners, cards) are 0.
    pub fn compute_rent(
        &self,
        tile: TileId,
        dice_total: Option<u8>,
    ) -> Result<Money, TransactionError> {
        let found = self.board().get(tile).ok_or(TransactionError::UnknownTile(tile))?;
        let Some(owner) = self.owner(tile) else {
            return Ok(0);
        };

        let rent = match found.kind {
            TileKind::Property(deed) => {
                let houses = self.houses(tile);
                if houses > 0 {
                    deed.rent.at_level(houses)
                } else if self.has_monopoly(owner, deed.group) {
                    deed.rent.monopoly
                } else {
                    deed.rent.base
                }
            }
            TileKind::Railroad(deed) => {
                let held = self.count_owned(owner, self.board().railroads());
                deed.rent_by_count[held.clamp(1, 4) - 1]
            }
            TileKind::Utility(deed) => {
                let total = dice_total.ok_or(TransactionError::MissingDiceTotal(tile))?;
                let multiplier = if self.count_owned(owner, self.board().utilities()) >= 2 {
                    deed.both
                } else {
                    deed.one
                };
                Money::from(total) * multiplier
            }
            _ => 0,
        };
        Ok(rent)
    }

    /// Collect rent from `payer` for landing on `tile`.
    ///
    /// Returns `None` when nothing is due: the tile is unowned or the payer
    /// owns it. Otherwise moves `min(balance, rent)` from payer to owner.
    pub fn pay_rent(
        &mut self,
        players: &mut PlayerRegistry,
        payer: PlayerId,
        tile: TileId,
        dice_total: Option<u8>,
    ) -> Result<Option<RentPayment>, TransactionError> {
        players.get(payer)?;
        self.board().get(tile).ok_or(TransactionError::UnknownTile(tile))?;
        let owner = match self.owner(tile) {
            Some(owner) if owner != payer => owner,
            _ => return Ok(None),
        };
        let owed = self.compute_rent(tile, dice_total)?;

        let paid = owed.min(players.balance(payer)?.max(0));
        players.credit(owner, paid)?;
        players.debit_capped(payer, paid)?;

        debug!(payer = %payer, owner = %owner, tile = %tile, owed, paid, "rent collected");
        Ok(Some(RentPayment { payer, owner, tile, owed, paid }))
    }
}
