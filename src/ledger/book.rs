//! Ownership index, purchases, sales and improvements.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use super::record::{OwnershipRecord, HOTEL};
use crate::board::{Board, ColorGroup, Tile, TileId};
use crate::core::{Money, PlayerId, TransactionError};
use crate::players::PlayerRegistry;

/// Ownership and improvement state for every purchasable tile.
///
/// Operations that move money take the [`PlayerRegistry`] explicitly; the
/// ledger keeps both sides of the ownership relation in step.
///
/// ```
/// use std::sync::Arc;
/// use board_ledger::board::{Board, TileId};
/// use board_ledger::core::{GameConfig, PlayerId};
/// use board_ledger::ledger::PropertyLedger;
/// use board_ledger::players::PlayerRegistry;
///
/// let mut ledger = PropertyLedger::new(Arc::new(Board::classic()));
/// let mut players = PlayerRegistry::new(&GameConfig::default());
///
/// let cost = ledger.purchase(&mut players, PlayerId::new(0), TileId::new(1)).unwrap();
/// assert_eq!(cost, 60);
/// assert_eq!(ledger.owner(TileId::new(1)), Some(PlayerId::new(0)));
/// assert_eq!(players.balance(PlayerId::new(0)), Ok(1440));
/// ```
#[derive(Clone, Debug)]
pub struct PropertyLedger {
    board: Arc<Board>,
    pub(super) records: FxHashMap<TileId, OwnershipRecord>,
}

impl PropertyLedger {
    /// Every purchasable tile starts with the bank.
    #[must_use]
    pub fn new(board: Arc<Board>) -> Self {
        let records = board
            .ownable_tiles()
            .map(|tile| (tile.id, OwnershipRecord::default()))
            .collect();
        Self { board, records }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    // === Lookups ===

    /// The tile, provided it exists and can be owned.
    pub(super) fn ownable(&self, tile: TileId) -> Result<&Tile, TransactionError> {
        let found = self.board.get(tile).ok_or(TransactionError::UnknownTile(tile))?;
        if !found.is_ownable() {
            return Err(TransactionError::NotOwnable(tile));
        }
        Ok(found)
    }

    /// Ownership record of a purchasable tile.
    pub fn record(&self, tile: TileId) -> Result<&OwnershipRecord, TransactionError> {
        self.ownable(tile)?;
        self.records.get(&tile).ok_or(TransactionError::NotOwnable(tile))
    }

    /// Current owner, `None` for bank-held or non-purchasable tiles.
    #[must_use]
    pub fn owner(&self, tile: TileId) -> Option<PlayerId> {
        self.records.get(&tile).and_then(|r| r.owner)
    }

    /// Houses on a tile (5 = hotel); 0 for anything that isn't a street.
    #[must_use]
    pub fn houses(&self, tile: TileId) -> u8 {
        self.records.get(&tile).map_or(0, |r| r.houses)
    }

    /// Tiles owned by `player`, in loop order.
    #[must_use]
    pub fn owned_by(&self, player: PlayerId) -> Vec<TileId> {
        let mut tiles: Vec<_> = self
            .records
            .iter()
            .filter(|(_, r)| r.is_owned_by(player))
            .map(|(&t, _)| t)
            .collect();
        tiles.sort_unstable();
        tiles
    }

    /// How many of `tiles` are owned by `player`.
    pub(super) fn count_owned(&self, player: PlayerId, tiles: &[TileId]) -> usize {
        tiles.iter().filter(|&&t| self.owner(t) == Some(player)).count()
    }

    /// Whether `player` owns every street of `group`.
    #[must_use]
    pub fn has_monopoly(&self, player: PlayerId, group: ColorGroup) -> bool {
        let members = self.board.group_members(group);
        !members.is_empty() && self.count_owned(player, members) == members.len()
    }

    /// Whether any street of `group` carries houses.
    #[must_use]
    pub fn group_improved(&self, group: ColorGroup) -> bool {
        self.board
            .group_members(group)
            .iter()
            .any(|&t| self.houses(t) > 0)
    }

    /// Fails with `HasImprovements` if the tile's colour group is built on.
    ///
    /// Deeds only change hands bare; houses must be sold back first.
    pub(super) fn ensure_unimproved(&self, tile: TileId) -> Result<(), TransactionError> {
        match self.board.get(tile).and_then(Tile::deed) {
            Some(deed) if self.group_improved(deed.group) => {
                Err(TransactionError::HasImprovements(tile))
            }
            _ => Ok(()),
        }
    }

    /// Fails with `NotOwner` unless `player` owns `tile`.
    pub(super) fn ensure_owner(
        &self,
        player: PlayerId,
        tile: TileId,
    ) -> Result<(), TransactionError> {
        if self.record(tile)?.is_owned_by(player) {
            Ok(())
        } else {
            Err(TransactionError::NotOwner { player, tile })
        }
    }

    /// Move a tile between owners, updating both sides of the relation.
    ///
    /// Callers have already validated the tile and both players.
    pub(super) fn assign(
        &mut self,
        players: &mut PlayerRegistry,
        tile: TileId,
        new_owner: Option<PlayerId>,
    ) -> Result<(), TransactionError> {
        let record = self
            .records
            .get_mut(&tile)
            .ok_or(TransactionError::NotOwnable(tile))?;
        if let Some(previous) = record.owner {
            players.remove_holding(previous, tile)?;
        }
        record.owner = new_owner;
        if let Some(next) = new_owner {
            players.add_holding(next, tile)?;
        }
        Ok(())
    }

    /// Check that ledger ownership and player holdings agree everywhere.
    #[must_use]
    pub fn is_consistent_with(&self, players: &PlayerRegistry) -> bool {
        let ledger_side = self.records.iter().all(|(&tile, record)| match record.owner {
            Some(owner) => players.get(owner).map_or(false, |p| p.owns(tile)),
            None => players.iter().all(|p| !p.owns(tile)),
        });
        let player_side = players
            .iter()
            .all(|p| p.holdings.iter().all(|&t| self.owner(t) == Some(p.id)));
        ledger_side && player_side
    }

    // === Transactions ===

    /// Buy an unowned tile from the bank at its printed price.
    ///
    /// Returns the price paid.
    pub fn purchase(
        &mut self,
        players: &mut PlayerRegistry,
        player: PlayerId,
        tile: TileId,
    ) -> Result<Money, TransactionError> {
        players.get(player)?;
        let cost = self
            .ownable(tile)?
            .purchase_cost()
            .ok_or(TransactionError::NotOwnable(tile))?;
        if let Some(owner) = self.record(tile)?.owner {
            return Err(TransactionError::AlreadyOwned { tile, owner });
        }
        players.debit(player, cost)?;
        self.assign(players, tile, Some(player))?;

        debug!(player = %player, tile = %tile, cost, "tile purchased");
        Ok(cost)
    }

    /// Return a bare tile to the bank for half its price, rounded down.
    ///
    /// Returns the amount credited.
    pub fn sell_to_bank(
        &mut self,
        players: &mut PlayerRegistry,
        player: PlayerId,
        tile: TileId,
    ) -> Result<Money, TransactionError> {
        players.get(player)?;
        let cost = self
            .ownable(tile)?
            .purchase_cost()
            .ok_or(TransactionError::NotOwnable(tile))?;
        self.ensure_owner(player, tile)?;
        self.ensure_unimproved(tile)?;

        let proceeds = cost.div_euclid(2);
        players.credit(player, proceeds)?;
        self.assign(players, tile, None)?;

        debug!(player = %player, tile = %tile, proceeds, "tile sold to bank");
        Ok(proceeds)
    }

    /// Sell a bare tile to another player; the buyer pays the seller `price`.
    pub fn transfer_to_player(
        &mut self,
        players: &mut PlayerRegistry,
        seller: PlayerId,
        buyer: PlayerId,
        tile: TileId,
        price: Money,
    ) -> Result<(), TransactionError> {
        players.get(seller)?;
        players.get(buyer)?;
        if seller == buyer {
            return Err(TransactionError::SelfTransaction(seller));
        }
        if price <= 0 {
            return Err(TransactionError::InvalidAmount(price));
        }
        self.ensure_owner(seller, tile)?;
        self.ensure_unimproved(tile)?;
        players.ensure_affordable(buyer, price)?;

        players.transfer(buyer, seller, price)?;
        self.assign(players, tile, Some(buyer))?;

        debug!(seller = %seller, buyer = %buyer, tile = %tile, price, "tile sold to player");
        Ok(())
    }

    /// Add one house (the fifth is a hotel) to a street of a completed group.
    ///
    /// Returns the new improvement level. Building evenly across the group
    /// is not required.
    pub fn build_house(
        &mut self,
        players: &mut PlayerRegistry,
        player: PlayerId,
        tile: TileId,
    ) -> Result<u8, TransactionError> {
        players.get(player)?;
        let deed = *self.ownable(tile)?.deed().ok_or(TransactionError::NotOwnable(tile))?;
        self.ensure_owner(player, tile)?;
        if !self.has_monopoly(player, deed.group) {
            return Err(TransactionError::NotMonopoly { player, tile });
        }
        if self.houses(tile) >= HOTEL {
            return Err(TransactionError::ImprovementLimit(tile));
        }
        players.debit(player, deed.house_cost)?;

        let record = self
            .records
            .get_mut(&tile)
            .ok_or(TransactionError::NotOwnable(tile))?;
        record.houses += 1;
        let level = record.houses;

        debug!(player = %player, tile = %tile, level, cost = deed.house_cost, "house built");
        Ok(level)
    }

    /// Sell one house back to the bank for half its cost, rounded down.
    ///
    /// Returns the amount credited.
    pub fn sell_house(
        &mut self,
        players: &mut PlayerRegistry,
        player: PlayerId,
        tile: TileId,
    ) -> Result<Money, TransactionError> {
        players.get(player)?;
        let deed = *self.ownable(tile)?.deed().ok_or(TransactionError::NotOwnable(tile))?;
        self.ensure_owner(player, tile)?;
        if self.houses(tile) == 0 {
            return Err(TransactionError::NoImprovements(tile));
        }

        let refund = deed.house_cost.div_euclid(2);
        players.credit(player, refund)?;
        if let Some(record) = self.records.get_mut(&tile) {
            record.houses -= 1;
        }

        debug!(player = %player, tile = %tile, refund, "house sold");
        Ok(refund)
    }
}
