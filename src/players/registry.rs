//! Per-player state and the active-seat pointer.
//!
//! ## Holdings
//!
//! `Player::holdings` mirrors the ledger: `tile.owner == p ⟺ tile ∈ p.holdings`.
//! Only the ledger calls [`PlayerRegistry::add_holding`] and
//! [`PlayerRegistry::remove_holding`], always paired with the ownership
//! change, so the two sides never disagree.
//!
//! ## Debits
//!
//! [`PlayerRegistry::debit`] refuses to overdraw. The only path that takes
//! less than the amount owed is the ledger's capped rent, which goes
//! through [`PlayerRegistry::debit_capped`].

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::board::TileId;
use crate::core::{GameConfig, Money, PlayerId, PlayerMap, TransactionError};

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub balance: Money,
    pub is_human: bool,
    pub position: TileId,
    pub in_jail: bool,
    /// Failed double attempts during the current jail stay.
    pub jail_turns_served: u8,
    /// Doubles rolled so far this turn.
    pub consecutive_doubles: u8,
    /// Tiles this player owns.
    pub holdings: OrdSet<TileId>,
}

impl Player {
    fn new(id: PlayerId, balance: Money, is_human: bool) -> Self {
        Self {
            id,
            name: format!("{id}"),
            balance,
            is_human,
            position: TileId::GO,
            in_jail: false,
            jail_turns_served: 0,
            consecutive_doubles: 0,
            holdings: OrdSet::new(),
        }
    }

    #[must_use]
    pub fn owns(&self, tile: TileId) -> bool {
        self.holdings.contains(&tile)
    }
}

/// Authoritative balances and turn counters for every seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRegistry {
    players: PlayerMap<Player>,
    active: PlayerId,
}

impl PlayerRegistry {
    /// Seat `config.player_count` players on Go with the starting balance.
    ///
    /// The first `config.human_count` seats are human.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let players = PlayerMap::new(config.player_count, |id| {
            Player::new(id, config.starting_balance, id.index() < config.human_count)
        });
        Self {
            players,
            active: PlayerId::new(0),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().map(|(_, p)| p)
    }

    pub fn get(&self, id: PlayerId) -> Result<&Player, TransactionError> {
        self.players.get(id).ok_or(TransactionError::UnknownPlayer(id))
    }

    fn get_mut(&mut self, id: PlayerId) -> Result<&mut Player, TransactionError> {
        self.players.get_mut(id).ok_or(TransactionError::UnknownPlayer(id))
    }

    pub fn balance(&self, id: PlayerId) -> Result<Money, TransactionError> {
        Ok(self.get(id)?.balance)
    }

    /// Whether `id` exists and holds at least `amount`.
    #[must_use]
    pub fn can_afford(&self, id: PlayerId, amount: Money) -> bool {
        self.get(id).map_or(false, |p| p.balance >= amount)
    }

    /// Fails with `InsufficientFunds` unless `id` holds at least `amount`.
    pub fn ensure_affordable(&self, id: PlayerId, amount: Money) -> Result<(), TransactionError> {
        let available = self.balance(id)?;
        if available < amount {
            return Err(TransactionError::InsufficientFunds {
                player: id,
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    // === Money ===

    /// Add `amount` (non-negative) and return the new balance.
    pub fn credit(&mut self, id: PlayerId, amount: Money) -> Result<Money, TransactionError> {
        if amount < 0 {
            return Err(TransactionError::InvalidAmount(amount));
        }
        let player = self.get_mut(id)?;
        player.balance = player
            .balance
            .checked_add(amount)
            .ok_or(TransactionError::InvalidAmount(amount))?;
        Ok(player.balance)
    }

    /// Remove `amount` (non-negative) and return the new balance.
    ///
    /// Refuses, leaving the balance unchanged, if it would go negative.
    pub fn debit(&mut self, id: PlayerId, amount: Money) -> Result<Money, TransactionError> {
        if amount < 0 {
            return Err(TransactionError::InvalidAmount(amount));
        }
        self.ensure_affordable(id, amount)?;
        let player = self.get_mut(id)?;
        player.balance -= amount;
        Ok(player.balance)
    }

    /// Remove up to `amount`, stopping at zero. Returns what was taken.
    pub(crate) fn debit_capped(
        &mut self,
        id: PlayerId,
        amount: Money,
    ) -> Result<Money, TransactionError> {
        if amount < 0 {
            return Err(TransactionError::InvalidAmount(amount));
        }
        let player = self.get_mut(id)?;
        let taken = amount.min(player.balance.max(0));
        player.balance -= taken;
        Ok(taken)
    }

    /// Move `amount` from `from` to `to`. Both legs or neither.
    pub fn transfer(
        &mut self,
        from: PlayerId,
        to: PlayerId,
        amount: Money,
    ) -> Result<(), TransactionError> {
        if from == to {
            return Err(TransactionError::SelfTransaction(from));
        }
        let receiver = self.get(to)?.balance;
        if receiver.checked_add(amount).is_none() {
            return Err(TransactionError::InvalidAmount(amount));
        }
        self.debit(from, amount)?;
        self.credit(to, amount)?;
        Ok(())
    }

    // === Holdings (ledger only) ===

    pub(crate) fn add_holding(
        &mut self,
        id: PlayerId,
        tile: TileId,
    ) -> Result<(), TransactionError> {
        self.get_mut(id)?.holdings.insert(tile);
        Ok(())
    }

    pub(crate) fn remove_holding(
        &mut self,
        id: PlayerId,
        tile: TileId,
    ) -> Result<(), TransactionError> {
        self.get_mut(id)?.holdings.remove(&tile);
        Ok(())
    }

    // === Position and jail ===

    pub fn set_position(&mut self, id: PlayerId, tile: TileId) -> Result<(), TransactionError> {
        self.get_mut(id)?.position = tile;
        Ok(())
    }

    /// Teleport to `jail` and lock up. Clears the jail and doubles counters.
    pub fn send_to_jail(&mut self, id: PlayerId, jail: TileId) -> Result<(), TransactionError> {
        let player = self.get_mut(id)?;
        player.position = jail;
        player.in_jail = true;
        player.jail_turns_served = 0;
        player.consecutive_doubles = 0;
        Ok(())
    }

    pub fn release_from_jail(&mut self, id: PlayerId) -> Result<(), TransactionError> {
        let player = self.get_mut(id)?;
        player.in_jail = false;
        player.jail_turns_served = 0;
        player.consecutive_doubles = 0;
        Ok(())
    }

    /// Count a failed double attempt. Returns the new count.
    pub fn increment_jail_turns(&mut self, id: PlayerId) -> Result<u8, TransactionError> {
        let player = self.get_mut(id)?;
        player.jail_turns_served = player.jail_turns_served.saturating_add(1);
        Ok(player.jail_turns_served)
    }

    pub fn reset_jail_turns(&mut self, id: PlayerId) -> Result<(), TransactionError> {
        self.get_mut(id)?.jail_turns_served = 0;
        Ok(())
    }

    // === Doubles ===

    /// Count a double this turn. Returns the new count.
    pub fn increment_doubles(&mut self, id: PlayerId) -> Result<u8, TransactionError> {
        let player = self.get_mut(id)?;
        player.consecutive_doubles = player.consecutive_doubles.saturating_add(1);
        Ok(player.consecutive_doubles)
    }

    pub fn reset_doubles(&mut self, id: PlayerId) -> Result<(), TransactionError> {
        self.get_mut(id)?.consecutive_doubles = 0;
        Ok(())
    }

    // === Turn order ===

    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.active
    }

    #[must_use]
    pub fn active_player(&self) -> &Player {
        &self.players[self.active]
    }

    /// Hand the turn to the next seat, wrapping. Returns the new active seat.
    pub fn advance_active(&mut self) -> PlayerId {
        self.active = self.active.next(self.players.player_count());
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> PlayerRegistry {
        PlayerRegistry::new(&GameConfig::default().with_players(3, 1))
    }

    #[test]
    fn test_new_registry() {
        let reg = registry();
        assert_eq!(reg.player_count(), 3);
        assert_eq!(reg.active(), PlayerId::new(0));
        assert!(reg.get(PlayerId::new(0)).unwrap().is_human);
        assert!(!reg.get(PlayerId::new(1)).unwrap().is_human);
        for player in reg.iter() {
            assert_eq!(player.balance, 1500);
            assert_eq!(player.position, TileId::GO);
            assert!(player.holdings.is_empty());
        }
    }

    #[test]
    fn test_debit_refuses_overdraw() {
        let mut reg = registry();
        let p = PlayerId::new(1);

        assert_eq!(reg.debit(p, 1000), Ok(500));
        assert_eq!(
            reg.debit(p, 501),
            Err(TransactionError::InsufficientFunds { player: p, needed: 501, available: 500 })
        );
        assert_eq!(reg.balance(p), Ok(500));
        assert_eq!(reg.debit(p, -1), Err(TransactionError::InvalidAmount(-1)));
    }

    #[test]
    fn test_debit_capped_stops_at_zero() {
        let mut reg = registry();
        let p = PlayerId::new(2);

        reg.debit(p, 1450).unwrap();
        assert_eq!(reg.debit_capped(p, 200), Ok(50));
        assert_eq!(reg.balance(p), Ok(0));
        assert_eq!(reg.debit_capped(p, 10), Ok(0));
    }

    #[test]
    fn test_transfer() {
        let mut reg = registry();
        let (a, b) = (PlayerId::new(0), PlayerId::new(1));

        reg.transfer(a, b, 300).unwrap();
        assert_eq!(reg.balance(a), Ok(1200));
        assert_eq!(reg.balance(b), Ok(1800));

        assert_eq!(reg.transfer(a, a, 1), Err(TransactionError::SelfTransaction(a)));
        assert_eq!(
            reg.transfer(a, PlayerId::new(9), 1),
            Err(TransactionError::UnknownPlayer(PlayerId::new(9)))
        );
        assert_eq!(reg.balance(a), Ok(1200));
    }

    #[test]
    fn test_credit_refuses_overflow() {
        let mut reg = registry();
        let (a, b) = (PlayerId::new(0), PlayerId::new(1));

        assert_eq!(reg.credit(a, i64::MAX), Err(TransactionError::InvalidAmount(i64::MAX)));
        assert_eq!(reg.balance(a), Ok(1500));

        assert_eq!(reg.credit(b, i64::MAX - 1500), Ok(i64::MAX));
        assert_eq!(reg.transfer(a, b, 1), Err(TransactionError::InvalidAmount(1)));
        assert_eq!(reg.balance(a), Ok(1500));
        assert_eq!(reg.balance(b), Ok(i64::MAX));
    }

    #[test]
    fn test_unknown_player() {
        let mut reg = registry();
        let ghost = PlayerId::new(5);
        assert_eq!(reg.credit(ghost, 10), Err(TransactionError::UnknownPlayer(ghost)));
        assert!(!reg.can_afford(ghost, 0));
    }

    #[test]
    fn test_jail_cycle() {
        let mut reg = registry();
        let p = PlayerId::new(0);
        reg.increment_doubles(p).unwrap();

        reg.send_to_jail(p, TileId::new(10)).unwrap();
        let player = reg.get(p).unwrap();
        assert!(player.in_jail);
        assert_eq!(player.position, TileId::new(10));
        assert_eq!(player.consecutive_doubles, 0);

        assert_eq!(reg.increment_jail_turns(p), Ok(1));
        assert_eq!(reg.increment_jail_turns(p), Ok(2));
        reg.release_from_jail(p).unwrap();
        let player = reg.get(p).unwrap();
        assert!(!player.in_jail);
        assert_eq!(player.jail_turns_served, 0);
    }

    #[test]
    fn test_advance_active_wraps() {
        let mut reg = registry();
        assert_eq!(reg.advance_active(), PlayerId::new(1));
        assert_eq!(reg.advance_active(), PlayerId::new(2));
        assert_eq!(reg.advance_active(), PlayerId::new(0));
    }

    #[test]
    fn test_holdings() {
        let mut reg = registry();
        let p = PlayerId::new(1);
        reg.add_holding(p, TileId::new(3)).unwrap();
        assert!(reg.get(p).unwrap().owns(TileId::new(3)));
        reg.remove_holding(p, TileId::new(3)).unwrap();
        assert!(!reg.get(p).unwrap().owns(TileId::new(3)));
    }
}
