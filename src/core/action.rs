//! Typed decision requests.
//!
//! A human UI or a bot answers the controller with an [`Action`]. The
//! controller checks the action against the current phase before any of it
//! reaches the ledger, so an action that makes no sense right now is a
//! caller-side `InvalidRequest` and never a half-applied transaction.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use super::Money;
use crate::board::TileId;

/// Tile list for one side of a trade. Most trades move one to three deeds.
pub type TileBundle = SmallVec<[TileId; 4]>;

/// One side-by-side exchange proposed by the active player.
///
/// `give` leaves the proposer, `receive` leaves the counterparty. Money
/// legs are non-negative; both may be set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradeOffer {
    pub counterparty: PlayerId,
    pub give: TileBundle,
    pub receive: TileBundle,
    pub money_given: Money,
    pub money_received: Money,
}

impl TradeOffer {
    /// Start an offer to `counterparty`.
    #[must_use]
    pub fn with(counterparty: PlayerId) -> Self {
        Self {
            counterparty,
            give: TileBundle::new(),
            receive: TileBundle::new(),
            money_given: 0,
            money_received: 0,
        }
    }

    #[must_use]
    pub fn give(mut self, tile: TileId) -> Self {
        self.give.push(tile);
        self
    }

    #[must_use]
    pub fn receive(mut self, tile: TileId) -> Self {
        self.receive.push(tile);
        self
    }

    #[must_use]
    pub fn pay(mut self, amount: Money) -> Self {
        self.money_given = amount;
        self
    }

    #[must_use]
    pub fn ask(mut self, amount: Money) -> Self {
        self.money_received = amount;
        self
    }
}

/// A decision supplied by the player (or bot) whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Buy the unowned tile the player just landed on.
    Buy,
    /// Leave the landed tile unbought and close the decision.
    Decline,
    /// Acknowledge rent already collected and close the decision.
    PayRent,
    SellToBank { tile: TileId },
    SellToPlayer { tile: TileId, buyer: PlayerId, price: Money },
    Trade(TradeOffer),
    BuildHouse { tile: TileId },
    SellHouse { tile: TileId },
    /// Close the decision without any further transaction.
    EndTurn,
}

impl Action {
    /// Whether this action closes a pending decision.
    #[must_use]
    pub fn closes_decision(&self) -> bool {
        matches!(self, Self::Buy | Self::Decline | Self::PayRent | Self::EndTurn)
    }

    /// Short tag for logs and error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Decline => "decline",
            Self::PayRent => "pay-rent",
            Self::SellToBank { .. } => "sell-to-bank",
            Self::SellToPlayer { .. } => "sell-to-player",
            Self::Trade(_) => "trade",
            Self::BuildHouse { .. } => "build-house",
            Self::SellHouse { .. } => "sell-house",
            Self::EndTurn => "end-turn",
        }
    }

    /// Management actions are allowed both before a roll and at a decision point.
    #[must_use]
    pub fn is_management(&self) -> bool {
        matches!(
            self,
            Self::SellToBank { .. }
                | Self::SellToPlayer { .. }
                | Self::Trade(_)
                | Self::BuildHouse { .. }
                | Self::SellHouse { .. }
        )
    }
}

/// An accepted action, in order, for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: Action,
    /// Turn number when the action was taken.
    pub turn: u32,
    /// Position within the whole game's history.
    pub sequence: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_offer_builder() {
        let offer = TradeOffer::with(PlayerId::new(2))
            .give(TileId::new(1))
            .give(TileId::new(3))
            .receive(TileId::new(5))
            .pay(100);

        assert_eq!(offer.counterparty, PlayerId::new(2));
        assert_eq!(offer.give.as_slice(), &[TileId::new(1), TileId::new(3)]);
        assert_eq!(offer.receive.as_slice(), &[TileId::new(5)]);
        assert_eq!(offer.money_given, 100);
        assert_eq!(offer.money_received, 0);
    }

    #[test]
    fn test_action_classification() {
        assert!(Action::Buy.closes_decision());
        assert!(Action::EndTurn.closes_decision());
        assert!(!Action::BuildHouse { tile: TileId::new(1) }.closes_decision());
        assert!(Action::SellToBank { tile: TileId::new(1) }.is_management());
        assert!(!Action::Decline.is_management());
        assert_eq!(Action::Trade(TradeOffer::with(PlayerId::new(1))).name(), "trade");
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::Trade(TradeOffer::with(PlayerId::new(1)).give(TileId::new(6)).ask(40));
        let json = serde_json::to_string(&action).unwrap();
        let restored: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, restored);
    }
}
