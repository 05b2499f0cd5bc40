//! What a roll or an action did, in the order it happened.
//!
//! Presentation layers replay these events (token slides, balance flashes)
//! instead of diffing table state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::phase::PendingDecision;
use crate::board::TileId;
use crate::core::{DiceRoll, Money, PlayerId};
use crate::ledger::RentPayment;

/// Ordered event list; a typical roll produces three to six.
pub type TurnEvents = SmallVec<[TurnEvent; 8]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JailRelease {
    Doubles,
    Fine { amount: Money },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JailReason {
    ConsecutiveDoubles,
    GoToJailTile,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    Rolled { player: PlayerId, roll: DiceRoll },
    ReleasedFromJail { player: PlayerId, how: JailRelease },
    /// Still jailed. `fine_unpaid` is set when the forced fine bounced.
    StayedInJail { player: PlayerId, turns_served: u8, fine_unpaid: bool },
    Moved { player: PlayerId, from: TileId, to: TileId, steps: u8 },
    PassedGo { player: PlayerId, payout: Money },
    SentToJail { player: PlayerId, reason: JailReason },
    TaxPaid { player: PlayerId, tile: TileId, amount: Money },
    /// The player could not cover the tax; nothing was taken.
    TaxUnpaid { player: PlayerId, tile: TileId, amount: Money },
    RentPaid(RentPayment),
    DecisionOpened(PendingDecision),
    ExtraTurn { player: PlayerId },
    TurnPassed { from: PlayerId, next: PlayerId },
}

/// Everything one roll set in motion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub player: PlayerId,
    pub roll: DiceRoll,
    pub events: TurnEvents,
}

impl RollOutcome {
    pub(crate) fn new(player: PlayerId, roll: DiceRoll) -> Self {
        let mut events = TurnEvents::new();
        events.push(TurnEvent::Rolled { player, roll });
        Self { player, roll, events }
    }

    /// Final tile reached by movement, if the player moved.
    #[must_use]
    pub fn landed_on(&self) -> Option<TileId> {
        self.events.iter().find_map(|e| match e {
            TurnEvent::Moved { to, .. } => Some(*to),
            _ => None,
        })
    }

    /// Number of Go payouts this roll produced.
    #[must_use]
    pub fn go_payouts(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TurnEvent::PassedGo { .. }))
            .count()
    }

    #[must_use]
    pub fn rent(&self) -> Option<&RentPayment> {
        self.events.iter().find_map(|e| match e {
            TurnEvent::RentPaid(payment) => Some(payment),
            _ => None,
        })
    }

    #[must_use]
    pub fn sent_to_jail(&self) -> Option<JailReason> {
        self.events.iter().find_map(|e| match e {
            TurnEvent::SentToJail { reason, .. } => Some(*reason),
            _ => None,
        })
    }

    #[must_use]
    pub fn decision(&self) -> Option<&PendingDecision> {
        self.events.iter().find_map(|e| match e {
            TurnEvent::DecisionOpened(pending) => Some(pending),
            _ => None,
        })
    }

    #[must_use]
    pub fn grants_extra_turn(&self) -> bool {
        self.events.iter().any(|e| matches!(e, TurnEvent::ExtraTurn { .. }))
    }

    /// The seat that rolls next, if the turn was handed off.
    #[must_use]
    pub fn passed_to(&self) -> Option<PlayerId> {
        self.events.iter().find_map(|e| match e {
            TurnEvent::TurnPassed { next, .. } => Some(*next),
            _ => None,
        })
    }
}

/// The ledger effect of an accepted action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionEffect {
    Purchased { tile: TileId, cost: Money },
    Declined { tile: TileId },
    RentAcknowledged { tile: TileId },
    SoldToBank { tile: TileId, proceeds: Money },
    SoldToPlayer { tile: TileId, buyer: PlayerId, price: Money },
    Traded { counterparty: PlayerId },
    HouseBuilt { tile: TileId, level: u8 },
    HouseSold { tile: TileId, refund: Money },
    TurnEnded,
}

/// Result of [`TurnController::apply`](super::TurnController::apply).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub effect: ActionEffect,
    /// Hand-off events when the action closed a decision.
    pub events: TurnEvents,
}

impl ActionOutcome {
    pub(crate) fn new(effect: ActionEffect) -> Self {
        Self {
            effect,
            events: TurnEvents::new(),
        }
    }

    /// Whether the action ended the decision point.
    #[must_use]
    pub fn closed_decision(&self) -> bool {
        !self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_outcome_queries() {
        let player = PlayerId::new(0);
        let roll = DiceRoll::new(1, 1).unwrap();
        let mut outcome = RollOutcome::new(player, roll);
        assert_eq!(outcome.landed_on(), None);

        outcome.events.push(TurnEvent::Moved {
            player,
            from: TileId::new(39),
            to: TileId::new(1),
            steps: 2,
        });
        outcome.events.push(TurnEvent::PassedGo { player, payout: 200 });
        outcome.events.push(TurnEvent::ExtraTurn { player });

        assert_eq!(outcome.landed_on(), Some(TileId::new(1)));
        assert_eq!(outcome.go_payouts(), 1);
        assert!(outcome.grants_extra_turn());
        assert_eq!(outcome.passed_to(), None);
        assert_eq!(outcome.sent_to_jail(), None);
    }

    #[test]
    fn test_outcome_serialization() {
        let player = PlayerId::new(1);
        let mut outcome = RollOutcome::new(player, DiceRoll::new(4, 6).unwrap());
        outcome.events.push(TurnEvent::SentToJail { player, reason: JailReason::GoToJailTile });

        let json = serde_json::to_string(&outcome).unwrap();
        let restored: RollOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, restored);
    }
}
