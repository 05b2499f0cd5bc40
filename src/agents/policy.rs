//! Bot decision policies.
//!
//! Policies are trait-based so a human front end and the bots answer the
//! controller the same way:
//! - `GreedyBuyer`: buys and builds while it keeps a cash reserve
//! - `PassivePolicy`: never buys, never builds
//! - `RandomPolicy`: uniform over the legal closing actions

use crate::core::{Action, Money, SeededDice};
use crate::turn::{PendingDecision, TurnController};

// =============================================================================
// Decision Policy
// =============================================================================

/// Supplies decisions for the active player.
pub trait DecisionPolicy {
    /// Answer an open decision point.
    ///
    /// Should return an action that closes the decision; anything else is
    /// applied and the decision is then ended.
    fn decide(&mut self, table: &TurnController, pending: &PendingDecision) -> Action;

    /// Management step before rolling. `None` means roll now.
    fn manage(&mut self, _table: &TurnController) -> Option<Action> {
        None
    }
}

/// Close a decision without buying: acknowledge rent, decline an unowned
/// tile, otherwise just end.
fn pass_on(table: &TurnController, pending: &PendingDecision) -> Action {
    if pending.rent.is_some() {
        Action::PayRent
    } else if table.ledger().owner(pending.tile).is_none() {
        Action::Decline
    } else {
        Action::EndTurn
    }
}

// =============================================================================
// Policies
// =============================================================================

/// Buys whatever it lands on and builds on completed groups, as long as
/// `reserve` stays in hand afterwards.
#[derive(Clone, Debug)]
pub struct GreedyBuyer {
    pub reserve: Money,
}

impl Default for GreedyBuyer {
    fn default() -> Self {
        Self { reserve: 100 }
    }
}

impl GreedyBuyer {
    fn keeps_reserve(&self, table: &TurnController, cost: Money) -> bool {
        let balance = table.players().active_player().balance;
        balance - cost >= self.reserve
    }
}

impl DecisionPolicy for GreedyBuyer {
    fn decide(&mut self, table: &TurnController, pending: &PendingDecision) -> Action {
        if table.is_for_sale(pending.tile) {
            let cost = table.board().tile(pending.tile).purchase_cost().unwrap_or(Money::MAX);
            if self.keeps_reserve(table, cost) {
                return Action::Buy;
            }
        }
        pass_on(table, pending)
    }

    fn manage(&mut self, table: &TurnController) -> Option<Action> {
        table.legal_actions().into_iter().find(|action| match *action {
            Action::BuildHouse { tile } => table
                .board()
                .tile(tile)
                .deed()
                .map_or(false, |deed| self.keeps_reserve(table, deed.house_cost)),
            _ => false,
        })
    }
}

/// Never spends on property.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassivePolicy;

impl DecisionPolicy for PassivePolicy {
    fn decide(&mut self, table: &TurnController, pending: &PendingDecision) -> Action {
        pass_on(table, pending)
    }
}

/// Picks uniformly among the legal actions that close the decision.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: SeededDice,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SeededDice::new(seed),
        }
    }
}

impl DecisionPolicy for RandomPolicy {
    fn decide(&mut self, table: &TurnController, pending: &PendingDecision) -> Action {
        let options: Vec<Action> = table
            .legal_actions()
            .into_iter()
            .filter(Action::closes_decision)
            .collect();
        self.rng
            .pick(options.len())
            .and_then(|i| options.get(i).cloned())
            .unwrap_or_else(|| pass_on(table, pending))
    }
}
