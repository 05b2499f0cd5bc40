//! Bot players: decision policies and a turn driver.

mod policy;

pub use policy::{DecisionPolicy, GreedyBuyer, PassivePolicy, RandomPolicy};

use tracing::debug;

use crate::core::{Action, DiceSource};
use crate::turn::{RollOutcome, TurnController, TurnError};

/// Management actions a policy may take before one roll.
const MAX_MANAGEMENT_STEPS: usize = 32;

/// Play the active player's whole turn, extra rolls included, until the
/// table hands off to the next seat.
///
/// Returns one outcome per roll. A refused policy action is logged and the
/// decision is closed with `EndTurn`, so a bad policy cannot stall the table.
pub fn play_turn<D, P>(
    table: &mut TurnController,
    dice: &mut D,
    policy: &mut P,
) -> Result<Vec<RollOutcome>, TurnError>
where
    D: DiceSource + ?Sized,
    P: DecisionPolicy + ?Sized,
{
    let player = table.active_player();
    let mut rolls = Vec::new();

    while table.active_player() == player {
        for _ in 0..MAX_MANAGEMENT_STEPS {
            let Some(action) = policy.manage(table) else {
                break;
            };
            if let Err(err) = table.apply(action) {
                debug!(player = %player, error = %err, "management action refused");
                break;
            }
        }

        rolls.push(table.roll_with(dice)?);

        if let Some(pending) = table.pending().copied() {
            let action = policy.decide(table, &pending);
            if let Err(err) = table.apply(action) {
                debug!(player = %player, error = %err, "decision refused");
            }
            if table.pending().is_some() {
                table.apply(Action::EndTurn)?;
            }
        }
    }
    Ok(rolls)
}
