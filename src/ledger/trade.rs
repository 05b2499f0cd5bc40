//! Atomic multi-asset exchange between two players.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::book::PropertyLedger;
use crate::board::TileId;
use crate::core::{Money, PlayerId, TransactionError};
use crate::players::PlayerRegistry;

impl PropertyLedger {
    /// Swap `from_a` for `from_b` and settle both money legs, all or nothing.
    ///
    /// Every tile must be owned by its stated side and sit in an unimproved
    /// colour group; each money leg must be non-negative and covered by the
    /// payer's balance *before* the exchange. Nothing is touched until all of
    /// that holds.
    #[allow(clippy::too_many_arguments)]
    pub fn trade_bundles(
        &mut self,
        players: &mut PlayerRegistry,
        a: PlayerId,
        b: PlayerId,
        from_a: &[TileId],
        from_b: &[TileId],
        money_a_to_b: Money,
        money_b_to_a: Money,
    ) -> Result<(), TransactionError> {
        players.get(a)?;
        players.get(b)?;
        if a == b {
            return Err(TransactionError::SelfTransaction(a));
        }
        for amount in [money_a_to_b, money_b_to_a] {
            if amount < 0 {
                return Err(TransactionError::InvalidAmount(amount));
            }
        }
        if from_a.is_empty() && from_b.is_empty() && money_a_to_b == 0 && money_b_to_a == 0 {
            return Err(TransactionError::InvalidAmount(0));
        }

        let mut seen = FxHashSet::default();
        for &tile in from_a.iter().chain(from_b) {
            if !seen.insert(tile) {
                return Err(TransactionError::DuplicateTile(tile));
            }
        }
        for (owner, tiles) in [(a, from_a), (b, from_b)] {
            for &tile in tiles {
                self.ensure_owner(owner, tile)?;
                self.ensure_unimproved(tile)?;
            }
        }
        players.ensure_affordable(a, money_a_to_b)?;
        players.ensure_affordable(b, money_b_to_a)?;

        // Net money first: the only step left that can refuse, before any mutation.
        let net = money_a_to_b - money_b_to_a;
        if net > 0 {
            players.transfer(a, b, net)?;
        } else if net < 0 {
            players.transfer(b, a, -net)?;
        }
        for &tile in from_a {
            self.assign(players, tile, Some(b))?;
        }
        for &tile in from_b {
            self.assign(players, tile, Some(a))?;
        }

        debug!(
            a = %a,
            b = %b,
            tiles_from_a = from_a.len(),
            tiles_from_b = from_b.len(),
            money_a_to_b,
            money_b_to_a,
            "trade settled"
        );
        Ok(())
    }
}
