//! Rejections from the turn controller.

use thiserror::Error;

use crate::core::{PlayerId, TransactionError};

/// Why the controller refused a roll or an action.
///
/// A refused request never changes table state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TurnError {
    /// A roll arrived while the previous one is still being resolved.
    #[error("{player} is at a decision point; roll rejected")]
    RollRejected { player: PlayerId },

    #[error("invalid die faces {0}+{1}")]
    InvalidDie(u8, u8),

    #[error("no decision is pending")]
    NoPendingDecision,

    /// The action makes no sense in the current phase.
    #[error("{action} is not available: {reason}")]
    InvalidRequest {
        action: &'static str,
        reason: &'static str,
    },

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}
