//! Transaction and configuration errors.
//!
//! Every refusal from the ledger or the player registry is one of these.
//! None is fatal: the operation that produced it changed nothing.

use thiserror::Error;

use super::player::PlayerId;
use super::Money;
use crate::board::TileId;

/// Why a ledger or registry operation was refused.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("unknown tile {0}")]
    UnknownTile(TileId),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("{0} cannot be owned")]
    NotOwnable(TileId),

    #[error("{tile} is already owned by {owner}")]
    AlreadyOwned { tile: TileId, owner: PlayerId },

    #[error("{player} does not own {tile}")]
    NotOwner { player: PlayerId, tile: TileId },

    #[error("{player} needs ${needed} but has ${available}")]
    InsufficientFunds {
        player: PlayerId,
        needed: Money,
        available: Money,
    },

    #[error("invalid amount ${0}")]
    InvalidAmount(Money),

    #[error("{0} cannot transact with themselves")]
    SelfTransaction(PlayerId),

    #[error("{player} does not hold the whole colour group of {tile}")]
    NotMonopoly { player: PlayerId, tile: TileId },

    #[error("{0} or its colour group carries houses")]
    HasImprovements(TileId),

    #[error("{0} already has a hotel")]
    ImprovementLimit(TileId),

    #[error("{0} has no houses to sell")]
    NoImprovements(TileId),

    #[error("{0} is listed more than once")]
    DuplicateTile(TileId),

    #[error("utility rent on {0} needs the dice total")]
    MissingDiceTotal(TileId),
}

impl TransactionError {
    /// True for the `InvalidTarget` family: an id that names nothing.
    #[must_use]
    pub fn is_invalid_target(&self) -> bool {
        matches!(self, Self::UnknownTile(_) | Self::UnknownPlayer(_))
    }
}

/// Rejected [`GameConfig`](super::GameConfig) values.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("player count must be 2-8, got {0}")]
    PlayerCount(usize),

    #[error("human count {humans} exceeds player count {players}")]
    HumanCount { humans: usize, players: usize },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: i64 },
}
