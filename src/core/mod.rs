//! Core engine types: players, dice, configuration, actions, errors.
//!
//! These carry no board knowledge beyond tile ids and are shared by every
//! other module.

pub mod player;
pub mod dice;
pub mod config;
pub mod action;
pub mod error;

/// Currency amount. Signed so a forced payment can be reasoned about, but
/// steady-state balances are never negative.
pub type Money = i64;

pub use player::{PlayerId, PlayerMap};
pub use dice::{DiceRoll, DiceSource, DiceState, ScriptedDice, SeededDice};
pub use config::{BailMovement, GameConfig};
pub use action::{Action, ActionRecord, TileBundle, TradeOffer};
pub use error::{ConfigError, TransactionError};
