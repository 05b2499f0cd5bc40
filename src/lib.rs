//! # board-ledger
//!
//! Turn resolution and property economy for a 40-tile property-trading
//! board game.
//!
//! ## Design Principles
//!
//! 1. **One owner of ownership**: the [`PropertyLedger`] holds the only
//!    tile → owner map. Players carry a set of tile ids and never point
//!    into ledger data.
//!
//! 2. **All or nothing**: every ledger and registry operation checks its
//!    preconditions before touching state. A refusal is a typed error and
//!    changes nothing.
//!
//! 3. **External randomness and decisions**: the engine consumes dice from
//!    a [`DiceSource`] and decisions as typed [`Action`]s. It never rolls,
//!    prompts or renders.
//!
//! ## Architecture
//!
//! - **Turn state machine**: [`TurnController`] runs a roll through jail
//!   handling, movement, Go payout and tile resolution, stopping only at a
//!   decision point on purchasable tiles.
//!
//! - **Persistent Data Structures**: holdings and history use `im`, so a
//!   whole table clones cheaply for bot look-ahead.
//!
//! ## Modules
//!
//! - `core`: player ids, dice, configuration, actions, errors
//! - `board`: tiles, deeds and the Glasgow board
//! - `ledger`: ownership, rent, sales, trades, improvements
//! - `players`: balances, positions, jail and doubles counters
//! - `turn`: the turn controller
//! - `agents`: bot policies and a whole-turn driver
//! - `view`: serializable table snapshot
//! - `sync`: mutex-guarded table for multi-threaded hosts

pub mod core;
pub mod board;
pub mod ledger;
pub mod players;
pub mod turn;
pub mod agents;
pub mod view;
pub mod sync;

// Re-export commonly used types
pub use crate::core::{
    Money, PlayerId, PlayerMap,
    DiceRoll, DiceSource, DiceState, ScriptedDice, SeededDice,
    BailMovement, GameConfig,
    Action, ActionRecord, TileBundle, TradeOffer,
    ConfigError, TransactionError,
};

pub use crate::board::{Board, BoardError, ColorGroup, Tile, TileId, TileKind};

pub use crate::ledger::{OwnershipRecord, PropertyLedger, RentPayment};

pub use crate::players::{Player, PlayerRegistry};

pub use crate::turn::{
    ActionEffect, ActionOutcome, JailReason, JailRelease, PendingDecision,
    RollOutcome, TurnController, TurnError, TurnEvent, TurnPhase,
};

pub use crate::agents::{play_turn, DecisionPolicy, GreedyBuyer, PassivePolicy, RandomPolicy};

pub use crate::view::{PlayerView, TableView, TransactionReport};

pub use crate::sync::SharedTable;
