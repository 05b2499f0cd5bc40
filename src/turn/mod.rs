//! Turn controller: the per-turn state machine.
//!
//! ```text
//! AwaitingRoll ──roll──▶ (jail check) ──▶ move ──▶ resolve tile
//!      ▲                                             │
//!      │         no decision needed                  │
//!      ├─────────────────────────────────────────────┤
//!      │                                             ▼
//!      └──Buy / Decline / PayRent / EndTurn── AwaitingDecision
//! ```
//!
//! Movement and resolution run synchronously inside
//! [`TurnController::submit_roll`]; the only suspension point is a decision
//! on a Property, Railroad or Utility tile. A turn ends by handing off to
//! the next seat, or by granting the same player another roll after a
//! double that did not end in jail.

mod controller;
mod error;
mod outcome;
mod phase;

pub use controller::TurnController;
pub use error::TurnError;
pub use outcome::{
    ActionEffect, ActionOutcome, JailReason, JailRelease, RollOutcome, TurnEvent, TurnEvents,
};
pub use phase::{PendingDecision, TurnPhase};
