//! Player registry: balances, jail status and turn-order bookkeeping.
//!
//! Pure bookkeeping. The registry knows tile ids (positions, holdings) but
//! nothing about what the tiles are; the ledger and the turn controller
//! bring that knowledge.

pub mod registry;

pub use registry::{Player, PlayerRegistry};
