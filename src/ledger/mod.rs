//! Property ledger: the single source of truth for who owns what.
//!
//! The ledger holds one [`OwnershipRecord`] per Property, Railroad and
//! Utility tile, indexed by tile id. Players hold only a set of ids; they
//! never point into ledger data. Every ledger operation validates all of
//! its preconditions before touching state, so a refused operation is
//! always a no-op.
//!
//! - `book.rs`: lookups, purchase, sale, improvements
//! - `rent.rs`: monopoly-aware rent and capped rent collection
//! - `trade.rs`: atomic multi-asset exchange

pub mod record;
mod book;
mod rent;
mod trade;

pub use book::PropertyLedger;
pub use record::{OwnershipRecord, HOTEL};
pub use rent::RentPayment;
