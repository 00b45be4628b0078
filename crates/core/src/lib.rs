//! Perfolio Core - Ledger domain and performance-index engines.
//!
//! This crate contains the core calculation logic for Perfolio: an
//! in-memory holdings ledger (accounts, portfolios, securities) and the
//! engines that turn a ledger plus a reporting period into day-by-day
//! performance series. It is persistence-agnostic; calculations are pure,
//! synchronous functions of an immutable ledger snapshot.

pub mod constants;
pub mod errors;
pub mod ledger;
pub mod performance;
pub mod snapshot;
pub mod utils;

// Re-export common types from the ledger and performance modules
pub use ledger::*;
pub use performance::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
