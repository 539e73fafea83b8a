//! Consensus inputs logger
//!
//! Participants record the ranking their group agreed on, either in full or
//! as a Keccak-256 commitment. Entries are kept in submission order and are
//! never validated; they exist so rankings can be audited against what the
//! issuer later submits.

pub mod logger;
pub mod results;

pub use logger::*;
pub use results::*;
