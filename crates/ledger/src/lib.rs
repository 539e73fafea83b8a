//! Respect Token Ledger
//!
//! Tracks every live respect token, its value and its owner, and keeps a
//! dense global index and a dense per-owner index of token ids so that
//! tokens can be enumerated by position. Mint, burn and positional lookup
//! are all O(1).
//!
//! Tokens are soulbound: the ledger has no transfer path.

pub mod enumerable;
pub mod errors;
pub mod ledger;

pub use enumerable::EnumerableSet;
pub use errors::*;
pub use ledger::{MintInstruction, TokenLedger, TokenMinter};
