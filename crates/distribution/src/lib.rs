//! Respect Distribution
//!
//! Turns a batch of group rankings for one period into respect token mints.
//! Each ranked slot earns a fixed amount from the Fibonacci reward scale;
//! the whole batch is validated before anything is minted.

pub mod distribution;
pub mod errors;

pub use distribution::*;
pub use errors::*;
