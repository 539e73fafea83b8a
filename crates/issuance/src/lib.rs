//! Fractal Respect Issuance
//!
//! Gates who may issue respect and when. The issuer or the executor submits
//! one batch of group rankings per period, no sooner than `ranks_delay`
//! seconds after the previous batch; each accepted batch advances the period
//! counter by one and mints the period's respect tokens. A submission either
//! applies completely or leaves every piece of state as it was.
//!
//! [`FractalRespect`] is the entry point; it serializes all calls and exposes
//! the ledger's read views.

pub mod config;
pub mod controller;
pub mod errors;
pub mod respect;

pub use config::*;
pub use controller::*;
pub use errors::*;
pub use respect::{FractalRespect, IssuanceSnapshot, TokenMetadata};

pub use respect_distribution::{DistributionReport, RANKS_MINT_TYPE, RESPECT_SCALE};
