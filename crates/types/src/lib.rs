//! Fractal Respect core types
//!
//! Addresses, 256-bit token identifiers with their bit-packed codec, group
//! rankings, the shared error classification and the injected clock.

pub mod address;
pub mod clock;
pub mod error_kind;
pub mod ranking;
pub mod token_id;

pub use address::*;
pub use clock::*;
pub use error_kind::*;
pub use ranking::*;
pub use token_id::*;
