//! Error types for respect issuance

use respect_distribution::DistributionError;
use respect_ledger::LedgerError;
use respect_types::{Address, ErrorKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssuanceError {
    #[error("Unauthorized: {caller} may not {action}")]
    Unauthorized {
        caller: Address,
        action: &'static str,
    },

    #[error("Ranks submitted too early: now {now}, next submission allowed at {next_allowed}")]
    TooEarly { now: u64, next_allowed: u64 },

    #[error("Period number overflow")]
    PeriodOverflow,

    #[error("Zero address is not allowed as {role}")]
    ZeroAddress { role: &'static str },

    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl IssuanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IssuanceError::Unauthorized { .. } => ErrorKind::Authorization,
            IssuanceError::TooEarly { .. } => ErrorKind::Timing,
            IssuanceError::PeriodOverflow | IssuanceError::ZeroAddress { .. } => {
                ErrorKind::Validation
            }
            IssuanceError::Distribution(err) => err.kind(),
            IssuanceError::Ledger(err) => err.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IssuanceError>;
