use respect_ledger::LedgerError;
use respect_types::ErrorKind;
use thiserror::Error;

/// Errors that can occur while turning rankings into mints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DistributionError {
    #[error("group {group_num} ranks {ranked} participants, at least {required} are required")]
    NotEnoughRanked {
        group_num: u8,
        ranked: usize,
        required: usize,
    },

    #[error("ledger rejected distribution: {0}")]
    Ledger(#[from] LedgerError),
}

impl DistributionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DistributionError::NotEnoughRanked { .. } => ErrorKind::Validation,
            DistributionError::Ledger(err) => err.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DistributionError>;
