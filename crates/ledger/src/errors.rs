//! Error types for the token ledger

use respect_types::{Address, ErrorKind, TokenId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Token already exists: {token_id}")]
    DuplicateToken { token_id: TokenId },

    #[error("Token not found: {token_id}")]
    TokenNotFound { token_id: TokenId },

    #[error("Global token index {index} out of range (token supply {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Token index {index} out of range for owner {owner} (owns {len})")]
    OwnerIndexOutOfRange {
        owner: Address,
        index: usize,
        len: usize,
    },

    #[error("Token {token_id} must carry a non-zero value")]
    ZeroValue { token_id: TokenId },

    #[error("Token {token_id} does not encode owner {owner}")]
    OwnerMismatch { token_id: TokenId, owner: Address },

    #[error("Respect tokens are non-transferable")]
    TransferNotSupported,

    #[error("Ledger state is inconsistent: {0}")]
    Inconsistent(String),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::DuplicateToken { .. } => ErrorKind::DuplicateToken,
            LedgerError::TokenNotFound { .. } => ErrorKind::NotFound,
            LedgerError::IndexOutOfRange { .. } | LedgerError::OwnerIndexOutOfRange { .. } => {
                ErrorKind::OutOfRange
            }
            LedgerError::ZeroValue { .. }
            | LedgerError::OwnerMismatch { .. }
            | LedgerError::Inconsistent(_) => ErrorKind::Validation,
            LedgerError::TransferNotSupported => ErrorKind::UnsupportedOperation,
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
