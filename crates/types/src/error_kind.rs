use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-facing classification shared by every error type in the workspace.
///
/// Each kind tells the caller what to do next: fix the input
/// (`Validation`, `DuplicateToken`, `OutOfRange`, `NotFound`), wait
/// (`Timing`), or retry with a different identity (`Authorization`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Authorization,
    Timing,
    Validation,
    DuplicateToken,
    NotFound,
    OutOfRange,
    UnsupportedOperation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ErrorKind::Authorization => "authorization",
            ErrorKind::Timing => "timing",
            ErrorKind::Validation => "validation",
            ErrorKind::DuplicateToken => "duplicate_token",
            ErrorKind::NotFound => "not_found",
            ErrorKind::OutOfRange => "out_of_range",
            ErrorKind::UnsupportedOperation => "unsupported_operation",
        };
        f.write_str(value)
    }
}
