use std::fmt::Display;

use common::api::v1::Code;
use thiserror::Error;

/// Every failure a memo operation can report to its caller.
#[derive(Debug, Error)]
pub enum MemoError {
    #[error("unsupported API version: request version {requested} cannot be resolved by API version {supported}")]
    VersionMismatch { requested: String, supported: &'static str },
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Memo with ID={0} is not found")]
    NotFound(i64),
    /// Store connectivity, statement, decoding and internal invariant failures.
    #[error("{0}")]
    Unknown(String),
}

impl MemoError {
    /// `context, error: cause`
    pub fn unknown(context: &str, cause: impl Display) -> Self {
        Self::Unknown(format!("{context}, error: {cause}"))
    }

    pub fn invalid_argument(context: &str, cause: impl Display) -> Self {
        Self::InvalidArgument(format!("{context}, error: {cause}"))
    }

    /// Caller-facing status code.
    pub fn code(&self) -> Code {
        match self {
            MemoError::VersionMismatch { .. } => Code::Unimplemented,
            MemoError::InvalidArgument(_) => Code::InvalidArgument,
            MemoError::NotFound(_) => Code::NotFound,
            MemoError::Unknown(_) => Code::Unknown,
        }
    }
}
