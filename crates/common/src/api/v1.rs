//! API `v1` messages exchanged between memo clients and the server.
//!
//! Every request carries an `api` string. An empty string means the caller
//! does not pin a version; any other value must equal [`API_VERSION`].
//! Every response echoes [`API_VERSION`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// API version served by this protocol module.
pub const API_VERSION: &str = "v1";

/// Request header carrying the caller's remaining deadline in milliseconds.
pub const DEADLINE_HEADER: &str = "x-request-timeout-ms";

/// Point in time as seconds and nanoseconds since the Unix epoch, UTC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    #[serde(default)]
    pub nanos: i32,
}

impl Timestamp {
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub reminder: Option<Timestamp>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMemoRequest {
    #[serde(default)]
    pub api: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub reminder: Option<Timestamp>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMemoResponse {
    pub api: String,
    pub id: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadMemoRequest {
    #[serde(default)]
    pub api: String,
    pub id: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadMemoResponse {
    pub api: String,
    pub memo: Memo,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMemoRequest {
    #[serde(default)]
    pub api: String,
    /// Target memo. The HTTP transport fills this from the request path.
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub reminder: Option<Timestamp>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMemoResponse {
    pub api: String,
    pub updated: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteMemoRequest {
    #[serde(default)]
    pub api: String,
    pub id: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteMemoResponse {
    pub api: String,
    pub deleted: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadAllRequest {
    #[serde(default)]
    pub api: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadAllResponse {
    pub api: String,
    pub memos: Vec<Memo>,
}

/// Caller-facing status code attached to every failed call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Code {
    Unknown,
    InvalidArgument,
    NotFound,
    Unimplemented,
    DeadlineExceeded,
}

impl Code {
    pub fn as_str(&self) -> &'static str {
        match self {
            Code::Unknown => "UNKNOWN",
            Code::InvalidArgument => "INVALID_ARGUMENT",
            Code::NotFound => "NOT_FOUND",
            Code::Unimplemented => "UNIMPLEMENTED",
            Code::DeadlineExceeded => "DEADLINE_EXCEEDED",
        }
    }

    /// Whether a caller may reasonably retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Code::Unknown | Code::DeadlineExceeded)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body of every non-2xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: Code,
    pub message: String,
}
