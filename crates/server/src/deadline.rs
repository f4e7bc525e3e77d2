//! Per-call deadlines.
//!
//! The operation future is raced against the caller's deadline. When the
//! deadline wins the future is dropped, which aborts the in-flight store call
//! and hands its pinned connection back to the pool.

use std::future::Future;
use std::time::Duration;

use axum::http::HeaderMap;
use common::api::v1::DEADLINE_HEADER;
use service::MemoError;

use crate::errors::JsonApiError;

/// Deadline from the request header, capped by the server-wide limit.
/// Missing or unparsable headers fall back to the server-wide limit.
pub fn call_deadline(headers: &HeaderMap, server_limit: Duration) -> Duration {
    headers
        .get(DEADLINE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
        .map_or(server_limit, |d| d.min(server_limit))
}

pub async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T, JsonApiError>
where
    F: Future<Output = Result<T, MemoError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(res) => res.map_err(JsonApiError::from),
        Err(_) => Err(JsonApiError::deadline_exceeded(deadline)),
    }
}
