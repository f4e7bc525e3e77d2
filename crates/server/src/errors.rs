use std::time::Duration;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::api::v1::{Code, ErrorBody};
use service::MemoError;
use tracing::{error, warn};

/// Failed call as seen by HTTP clients: a status plus `{"code", "message"}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl JsonApiError {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self { status: status_for(code), body: ErrorBody { code, message: message.into() } }
    }

    pub fn deadline_exceeded(after: Duration) -> Self {
        Self::new(Code::DeadlineExceeded, format!("deadline of {}ms exceeded", after.as_millis()))
    }
}

pub fn status_for(code: Code) -> StatusCode {
    match code {
        Code::InvalidArgument => StatusCode::BAD_REQUEST,
        Code::NotFound => StatusCode::NOT_FOUND,
        Code::Unimplemented => StatusCode::NOT_IMPLEMENTED,
        Code::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        Code::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<MemoError> for JsonApiError {
    fn from(e: MemoError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

// Malformed bodies, ids and query strings never reach the service; they are
// still reported through the same code taxonomy.
impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        Self::new(Code::InvalidArgument, format!("malformed request body, error: {}", r.body_text()))
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self {
        Self::new(Code::InvalidArgument, format!("malformed memo id, error: {}", r.body_text()))
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(r: QueryRejection) -> Self {
        Self::new(Code::InvalidArgument, format!("malformed query, error: {}", r.body_text()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(code = %self.body.code, message = %self.body.message, "memo call failed");
        } else {
            warn!(code = %self.body.code, message = %self.body.message, "memo call rejected");
        }
        (self.status, Json(self.body)).into_response()
    }
}
