use axum::{extract::{Path, Query, State}, http::HeaderMap, Json};
use axum_extra::extract::WithRejection;
use common::api::v1::{
    CreateMemoRequest, CreateMemoResponse, DeleteMemoRequest, DeleteMemoResponse, ReadAllRequest, ReadAllResponse,
    ReadMemoRequest, ReadMemoResponse, UpdateMemoRequest, UpdateMemoResponse,
};
use serde::Deserialize;

use crate::deadline::{call_deadline, with_deadline};
use crate::errors::JsonApiError;
use crate::state::ServerState;

/// `?api=` on body-less calls.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApiQuery {
    /// Requested API version; empty accepts whatever the server serves
    #[serde(default)]
    pub api: String,
}

#[utoipa::path(
    post, path = "/v1/memo", tag = "memo",
    request_body = crate::openapi::CreateMemoRequestDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::CreateMemoResponseDoc),
        (status = 400, description = "Malformed body or reminder", body = crate::openapi::ErrorBodyDoc),
        (status = 501, description = "Unsupported API version", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    headers: HeaderMap,
    WithRejection(Json(req), _): WithRejection<Json<CreateMemoRequest>, JsonApiError>,
) -> Result<Json<CreateMemoResponse>, JsonApiError> {
    let deadline = call_deadline(&headers, state.request_timeout);
    with_deadline(deadline, state.memo_svc.create(req)).await.map(Json)
}

#[utoipa::path(
    get, path = "/v1/memo/{id}", tag = "memo",
    params(("id" = i64, Path, description = "Memo ID"), ApiQuery),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ReadMemoResponseDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc),
        (status = 501, description = "Unsupported API version", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn read(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, JsonApiError>,
    WithRejection(Query(q), _): WithRejection<Query<ApiQuery>, JsonApiError>,
    headers: HeaderMap,
) -> Result<Json<ReadMemoResponse>, JsonApiError> {
    let deadline = call_deadline(&headers, state.request_timeout);
    with_deadline(deadline, state.memo_svc.read(ReadMemoRequest { api: q.api, id })).await.map(Json)
}

#[utoipa::path(
    put, path = "/v1/memo/{id}", tag = "memo",
    params(("id" = i64, Path, description = "Memo ID")),
    request_body = crate::openapi::UpdateMemoRequestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::UpdateMemoResponseDoc),
        (status = 400, description = "Malformed body or reminder", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, JsonApiError>,
    headers: HeaderMap,
    WithRejection(Json(mut req), _): WithRejection<Json<UpdateMemoRequest>, JsonApiError>,
) -> Result<Json<UpdateMemoResponse>, JsonApiError> {
    // the path names the target, whatever the body says
    req.id = id;
    let deadline = call_deadline(&headers, state.request_timeout);
    with_deadline(deadline, state.memo_svc.update(req)).await.map(Json)
}

#[utoipa::path(
    delete, path = "/v1/memo/{id}", tag = "memo",
    params(("id" = i64, Path, description = "Memo ID"), ApiQuery),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::DeleteMemoResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, JsonApiError>,
    WithRejection(Query(q), _): WithRejection<Query<ApiQuery>, JsonApiError>,
    headers: HeaderMap,
) -> Result<Json<DeleteMemoResponse>, JsonApiError> {
    let deadline = call_deadline(&headers, state.request_timeout);
    with_deadline(deadline, state.memo_svc.delete(DeleteMemoRequest { api: q.api, id })).await.map(Json)
}

#[utoipa::path(
    get, path = "/v1/memo", tag = "memo",
    params(ApiQuery),
    responses(
        (status = 200, description = "All memos, unordered", body = crate::openapi::ReadAllResponseDoc),
        (status = 501, description = "Unsupported API version", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn read_all(
    State(state): State<ServerState>,
    WithRejection(Query(q), _): WithRejection<Query<ApiQuery>, JsonApiError>,
    headers: HeaderMap,
) -> Result<Json<ReadAllResponse>, JsonApiError> {
    let deadline = call_deadline(&headers, state.request_timeout);
    with_deadline(deadline, state.memo_svc.read_all(ReadAllRequest { api: q.api })).await.map(Json)
}
