use std::sync::Arc;

use common::api::v1::{
    CreateMemoRequest, CreateMemoResponse, DeleteMemoRequest, DeleteMemoResponse, Memo, ReadAllRequest,
    ReadAllResponse, ReadMemoRequest, ReadMemoResponse, UpdateMemoRequest, UpdateMemoResponse, API_VERSION,
};
use tracing::instrument;

use crate::db::{ConnectionProvider, PoolConnectionProvider};
use crate::errors::MemoError;
use crate::memo::repository;
use crate::timestamp;
use crate::version::check_api_version;

/// Memo RPC handlers.
///
/// Every call checks the API version, pins one connection, runs one
/// statement and releases the connection. No state is shared between calls
/// beyond the provider's pool; concurrent calls on the same id are ordered
/// by the store alone.
pub struct MemoService<P: ConnectionProvider> {
    provider: Arc<P>,
}

pub type PooledMemoService = MemoService<PoolConnectionProvider>;

fn to_wire_memo(row: models::memo::Model) -> Result<Memo, MemoError> {
    let reminder = timestamp::to_wire(&row.reminder)?;
    Ok(Memo {
        id: row.id,
        name: row.name,
        description: row.description,
        reminder: Some(reminder),
    })
}

impl<P: ConnectionProvider> MemoService<P> {
    pub fn new(provider: Arc<P>) -> Self { Self { provider } }

    #[instrument(level = "debug", skip_all, fields(api = %req.api))]
    pub async fn create(&self, req: CreateMemoRequest) -> Result<CreateMemoResponse, MemoError> {
        check_api_version(&req.api)?;
        let conn = self.provider.acquire().await?;
        let reminder = timestamp::to_storage(req.reminder.as_ref())?;
        let id = repository::insert_memo(&*conn, &req.name, &req.description, reminder).await?;
        conn.release().await?;
        Ok(CreateMemoResponse { api: API_VERSION.to_string(), id })
    }

    #[instrument(level = "debug", skip_all, fields(api = %req.api, id = req.id))]
    pub async fn read(&self, req: ReadMemoRequest) -> Result<ReadMemoResponse, MemoError> {
        check_api_version(&req.api)?;
        let conn = self.provider.acquire().await?;
        let row = repository::select_memo(&*conn, req.id).await?;
        conn.release().await?;
        Ok(ReadMemoResponse { api: API_VERSION.to_string(), memo: to_wire_memo(row)? })
    }

    #[instrument(level = "debug", skip_all, fields(api = %req.api, id = req.id))]
    pub async fn update(&self, req: UpdateMemoRequest) -> Result<UpdateMemoResponse, MemoError> {
        check_api_version(&req.api)?;
        let conn = self.provider.acquire().await?;
        let reminder = timestamp::to_storage(req.reminder.as_ref())?;
        let rows = repository::update_memo(&*conn, req.id, &req.name, &req.description, reminder).await?;
        if rows == 0 {
            return Err(MemoError::NotFound(req.id));
        }
        conn.release().await?;
        Ok(UpdateMemoResponse { api: API_VERSION.to_string(), updated: true })
    }

    #[instrument(level = "debug", skip_all, fields(api = %req.api, id = req.id))]
    pub async fn delete(&self, req: DeleteMemoRequest) -> Result<DeleteMemoResponse, MemoError> {
        check_api_version(&req.api)?;
        let conn = self.provider.acquire().await?;
        let rows = repository::delete_memo(&*conn, req.id).await?;
        if rows == 0 {
            return Err(MemoError::NotFound(req.id));
        }
        conn.release().await?;
        Ok(DeleteMemoResponse { api: API_VERSION.to_string(), deleted: true })
    }

    #[instrument(level = "debug", skip_all, fields(api = %req.api))]
    pub async fn read_all(&self, req: ReadAllRequest) -> Result<ReadAllResponse, MemoError> {
        check_api_version(&req.api)?;
        let conn = self.provider.acquire().await?;
        let rows = repository::select_all_memos(&*conn).await?;
        conn.release().await?;
        let memos = rows.into_iter().map(to_wire_memo).collect::<Result<Vec<_>, _>>()?;
        Ok(ReadAllResponse { api: API_VERSION.to_string(), memos })
    }
}
