use chrono::{DateTime, SecondsFormat, Utc};
use common::api::v1::{
    CreateMemoRequest, DeleteMemoRequest, Memo, ReadAllRequest, ReadMemoRequest, Timestamp, UpdateMemoRequest,
    API_VERSION,
};
use tracing::info;

use crate::memo_client::{ClientError, MemoClient};

/// What the demo saw, one field per call.
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub created_id: i64,
    pub read: Memo,
    pub updated: bool,
    pub all: Vec<Memo>,
    pub deleted: bool,
}

fn timestamp_of(now: DateTime<Utc>) -> Timestamp {
    Timestamp::new(now.timestamp(), now.timestamp_subsec_nanos() as i32)
}

/// RFC 3339 with as many fractional digits as the instant needs, none when whole.
fn rfc3339_nano(now: DateTime<Utc>) -> String {
    let full = now.to_rfc3339_opts(SecondsFormat::Nanos, false);
    let (stamp, _offset) = full.split_at(full.len() - "+00:00".len());
    format!("{}Z", stamp.trim_end_matches('0').trim_end_matches('.'))
}

/// Create, read, update, list and delete one memo, logging every response.
pub async fn run_demo(client: &MemoClient, now: DateTime<Utc>) -> Result<DemoReport, ClientError> {
    let reminder = Some(timestamp_of(now));

    let created = client
        .create(&CreateMemoRequest {
            api: API_VERSION.to_string(),
            name: "Memo sample".to_string(),
            description: rfc3339_nano(now),
            reminder,
        })
        .await?;
    info!(api = %created.api, id = created.id, "create result");

    let read = client.read(&ReadMemoRequest { api: API_VERSION.to_string(), id: created.id }).await?;
    info!(api = %read.api, memo = ?read.memo, "read result");

    let updated = client
        .update(&UpdateMemoRequest {
            api: API_VERSION.to_string(),
            id: read.memo.id,
            name: read.memo.name.clone(),
            description: format!("{}updated", read.memo.description),
            reminder: read.memo.reminder,
        })
        .await?;
    info!(api = %updated.api, updated = updated.updated, "update result");

    let all = client.read_all(&ReadAllRequest { api: API_VERSION.to_string() }).await?;
    info!(api = %all.api, count = all.memos.len(), "read all result");

    let deleted = client.delete(&DeleteMemoRequest { api: API_VERSION.to_string(), id: created.id }).await?;
    info!(api = %deleted.api, deleted = deleted.deleted, "delete result");

    Ok(DemoReport {
        created_id: created.id,
        read: read.memo,
        updated: updated.updated,
        all: all.memos,
        deleted: deleted.deleted,
    })
}
