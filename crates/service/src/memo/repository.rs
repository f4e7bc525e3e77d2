//! One SQL statement per memo operation.
//!
//! Each function runs against the caller's pinned connection and reports
//! store failures as `MemoError::Unknown`. Row-count policy (not found,
//! duplicates) is decided here only where the statement itself reveals it.

use chrono::{DateTime, Utc};
use models::memo::{self, Entity as MemoEntity};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect, Set};

use crate::errors::MemoError;

/// Insert a memo and return the id assigned by the store.
pub async fn insert_memo<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    description: &str,
    reminder: DateTime<Utc>,
) -> Result<i64, MemoError> {
    let am = memo::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        reminder: Set(reminder),
    };
    let res = MemoEntity::insert(am)
        .exec(conn)
        .await
        .map_err(|e| MemoError::unknown("Failed to insert into Memo", e))?;
    Ok(res.last_insert_id)
}

/// Select the single row with `id`.
///
/// A second matching row breaks the primary-key invariant and is reported
/// as `Unknown` rather than silently picking one.
pub async fn select_memo<C: ConnectionTrait>(conn: &C, id: i64) -> Result<memo::Model, MemoError> {
    let mut rows = MemoEntity::find()
        .filter(memo::Column::Id.eq(id))
        .limit(2)
        .all(conn)
        .await
        .map_err(|e| MemoError::unknown("Failed to select from Memo", e))?;
    match rows.len() {
        0 => Err(MemoError::NotFound(id)),
        1 => Ok(rows.remove(0)),
        _ => Err(MemoError::Unknown(format!("Found multiple Memo with ID={id}"))),
    }
}

/// Overwrite name, description and reminder of `id`; returns rows affected.
pub async fn update_memo<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    name: &str,
    description: &str,
    reminder: DateTime<Utc>,
) -> Result<u64, MemoError> {
    let res = MemoEntity::update_many()
        .col_expr(memo::Column::Name, Expr::value(name))
        .col_expr(memo::Column::Description, Expr::value(description))
        .col_expr(memo::Column::Reminder, Expr::value(reminder))
        .filter(memo::Column::Id.eq(id))
        .exec(conn)
        .await
        .map_err(|e| MemoError::unknown("Failed to update Memo", e))?;
    Ok(res.rows_affected)
}

/// Delete `id`; returns rows affected.
pub async fn delete_memo<C: ConnectionTrait>(conn: &C, id: i64) -> Result<u64, MemoError> {
    let res = MemoEntity::delete_many()
        .filter(memo::Column::Id.eq(id))
        .exec(conn)
        .await
        .map_err(|e| MemoError::unknown("Failed to delete from Memo", e))?;
    Ok(res.rows_affected)
}

/// Every row, in whatever order the store yields them.
pub async fn select_all_memos<C: ConnectionTrait>(conn: &C) -> Result<Vec<memo::Model>, MemoError> {
    MemoEntity::find()
        .all(conn)
        .await
        .map_err(|e| MemoError::unknown("Failed to select from Memo", e))
}
