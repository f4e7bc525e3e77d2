//! Persistence model of the memo service.
//! - `memo`: sea-orm entity mapped onto the pre-existing `Memo` table.
//! - `db`: connection pool construction.

pub mod db;
pub mod memo;
#[cfg(any(test, feature = "test-schema"))]
pub mod schema;
