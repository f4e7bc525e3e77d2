//! Service layer of the memo RPC API.
//! - Checks the advisory API version of every request before touching the store.
//! - Pins one pooled connection per call and releases it on every exit path.
//! - Maps wire requests onto single SQL statements and store rows back onto wire memos.
//! - Classifies every failure into the `MemoError` taxonomy.

pub mod errors;
pub mod version;
pub mod timestamp;
pub mod db;
pub mod memo;
#[cfg(test)]
pub mod test_support;

pub use errors::MemoError;
pub use memo::service::{MemoService, PooledMemoService};
