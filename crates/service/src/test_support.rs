#![cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use models::db::{connect_with_config, DatabaseConfig};
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

use crate::db::{ConnectionProvider, PoolConnectionProvider, ScopedConnection};
use crate::errors::MemoError;
use crate::memo::service::MemoService;

/// Throwaway SQLite store holding an empty `Memo` table.
/// The directory lives as long as the struct.
pub struct TestStore {
    pub db: DatabaseConnection,
    pub _dir: TempDir,
}

pub async fn store_with_pool_size(max_connections: u32) -> anyhow::Result<TestStore> {
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("memos.db").display());
    let mut cfg = DatabaseConfig::with_url(url);
    cfg.max_connections = max_connections;
    cfg.min_connections = 1;
    cfg.acquire_timeout = Duration::from_secs(5);
    let db = connect_with_config(&cfg).await?;
    models::schema::create_memo_table(&db).await?;
    Ok(TestStore { db, _dir: dir })
}

pub async fn get_store() -> anyhow::Result<TestStore> {
    store_with_pool_size(4).await
}

/// Pool provider that counts how often a connection was requested.
pub struct CountingProvider {
    inner: PoolConnectionProvider,
    pub acquired: AtomicUsize,
}

impl CountingProvider {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectionProvider for CountingProvider {
    async fn acquire(&self) -> Result<ScopedConnection, MemoError> {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        self.inner.acquire().await
    }
}

pub fn counting_service(db: DatabaseConnection) -> (MemoService<CountingProvider>, Arc<CountingProvider>) {
    let provider = Arc::new(CountingProvider {
        inner: PoolConnectionProvider::new(db),
        acquired: AtomicUsize::new(0),
    });
    (MemoService::new(Arc::clone(&provider)), provider)
}
