use std::ops::Deref;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::errors::MemoError;

/// Source of one store connection per incoming call.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    async fn acquire(&self) -> Result<ScopedConnection, MemoError>;
}

/// A pool connection pinned for the duration of one call.
///
/// `release` commits and hands the connection back. Dropping it instead
/// (early `?` return, cancelled future, panic) rolls back and also hands it
/// back, so no exit path keeps the connection checked out.
pub struct ScopedConnection {
    txn: DatabaseTransaction,
}

impl ScopedConnection {
    pub fn new(txn: DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn release(self) -> Result<(), MemoError> {
        self.txn
            .commit()
            .await
            .map_err(|e| MemoError::unknown("Failed to release database connection", e))
    }
}

impl Deref for ScopedConnection {
    type Target = DatabaseTransaction;

    fn deref(&self) -> &Self::Target {
        &self.txn
    }
}

/// Draws connections from the process-wide sea-orm pool.
#[derive(Clone)]
pub struct PoolConnectionProvider {
    db: DatabaseConnection,
}

impl PoolConnectionProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl ConnectionProvider for PoolConnectionProvider {
    async fn acquire(&self) -> Result<ScopedConnection, MemoError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| MemoError::unknown("Failed to connect to database", e))?;
        Ok(ScopedConnection::new(txn))
    }
}
