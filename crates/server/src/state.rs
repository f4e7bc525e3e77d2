use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use service::db::PoolConnectionProvider;
use service::PooledMemoService;

#[derive(Clone)]
pub struct ServerState {
    pub memo_svc: Arc<PooledMemoService>,
    /// Upper bound for every call; callers may ask for less.
    pub request_timeout: Duration,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, request_timeout: Duration) -> Self {
        let provider = Arc::new(PoolConnectionProvider::new(db));
        Self {
            memo_svc: Arc::new(PooledMemoService::new(provider)),
            request_timeout,
        }
    }
}
