use std::{future::Future, time::Duration};

use axum::Router;
use configs::AppConfig;
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router over an already opened pool.
pub fn build_app(db: DatabaseConnection, request_timeout: Duration) -> Router {
    let state = ServerState::new(db, request_timeout);
    routes::build_router(state, build_cors())
}

/// Serve until `shutdown` resolves, then let in-flight calls finish.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Resolves on Ctrl+C / SIGINT.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!(event = "shutdown_signal", "shutting down memo server...");
}

/// Public entry: open the pool, bind, serve until interrupted, close the pool.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    run_until(cfg, shutdown_signal()).await
}

pub async fn run_until<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg).await?;
    let app = build_app(db.clone(), Duration::from_secs(cfg.server.request_timeout_secs));

    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "starting memo server");
    let served = serve(listener, app, shutdown).await;

    info!("memo server stopped; closing database pool");
    if let Err(e) = db.close().await {
        error!(error = %e, "failed to close database pool");
    }
    served
}
