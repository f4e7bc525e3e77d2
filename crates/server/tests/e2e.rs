use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use client::{run_demo, MemoClient};
use common::api::v1::{
    Code, CreateMemoRequest, DeleteMemoRequest, ReadAllRequest, ReadMemoRequest, Timestamp, UpdateMemoRequest,
};
use models::db::{connect_with_config, DatabaseConfig};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower::ServiceExt;

struct TestApp {
    addr: SocketAddr,
    client: MemoClient,
    http: reqwest::Client,
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<anyhow::Result<()>>,
    _dir: TempDir,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn shutdown(mut self) -> anyhow::Result<()> {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        self.task.await?
    }
}

async fn open_store() -> anyhow::Result<(sea_orm::DatabaseConnection, TempDir)> {
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("e2e.db").display());
    let mut cfg = DatabaseConfig::with_url(url);
    cfg.max_connections = 4;
    let db = connect_with_config(&cfg).await?;
    models::schema::create_memo_table(&db).await?;
    Ok((db, dir))
}

async fn start_server() -> anyhow::Result<TestApp> {
    let (db, dir) = open_store().await?;
    let app = server::startup::build_app(db, Duration::from_secs(30));

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel::<()>();
    let task = tokio::spawn(server::startup::serve(listener, app, async move {
        let _ = rx.await;
    }));

    Ok(TestApp {
        addr,
        client: MemoClient::new(&addr.to_string(), Duration::from_secs(5)),
        http: reqwest::Client::new(),
        stop: Some(tx),
        task,
        _dir: dir,
    })
}

fn sample_reminder() -> Timestamp {
    Timestamp::new(1_700_000_000, 0)
}

#[tokio::test]
async fn health_ok() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = app.http.get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({"status": "ok"}));
    app.shutdown().await
}

#[tokio::test]
async fn memo_lifecycle_over_http() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = &app.client;

    let created = c
        .create(&CreateMemoRequest {
            api: "v1".into(),
            name: "groceries".into(),
            description: "milk".into(),
            reminder: Some(sample_reminder()),
        })
        .await?;
    assert_eq!(created.api, "v1");
    assert_eq!(created.id, 1);

    let read = c.read(&ReadMemoRequest { api: "v1".into(), id: created.id }).await?;
    assert_eq!(read.memo.name, "groceries");
    assert_eq!(read.memo.description, "milk");
    assert_eq!(read.memo.reminder, Some(sample_reminder()));

    let updated = c
        .update(&UpdateMemoRequest {
            api: "v1".into(),
            id: created.id,
            name: "groceries".into(),
            description: "milk updated".into(),
            reminder: Some(sample_reminder()),
        })
        .await?;
    assert!(updated.updated);

    let all = c.read_all(&ReadAllRequest { api: "v1".into() }).await?;
    assert_eq!(all.memos.len(), 1);
    assert_eq!(all.memos[0].description, "milk updated");

    let deleted = c.delete(&DeleteMemoRequest { api: "v1".into(), id: created.id }).await?;
    assert!(deleted.deleted);

    let err = c.read(&ReadMemoRequest { api: "v1".into(), id: created.id }).await.unwrap_err();
    assert_eq!(err.code(), Some(Code::NotFound));
    assert_eq!(err.to_string(), "NOT_FOUND: Memo with ID=1 is not found");

    let err = c.delete(&DeleteMemoRequest { api: "v1".into(), id: created.id }).await.unwrap_err();
    assert_eq!(err.code(), Some(Code::NotFound));

    app.shutdown().await
}

#[tokio::test]
async fn other_api_version_is_unimplemented() -> anyhow::Result<()> {
    let app = start_server().await?;

    let res = app.http.get(app.url("/v1/memo?api=v2")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_IMPLEMENTED);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "UNIMPLEMENTED");
    assert_eq!(
        body["message"],
        "unsupported API version: request version v2 cannot be resolved by API version v1"
    );

    let err = app
        .client
        .create(&CreateMemoRequest {
            api: "v2".into(),
            name: "n".into(),
            description: "d".into(),
            reminder: Some(sample_reminder()),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(Code::Unimplemented));

    // nothing was written
    let all = app.client.read_all(&ReadAllRequest::default()).await?;
    assert!(all.memos.is_empty());
    app.shutdown().await
}

#[tokio::test]
async fn malformed_reminder_is_invalid_argument() -> anyhow::Result<()> {
    let app = start_server().await?;

    let res = app
        .http
        .post(app.url("/v1/memo"))
        .json(&json!({"api": "v1", "name": "n", "description": "d", "reminder": {"seconds": 0, "nanos": -1}}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "INVALID_ARGUMENT");
    assert!(body["message"].as_str().unwrap_or_default().starts_with("reminder field has invalid format"));

    let res = app
        .http
        .post(app.url("/v1/memo"))
        .json(&json!({"api": "v1", "name": "n", "description": "d"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    app.shutdown().await
}

#[tokio::test]
async fn update_targets_path_id() -> anyhow::Result<()> {
    let app = start_server().await?;
    let first = app
        .client
        .create(&CreateMemoRequest {
            api: "v1".into(),
            name: "a".into(),
            description: "first".into(),
            reminder: Some(sample_reminder()),
        })
        .await?;

    let res = app
        .http
        .put(app.url(&format!("/v1/memo/{}", first.id)))
        .json(&json!({
            "api": "v1", "id": 999, "name": "a", "description": "via path",
            "reminder": {"seconds": 1_700_000_000, "nanos": 0}
        }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let read = app.client.read(&ReadMemoRequest { api: String::new(), id: first.id }).await?;
    assert_eq!(read.memo.description, "via path");

    let err = app
        .client
        .update(&UpdateMemoRequest {
            api: "v1".into(),
            id: 999,
            name: "x".into(),
            description: "y".into(),
            reminder: Some(sample_reminder()),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(Code::NotFound));
    assert_eq!(err.to_string(), "NOT_FOUND: Memo with ID=999 is not found");
    app.shutdown().await
}

#[tokio::test]
async fn demo_runs_against_live_server() -> anyhow::Result<()> {
    let app = start_server().await?;
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let report = run_demo(&app.client, now).await?;

    assert_eq!(report.created_id, 1);
    assert_eq!(report.read.id, 1);
    assert_eq!(report.read.name, "Memo sample");
    assert_eq!(report.read.description, "2024-01-01T00:00:00Z");
    assert_eq!(report.read.reminder, Some(Timestamp::new(now.timestamp(), 0)));
    assert!(report.updated);
    assert_eq!(report.all.len(), 1);
    assert_eq!(report.all[0].description, "2024-01-01T00:00:00Zupdated");
    assert!(report.deleted);

    let err = app.client.read(&ReadMemoRequest { api: "v1".into(), id: 1 }).await.unwrap_err();
    assert_eq!(err.code(), Some(Code::NotFound));
    app.shutdown().await
}

async fn error_body(res: reqwest::Response) -> anyhow::Result<(HttpStatusCode, Value)> {
    let status = res.status();
    Ok((status, res.json().await?))
}

#[tokio::test]
async fn out_of_range_nanos_is_invalid_argument() -> anyhow::Result<()> {
    let app = start_server().await?;

    let res = app
        .http
        .post(app.url("/v1/memo"))
        .json(&json!({"api": "v1", "name": "n", "description": "d", "reminder": {"seconds": 0, "nanos": 3_000_000_000u64}}))
        .send()
        .await?;
    let (status, body) = error_body(res).await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");
    assert!(body["message"].as_str().unwrap_or_default().starts_with("malformed request body"));

    let res = app.http.put(app.url("/v1/memo/1")).body("not json").header("content-type", "application/json").send().await?;
    let (status, body) = error_body(res).await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");

    let all = app.client.read_all(&ReadAllRequest::default()).await?;
    assert!(all.memos.is_empty());
    app.shutdown().await
}

#[tokio::test]
async fn non_numeric_id_is_invalid_argument() -> anyhow::Result<()> {
    let app = start_server().await?;

    for res in [
        app.http.get(app.url("/v1/memo/abc")).send().await?,
        app.http.delete(app.url("/v1/memo/abc?api=v1")).send().await?,
    ] {
        let (status, body) = error_body(res).await?;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_ARGUMENT");
        assert!(body["message"].as_str().unwrap_or_default().starts_with("malformed memo id"));
    }

    let res = app.http.get(app.url("/v1/memo?api=v1&api=v2")).send().await?;
    let (status, body) = error_body(res).await?;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap_or_default().starts_with("malformed query"));
    app.shutdown().await
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let (db, _dir) = open_store().await?;
    let app = server::startup::build_app(db, Duration::from_secs(30));

    let res = app
        .oneshot(Request::builder().uri("/api-docs/openapi.json").body(Body::empty())?)
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    let doc: Value = serde_json::from_slice(&bytes)?;
    assert!(doc["paths"]["/v1/memo/{id}"].is_object());
    Ok(())
}

#[tokio::test]
async fn shutdown_stops_accepting() -> anyhow::Result<()> {
    let app = start_server().await?;
    let url = app.url("/health");
    app.shutdown().await?;

    let res = reqwest::Client::new().get(url).timeout(Duration::from_secs(2)).send().await;
    assert!(res.is_err());
    Ok(())
}
