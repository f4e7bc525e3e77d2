use std::time::Duration;

use common::api::v1::{
    Code, CreateMemoRequest, CreateMemoResponse, DeleteMemoRequest, DeleteMemoResponse, ErrorBody, ReadAllRequest,
    ReadAllResponse, ReadMemoRequest, ReadMemoResponse, UpdateMemoRequest, UpdateMemoResponse, DEADLINE_HEADER,
};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a structured failure.
    #[error("{code}: {message}")]
    Status { code: Code, message: String },
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn code(&self) -> Option<Code> {
        match self {
            ClientError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Calls the memo service at `base_url`, each call bounded by `deadline`.
#[derive(Clone, Debug)]
pub struct MemoClient {
    base_url: String,
    http: reqwest::Client,
    deadline: Duration,
}

impl MemoClient {
    /// `server` is `host:port` or a full `http://` base URL.
    pub fn new(server: &str, deadline: Duration) -> Self {
        let base_url = if server.starts_with("http://") || server.starts_with("https://") {
            server.trim_end_matches('/').to_string()
        } else {
            format!("http://{server}")
        };
        Self { base_url, http: reqwest::Client::new(), deadline }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn create(&self, req: &CreateMemoRequest) -> Result<CreateMemoResponse, ClientError> {
        self.send(self.http.post(format!("{}/v1/memo", self.base_url)).json(req)).await
    }

    pub async fn read(&self, req: &ReadMemoRequest) -> Result<ReadMemoResponse, ClientError> {
        let url = format!("{}/v1/memo/{}", self.base_url, req.id);
        self.send(self.http.get(url).query(&[("api", &req.api)])).await
    }

    pub async fn update(&self, req: &UpdateMemoRequest) -> Result<UpdateMemoResponse, ClientError> {
        let url = format!("{}/v1/memo/{}", self.base_url, req.id);
        self.send(self.http.put(url).json(req)).await
    }

    pub async fn delete(&self, req: &DeleteMemoRequest) -> Result<DeleteMemoResponse, ClientError> {
        let url = format!("{}/v1/memo/{}", self.base_url, req.id);
        self.send(self.http.delete(url).query(&[("api", &req.api)])).await
    }

    pub async fn read_all(&self, req: &ReadAllRequest) -> Result<ReadAllResponse, ClientError> {
        let url = format!("{}/v1/memo", self.base_url);
        self.send(self.http.get(url).query(&[("api", &req.api)])).await
    }

    async fn send<T: DeserializeOwned>(&self, rb: RequestBuilder) -> Result<T, ClientError> {
        let res = rb
            .timeout(self.deadline)
            .header(DEADLINE_HEADER, self.deadline.as_millis().to_string())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = res.status();
        if status.is_success() {
            return res.json::<T>().await.map_err(ClientError::from);
        }
        match res.json::<ErrorBody>().await {
            Ok(body) => Err(ClientError::Status { code: body.code, message: body.message }),
            Err(_) => Err(ClientError::UnexpectedStatus(status.as_u16())),
        }
    }

    fn classify(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            return ClientError::Status {
                code: Code::DeadlineExceeded,
                message: format!("no answer within {}ms", self.deadline.as_millis()),
            };
        }
        ClientError::Transport(e)
    }
}
